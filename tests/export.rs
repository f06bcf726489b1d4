use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::{self, Cursor};
use std::path::Path;

use basis_directory_export::config::ExportConfig;
use basis_directory_export::export::{self, ExportOutcome, process_and_export};
use basis_directory_export::flatten::{COLUMNS, COMPANY_SHEET};
use basis_directory_export::io::api::Directory;
use basis_directory_export::io::prompt::PresetPage;
use basis_directory_export::model::{CompanyProfile, MemberSummary, PageRequest};
use basis_directory_export::{Result, ToolError};
use calamine::{DataType, Reader, Xlsx, open_workbook};
use serde_json::{Value, json};
use tempfile::tempdir;

/// Scripted directory. Profiles missing from the map fail like an HTTP 404.
struct FakeDirectory {
    members: Option<Vec<MemberSummary>>,
    profiles: HashMap<String, Option<CompanyProfile>>,
    calls: RefCell<Vec<String>>,
}

impl FakeDirectory {
    fn new(members: Value) -> Self {
        Self {
            members: Some(serde_json::from_value(members).expect("members decoded")),
            profiles: HashMap::new(),
            calls: RefCell::new(Vec::new()),
        }
    }

    fn unreachable() -> Self {
        Self {
            members: None,
            profiles: HashMap::new(),
            calls: RefCell::new(Vec::new()),
        }
    }

    fn with_profile(mut self, membership_no: &str, profile: Value) -> Self {
        let profile = serde_json::from_value(profile).expect("profile decoded");
        self.profiles.insert(membership_no.to_string(), Some(profile));
        self
    }

    fn with_empty_profile(mut self, membership_no: &str) -> Self {
        self.profiles.insert(membership_no.to_string(), None);
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl Directory for FakeDirectory {
    fn member_list(&self, request: PageRequest) -> Result<Vec<MemberSummary>> {
        self.calls
            .borrow_mut()
            .push(format!("list:{}:{}", request.page(), request.per_page()));
        self.members
            .clone()
            .ok_or_else(|| io::Error::new(io::ErrorKind::ConnectionRefused, "refused").into())
    }

    fn company_profile(&self, membership_no: &str) -> Result<Option<CompanyProfile>> {
        self.calls
            .borrow_mut()
            .push(format!("profile:{membership_no}"));
        self.profiles.get(membership_no).cloned().ok_or_else(|| {
            ToolError::Io(io::Error::new(io::ErrorKind::NotFound, "404 Not Found"))
        })
    }
}

fn read_sheet(path: &Path) -> Vec<Vec<String>> {
    let mut workbook: Xlsx<_> = open_workbook(path).expect("workbook opened");
    let range = workbook
        .worksheet_range(COMPANY_SHEET)
        .expect("company sheet present")
        .expect("company sheet read");
    range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect()
}

fn cell_text(cell: &DataType) -> String {
    match cell {
        DataType::String(value) => value.clone(),
        DataType::Empty => String::new(),
        other => other.to_string(),
    }
}

fn expected_headers() -> Vec<String> {
    COLUMNS.iter().map(|column| column.header.to_string()).collect()
}

fn request(page: u32, per_page: u32) -> PageRequest {
    PageRequest::new(page, per_page).expect("valid request")
}

#[test]
fn empty_member_list_writes_no_file() {
    let directory = FakeDirectory::new(json!([]));
    let temp_dir = tempdir().expect("temporary directory");

    let outcome = process_and_export(&directory, request(1, 10), temp_dir.path()).expect("run");

    assert_eq!(outcome, ExportOutcome::NoData);
    assert_eq!(directory.calls(), vec!["list:1:10".to_string()]);
    assert_eq!(fs::read_dir(temp_dir.path()).expect("dir listed").count(), 0);
}

#[test]
fn failed_member_list_is_treated_as_no_data() {
    let directory = FakeDirectory::unreachable();
    let temp_dir = tempdir().expect("temporary directory");

    let outcome = process_and_export(&directory, request(3, 5), temp_dir.path()).expect("run");

    assert_eq!(outcome, ExportOutcome::NoData);
    assert!(!temp_dir.path().join("CompanyData_Page3_PerPage5.xlsx").exists());
}

#[test]
fn missing_profile_fields_render_as_blank_cells() {
    let directory = FakeDirectory::new(json!([{"membership_no": "M1", "company_name": "Acme"}]))
        .with_profile("M1", json!({"address": "123 St", "email": "a@x.com"}));
    let temp_dir = tempdir().expect("temporary directory");

    let outcome = process_and_export(&directory, request(2, 50), temp_dir.path()).expect("run");

    let path = temp_dir.path().join("CompanyData_Page2_PerPage50.xlsx");
    assert_eq!(
        outcome,
        ExportOutcome::Written {
            path: path.clone(),
            members: 1,
            rows: 1,
        }
    );

    let sheet = read_sheet(&path);
    assert_eq!(sheet.len(), 2);
    assert_eq!(sheet[0], expected_headers());
    assert_eq!(
        sheet[1],
        vec!["M1", "Acme", "", "123 St", "a@x.com", "", "", "", "", "", ""]
    );
}

#[test]
fn members_with_failed_profiles_are_dropped() {
    let directory = FakeDirectory::new(json!([
        {"membership_no": "M1", "company_name": "Acme"},
        {"membership_no": "M2", "company_name": "Broken"},
        {"membership_no": "M3", "company_name": "Hollow"},
        {"membership_no": "M4", "company_name": "Globex", "short_profile": "Software"}
    ]))
    .with_profile("M1", json!({"phone": "555-0100"}))
    .with_empty_profile("M3")
    .with_profile(
        "M4",
        json!({
            "website": "https://globex.example",
            "representatives_primary": {
                "name": "Hank Scorpio",
                "email": "hank@globex.example",
                "designation": "CEO",
                "mobile": "017000000"
            }
        }),
    );
    let temp_dir = tempdir().expect("temporary directory");

    let outcome = process_and_export(&directory, request(1, 4), temp_dir.path()).expect("run");

    let path = temp_dir.path().join("CompanyData_Page1_PerPage4.xlsx");
    assert_eq!(
        outcome,
        ExportOutcome::Written {
            path: path.clone(),
            members: 4,
            rows: 2,
        }
    );
    assert_eq!(
        directory.calls(),
        vec![
            "list:1:4",
            "profile:M1",
            "profile:M2",
            "profile:M3",
            "profile:M4"
        ]
    );

    let sheet = read_sheet(&path);
    assert_eq!(sheet.len(), 3);
    assert_eq!(sheet[1][0], "M1");
    assert_eq!(sheet[1][6], "555-0100");
    assert_eq!(
        sheet[2],
        vec![
            "M4",
            "Globex",
            "Software",
            "",
            "",
            "https://globex.example",
            "",
            "Hank Scorpio",
            "hank@globex.example",
            "CEO",
            "017000000"
        ]
    );
}

#[test]
fn all_profiles_failing_still_writes_header_row() {
    let directory = FakeDirectory::new(json!([
        {"membership_no": "M1"},
        {"membership_no": "M2"}
    ]));
    let temp_dir = tempdir().expect("temporary directory");

    let outcome = process_and_export(&directory, request(7, 2), temp_dir.path()).expect("run");

    let path = temp_dir.path().join("CompanyData_Page7_PerPage2.xlsx");
    assert_eq!(
        outcome,
        ExportOutcome::Written {
            path: path.clone(),
            members: 2,
            rows: 0,
        }
    );
    assert_eq!(read_sheet(&path), vec![expected_headers()]);
}

#[test]
fn member_without_membership_number_is_not_looked_up() {
    let directory = FakeDirectory::new(json!([
        {"company_name": "Nameless"},
        {"membership_no": "  ", "company_name": "Blank"},
        {"membership_no": 1024, "company_name": "Numbered"}
    ]))
    .with_profile("1024", json!({"email": "info@numbered.example"}));
    let temp_dir = tempdir().expect("temporary directory");

    let outcome = process_and_export(&directory, request(1, 3), temp_dir.path()).expect("run");

    assert!(matches!(outcome, ExportOutcome::Written { rows: 1, .. }));
    assert_eq!(directory.calls(), vec!["list:1:3", "profile:1024"]);
}

#[test]
fn existing_export_is_overwritten() {
    let directory = FakeDirectory::new(json!([{"membership_no": "M9", "company_name": "Initech"}]))
        .with_profile("M9", json!({}));
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("CompanyData_Page1_PerPage1.xlsx");
    fs::write(&path, b"stale").expect("stale file written");

    process_and_export(&directory, request(1, 1), temp_dir.path()).expect("run");

    let sheet = read_sheet(&path);
    assert_eq!(sheet[1][0], "M9");
    assert_eq!(sheet[1][1], "Initech");
}

#[test]
fn output_directory_is_created_when_missing() {
    let directory = FakeDirectory::new(json!([{"membership_no": "M1"}])).with_profile("M1", json!({}));
    let temp_dir = tempdir().expect("temporary directory");
    let nested = temp_dir.path().join("exports").join("basis");

    process_and_export(&directory, request(4, 20), &nested).expect("run");

    assert!(nested.join("CompanyData_Page4_PerPage20.xlsx").exists());
}

#[test]
fn invalid_input_aborts_before_any_request() {
    let directory = FakeDirectory::new(json!([{"membership_no": "M1"}]));
    let temp_dir = tempdir().expect("temporary directory");
    let config = ExportConfig {
        output_dir: temp_dir.path().to_path_buf(),
        ..ExportConfig::default()
    };
    let mut input = Cursor::new("2\n0\n");
    let mut output = Vec::new();

    let error = export::run(&directory, &config, &mut input, &mut output).expect_err("rejected");

    assert!(matches!(
        error,
        ToolError::InvalidInput {
            field: "per_page",
            ..
        }
    ));
    assert!(directory.calls().is_empty());
    assert_eq!(fs::read_dir(temp_dir.path()).expect("dir listed").count(), 0);
}

#[test]
fn run_uses_prompted_values_for_the_request() {
    let directory = FakeDirectory::new(json!([]));
    let temp_dir = tempdir().expect("temporary directory");
    let config = ExportConfig {
        output_dir: temp_dir.path().to_path_buf(),
        ..ExportConfig::default()
    };
    let mut input = Cursor::new("12\n25\n");
    let mut output = Vec::new();

    let outcome = export::run(&directory, &config, &mut input, &mut output).expect("run");

    assert_eq!(outcome, ExportOutcome::NoData);
    assert_eq!(directory.calls(), vec!["list:12:25"]);
    assert_eq!(
        String::from_utf8(output).expect("utf-8 prompts"),
        "Enter the page number: Enter the number of records per page: "
    );
}

#[test]
fn run_skips_prompts_for_preset_values() {
    let directory = FakeDirectory::new(json!([]));
    let temp_dir = tempdir().expect("temporary directory");
    let config = ExportConfig {
        output_dir: temp_dir.path().to_path_buf(),
        preset: PresetPage {
            page: Some(5),
            per_page: Some(100),
        },
        ..ExportConfig::default()
    };
    let mut input = Cursor::new("");
    let mut output = Vec::new();

    export::run(&directory, &config, &mut input, &mut output).expect("run");

    assert!(output.is_empty());
    assert_eq!(directory.calls(), vec!["list:5:100"]);
}
