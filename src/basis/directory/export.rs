use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::basis::directory::config::ExportConfig;
use crate::basis::directory::error::Result;
use crate::basis::directory::flatten::{ExportRow, build_sheet};
use crate::basis::directory::io::api::{Directory, fetch_company_profile, fetch_member_list};
use crate::basis::directory::io::excel_write;
use crate::basis::directory::io::prompt::prompt_page_request;
use crate::basis::directory::model::{MemberSummary, PageRequest};

/// Result of a completed export run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The requested page listed no members; nothing was written.
    NoData,
    /// The workbook was written to `path`.
    Written {
        path: PathBuf,
        members: usize,
        rows: usize,
    },
}

/// Collects the page selection and runs the export. Invalid input aborts the
/// run before the directory is contacted.
pub fn run<D, R, W>(
    directory: &D,
    config: &ExportConfig,
    input: &mut R,
    output: &mut W,
) -> Result<ExportOutcome>
where
    D: Directory + ?Sized,
    R: BufRead,
    W: Write,
{
    let request = prompt_page_request(input, output, config.preset)?;
    process_and_export(directory, request, &config.output_dir)
}

/// Fetches one page of members with their profiles and writes them to
/// `CompanyData_Page{page}_PerPage{per_page}.xlsx` inside `output_dir`.
#[instrument(
    level = "info",
    skip_all,
    fields(page = request.page(), per_page = request.per_page())
)]
pub fn process_and_export<D>(
    directory: &D,
    request: PageRequest,
    output_dir: &Path,
) -> Result<ExportOutcome>
where
    D: Directory + ?Sized,
{
    let members = fetch_member_list(directory, request);
    if members.is_empty() {
        info!("No data found for the specified page and per_page values.");
        return Ok(ExportOutcome::NoData);
    }

    info!("Found {} members. Fetching profiles...", members.len());
    let rows = collect_rows(directory, &members);
    debug!(
        row_count = rows.len(),
        dropped = members.len() - rows.len(),
        "profiles collected"
    );

    let table = build_sheet(&rows);
    fs::create_dir_all(output_dir)?;
    let path = output_dir.join(request.output_file_name());
    excel_write::write_sheet(&path, &table)?;
    info!("Data saved to {}", path.display());

    Ok(ExportOutcome::Written {
        path,
        members: members.len(),
        rows: rows.len(),
    })
}

/// Fetches profiles one member at a time and flattens each successful pair.
/// Members whose profile cannot be fetched contribute no row.
pub fn collect_rows<D>(directory: &D, members: &[MemberSummary]) -> Vec<ExportRow>
where
    D: Directory + ?Sized,
{
    members
        .iter()
        .filter_map(|member| {
            let Some(membership_no) = member.lookup_key() else {
                warn!(
                    company_name = member.company_name.as_deref().unwrap_or_default(),
                    "skipping member without a membership number"
                );
                return None;
            };
            let profile = fetch_company_profile(directory, membership_no)?;
            Some(ExportRow::from_parts(member, &profile))
        })
        .collect()
}
