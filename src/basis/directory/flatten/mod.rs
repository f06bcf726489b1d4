use crate::basis::directory::model::{CompanyProfile, MemberSummary};

/// Name of the single worksheet in the export.
pub const COMPANY_SHEET: &str = "Company Data";

/// Describes one column of the export sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSpec {
    /// Human readable header written in the first row.
    pub header: &'static str,
    /// Field of [`ExportRow`] rendered in the column.
    pub key: &'static str,
    /// Column width hint in Excel character units.
    pub width: u16,
}

/// Fixed column layout of the export, in output order.
pub const COLUMNS: [ColumnSpec; 11] = [
    column("Membership No", "membership_no", 20),
    column("Company Name", "company_name", 30),
    column("Short Profile", "short_profile", 50),
    column("Address", "address", 50),
    column("Email", "email", 30),
    column("Website", "website", 30),
    column("Phone", "phone", 20),
    column("Rep Name", "primary_rep_name", 25),
    column("Rep Email", "primary_rep_email", 30),
    column("Rep Designation", "primary_rep_designation", 25),
    column("Rep Mobile", "primary_rep_mobile", 20),
];

const fn column(header: &'static str, key: &'static str, width: u16) -> ColumnSpec {
    ColumnSpec { header, key, width }
}

/// A member summary merged with its company profile. Absent values are
/// already replaced by empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportRow {
    pub membership_no: String,
    pub company_name: String,
    pub short_profile: String,
    pub address: String,
    pub email: String,
    pub website: String,
    pub phone: String,
    pub primary_rep_name: String,
    pub primary_rep_email: String,
    pub primary_rep_designation: String,
    pub primary_rep_mobile: String,
}

impl ExportRow {
    /// Flattens a member and its profile into a single row.
    pub fn from_parts(member: &MemberSummary, profile: &CompanyProfile) -> Self {
        let rep = profile.representatives_primary.as_ref();

        Self {
            membership_no: text(&member.membership_no),
            company_name: text(&member.company_name),
            short_profile: text(&member.short_profile),
            address: text(&profile.address),
            email: text(&profile.email),
            website: text(&profile.website),
            phone: text(&profile.phone),
            primary_rep_name: rep.map(|rep| text(&rep.name)).unwrap_or_default(),
            primary_rep_email: rep.map(|rep| text(&rep.email)).unwrap_or_default(),
            primary_rep_designation: rep.map(|rep| text(&rep.designation)).unwrap_or_default(),
            primary_rep_mobile: rep.map(|rep| text(&rep.mobile)).unwrap_or_default(),
        }
    }

    /// Looks up a field by its column key.
    pub fn field(&self, key: &str) -> Option<&str> {
        let value = match key {
            "membership_no" => &self.membership_no,
            "company_name" => &self.company_name,
            "short_profile" => &self.short_profile,
            "address" => &self.address,
            "email" => &self.email,
            "website" => &self.website,
            "phone" => &self.phone,
            "primary_rep_name" => &self.primary_rep_name,
            "primary_rep_email" => &self.primary_rep_email,
            "primary_rep_designation" => &self.primary_rep_designation,
            "primary_rep_mobile" => &self.primary_rep_mobile,
            _ => return None,
        };
        Some(value)
    }

    /// Cells of the row in [`COLUMNS`] order.
    pub fn cells(&self) -> Vec<String> {
        COLUMNS
            .iter()
            .map(|column| self.field(column.key).unwrap_or_default().to_string())
            .collect()
    }
}

/// A table that will be materialised as an Excel sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetTable {
    pub sheet_name: String,
    pub columns: Vec<ColumnSpec>,
    pub rows: Vec<Vec<String>>,
}

/// Builds the company sheet from the collected rows.
pub fn build_sheet(rows: &[ExportRow]) -> SheetTable {
    SheetTable {
        sheet_name: COMPANY_SHEET.to_string(),
        columns: COLUMNS.to_vec(),
        rows: rows.iter().map(ExportRow::cells).collect(),
    }
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}
