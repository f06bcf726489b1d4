use std::path::PathBuf;

use crate::basis::directory::io::prompt::PresetPage;

/// Directory listing endpoint. The `page` and `per_page` parameters are
/// appended to the existing query string.
pub const DEFAULT_LIST_ENDPOINT: &str = "https://basis.org.bd/get-member-list?team=";
/// Profile endpoint; the membership number is appended as a path segment.
pub const DEFAULT_PROFILE_ENDPOINT: &str = "https://basis.org.bd/get-company-profile";

/// Settings for one export run.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportConfig {
    pub list_endpoint: String,
    pub profile_endpoint: String,
    /// Directory the workbook is written to.
    pub output_dir: PathBuf,
    pub preset: PresetPage,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            list_endpoint: DEFAULT_LIST_ENDPOINT.to_string(),
            profile_endpoint: DEFAULT_PROFILE_ENDPOINT.to_string(),
            output_dir: PathBuf::from("."),
            preset: PresetPage::default(),
        }
    }
}
