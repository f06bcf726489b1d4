use std::path::PathBuf;

use basis_directory_export::config::{
    DEFAULT_LIST_ENDPOINT, DEFAULT_PROFILE_ENDPOINT, ExportConfig,
};
use basis_directory_export::export::{self, ExportOutcome};
use basis_directory_export::io::api::HttpDirectory;
use basis_directory_export::io::prompt::PresetPage;
use basis_directory_export::{Result, ToolError};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const INVALID_INPUT_MESSAGE: &str =
    "Invalid input. Please enter positive numbers for page and per_page.";

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_logging(&cli.log_level) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }

    match run(cli) {
        Ok(outcome) => debug!(?outcome, "export finished"),
        Err(error @ ToolError::InvalidInput { .. }) => {
            debug!(%error, "rejected page selection");
            println!("{INVALID_INPUT_MESSAGE}");
            std::process::exit(1);
        }
        Err(error) => {
            eprintln!("error: {error}");
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<ExportOutcome> {
    let config = cli.into_config();
    let directory = HttpDirectory::new(&config)?;

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout().lock();
    export::run(&directory, &config, &mut input, &mut output)
}

fn init_logging(default_filter: &str) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|error| ToolError::Logging(error.to_string()))
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Export one page of the BASIS member directory, with company profiles, to Excel."
)]
struct Cli {
    /// Page to export. Prompted for when omitted.
    #[arg(long)]
    page: Option<u32>,

    /// Records per page. Prompted for when omitted.
    #[arg(long)]
    per_page: Option<u32>,

    /// Member list endpoint; page parameters are appended to its query string.
    #[arg(long, default_value = DEFAULT_LIST_ENDPOINT)]
    list_endpoint: String,

    /// Company profile endpoint; the membership number is appended as a path segment.
    #[arg(long, default_value = DEFAULT_PROFILE_ENDPOINT)]
    profile_endpoint: String,

    /// Directory the workbook is written to.
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Cli {
    fn into_config(self) -> ExportConfig {
        ExportConfig {
            list_endpoint: self.list_endpoint,
            profile_endpoint: self.profile_endpoint,
            output_dir: self.output_dir,
            preset: PresetPage {
                page: self.page,
                per_page: self.per_page,
            },
        }
    }
}
