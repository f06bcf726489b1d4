use std::io::{BufRead, Write};

use tracing::debug;

use crate::basis::directory::error::Result;
use crate::basis::directory::model::PageRequest;

pub const PAGE_PROMPT: &str = "Enter the page number: ";
pub const PER_PAGE_PROMPT: &str = "Enter the number of records per page: ";

/// Values already supplied on the command line. Missing ones are prompted for;
/// supplied ones get the same positivity check as typed answers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PresetPage {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Collects the page and page size, prompting on `output` and reading answers
/// from `input`. Both answers are read before either is validated.
pub fn prompt_page_request<R, W>(
    input: &mut R,
    output: &mut W,
    preset: PresetPage,
) -> Result<PageRequest>
where
    R: BufRead,
    W: Write,
{
    let request = match (preset.page, preset.per_page) {
        (Some(page), Some(per_page)) => PageRequest::new(page, per_page)?,
        (page, per_page) => {
            let page = match page {
                Some(page) => page.to_string(),
                None => ask(input, output, PAGE_PROMPT)?,
            };
            let per_page = match per_page {
                Some(per_page) => per_page.to_string(),
                None => ask(input, output, PER_PAGE_PROMPT)?,
            };
            PageRequest::parse(&page, &per_page)?
        }
    };
    debug!(page = request.page(), per_page = request.per_page(), "page request accepted");
    Ok(request)
}

/// Writes `question` and returns the next line of input without its line
/// terminator. End of input yields an empty answer.
pub fn ask<R, W>(input: &mut R, output: &mut W, question: &str) -> Result<String>
where
    R: BufRead,
    W: Write,
{
    output.write_all(question.as_bytes())?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
