use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::basis::directory::error::{Result, ToolError};

/// One entry of the member directory as returned by the list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MemberSummary {
    /// Directory identifier. Some deployments serialise it as a number.
    #[serde(default, deserialize_with = "lenient_text")]
    pub membership_no: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub company_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub short_profile: Option<String>,
}

impl MemberSummary {
    /// Returns the membership number used to look up the company profile, if
    /// the entry carries a non-blank one.
    pub fn lookup_key(&self) -> Option<&str> {
        self.membership_no
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

/// Detailed company record returned by the profile endpoint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CompanyProfile {
    #[serde(default, deserialize_with = "lenient_text")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub website: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone: Option<String>,
    /// Primary company representative. Anything other than a JSON object is
    /// treated as absent.
    #[serde(default, deserialize_with = "lenient_object")]
    pub representatives_primary: Option<Representative>,
}

/// Contact person attached to a company profile.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Representative {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub designation: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub mobile: Option<String>,
}

/// Body of the list endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemberListResponse {
    #[serde(default)]
    data: Option<MemberListData>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum MemberListData {
    Members(Vec<MemberSummary>),
    Paginated {
        #[serde(default)]
        data: Vec<MemberSummary>,
    },
}

impl MemberListResponse {
    /// Consumes the response and yields the members it contains, or an empty
    /// list when the payload carries none.
    pub fn into_members(self) -> Vec<MemberSummary> {
        match self.data {
            Some(MemberListData::Members(members)) => members,
            Some(MemberListData::Paginated { data }) => data,
            None => Vec::new(),
        }
    }
}

/// Body of the profile endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanyProfileResponse {
    /// Any truthy `member` counts as a profile; values that are not objects
    /// yield a profile with every field absent.
    #[serde(default, deserialize_with = "truthy_profile")]
    pub member: Option<CompanyProfile>,
}

fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(value_to_text))
}

fn lenient_object<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(object @ Value::Object(_)) => serde_json::from_value(object).ok(),
        _ => None,
    })
}

fn truthy_profile<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<CompanyProfile>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => None,
        Some(Value::String(text)) if text.is_empty() => None,
        Some(Value::Number(number)) if number.as_f64() == Some(0.0) => None,
        Some(object @ Value::Object(_)) => Some(serde_json::from_value(object).unwrap_or_default()),
        Some(_) => Some(CompanyProfile::default()),
    })
}

fn value_to_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

/// Validated page selection for one export run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

impl PageRequest {
    /// Creates a request from already-numeric values. Both must be positive.
    pub fn new(page: u32, per_page: u32) -> Result<Self> {
        Ok(Self {
            page: positive("page", i64::from(page), &page.to_string())?,
            per_page: positive("per_page", i64::from(per_page), &per_page.to_string())?,
        })
    }

    /// Parses the raw text typed by the operator. Like a decimal `parseInt`,
    /// only the leading integer counts: `"12abc"` is 12 and `"1.5"` is 1. Text
    /// without leading digits or a value below 1 is rejected.
    pub fn parse(page: &str, per_page: &str) -> Result<Self> {
        Ok(Self {
            page: parse_positive("page", page)?,
            per_page: parse_positive("per_page", per_page)?,
        })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Name of the workbook produced for this request.
    pub fn output_file_name(&self) -> String {
        format!("CompanyData_Page{}_PerPage{}.xlsx", self.page, self.per_page)
    }
}

fn parse_positive(field: &'static str, raw: &str) -> Result<u32> {
    let trimmed = raw.trim();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digit_count = unsigned.bytes().take_while(u8::is_ascii_digit).count();
    let magnitude = unsigned[..digit_count]
        .parse::<i64>()
        .map_err(|_| invalid(field, trimmed))?;
    let value = if negative { -magnitude } else { magnitude };
    positive(field, value, trimmed)
}

fn positive(field: &'static str, value: i64, raw: &str) -> Result<u32> {
    if value <= 0 {
        return Err(invalid(field, raw));
    }
    u32::try_from(value).map_err(|_| invalid(field, raw))
}

fn invalid(field: &'static str, raw: &str) -> ToolError {
    ToolError::InvalidInput {
        field,
        value: raw.to_string(),
    }
}
