use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, info, instrument, warn};

use crate::basis::directory::config::ExportConfig;
use crate::basis::directory::error::Result;
use crate::basis::directory::model::{
    CompanyProfile, CompanyProfileResponse, MemberListResponse, MemberSummary, PageRequest,
};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Read access to the member directory.
///
/// Implementations report every upstream failure as an error; deciding what a
/// failure means for the export is left to [`fetch_member_list`] and
/// [`fetch_company_profile`].
pub trait Directory {
    /// Returns the members listed on the requested page.
    fn member_list(&self, request: PageRequest) -> Result<Vec<MemberSummary>>;

    /// Returns the profile stored for `membership_no`, or `None` when the
    /// response carries no profile.
    fn company_profile(&self, membership_no: &str) -> Result<Option<CompanyProfile>>;
}

/// [`Directory`] backed by the public HTTP endpoints.
#[derive(Debug, Clone)]
pub struct HttpDirectory {
    client: Client,
    list_endpoint: String,
    profile_endpoint: String,
}

impl HttpDirectory {
    pub fn new(config: &ExportConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(None::<Duration>)
            .build()?;

        Ok(Self {
            client,
            list_endpoint: config.list_endpoint.clone(),
            profile_endpoint: config.profile_endpoint.clone(),
        })
    }

    /// URL of the profile document for `membership_no`.
    pub fn profile_url(&self, membership_no: &str) -> String {
        format!(
            "{}/{}",
            self.profile_endpoint.trim_end_matches('/'),
            membership_no
        )
    }
}

impl Directory for HttpDirectory {
    fn member_list(&self, request: PageRequest) -> Result<Vec<MemberSummary>> {
        let response = self
            .client
            .get(&self.list_endpoint)
            .query(&[("page", request.page()), ("per_page", request.per_page())])
            .send()?
            .error_for_status()?;
        let body: MemberListResponse = response.json()?;
        Ok(body.into_members())
    }

    fn company_profile(&self, membership_no: &str) -> Result<Option<CompanyProfile>> {
        let response = self
            .client
            .get(self.profile_url(membership_no))
            .send()?
            .error_for_status()?;
        let body: CompanyProfileResponse = response.json()?;
        Ok(body.member)
    }
}

/// Fetches one page of members. Failures are logged and reported as an
/// empty page.
#[instrument(level = "debug", skip(directory))]
pub fn fetch_member_list<D>(directory: &D, request: PageRequest) -> Vec<MemberSummary>
where
    D: Directory + ?Sized,
{
    info!(
        "Fetching page {} with {} records per page...",
        request.page(),
        request.per_page()
    );
    match directory.member_list(request) {
        Ok(members) => members,
        Err(error) => {
            warn!(%error, "error fetching member list");
            Vec::new()
        }
    }
}

/// Fetches the profile of one member. Failures are logged and reported as a
/// missing profile.
#[instrument(level = "debug", skip(directory))]
pub fn fetch_company_profile<D>(directory: &D, membership_no: &str) -> Option<CompanyProfile>
where
    D: Directory + ?Sized,
{
    match directory.company_profile(membership_no) {
        Ok(Some(profile)) => Some(profile),
        Ok(None) => {
            debug!(membership_no, "profile response carried no member");
            None
        }
        Err(error) => {
            warn!(membership_no, %error, "error fetching profile for {membership_no}");
            None
        }
    }
}
