//! Joining and leaving academies.
//!
//! [`MembershipWorkflow`] is the capability handed to membership screens;
//! [`RemoteMembershipWorkflow`] implements it against the REST API.

mod active;
mod remote;

pub use active::ActiveAcademy;
pub use remote::RemoteMembershipWorkflow;

use async_trait::async_trait;
use scholaris_core::{ClientError, ClientResult, ListParams, Paginated, PaginationMeta};
use scholaris_models::{AcademyId, AcademyMembership, DirectoryEntry, MembershipId};

/// One directory page, or the error that prevented it. Never partial.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryResult {
    pub success: bool,
    pub data: Vec<DirectoryEntry>,
    pub meta: Option<PaginationMeta>,
    pub error: Option<ClientError>,
}

impl From<ClientResult<Paginated<DirectoryEntry>>> for DirectoryResult {
    fn from(result: ClientResult<Paginated<DirectoryEntry>>) -> Self {
        match result {
            Ok(page) => Self {
                success: true,
                data: page.data,
                meta: Some(page.meta),
                error: None,
            },
            Err(error) => Self {
                success: false,
                data: Vec::new(),
                meta: None,
                error: Some(error),
            },
        }
    }
}

/// Outcome of a membership mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct MembershipResult {
    pub success: bool,
    /// The created record, for requests.
    pub data: Option<AcademyMembership>,
    pub error: Option<ClientError>,
}

impl MembershipResult {
    pub fn ok(data: Option<AcademyMembership>) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }

    pub fn failed(error: ClientError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }

    pub fn into_result(self) -> ClientResult<Option<AcademyMembership>> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.data),
        }
    }
}

#[async_trait]
pub trait MembershipWorkflow: Send + Sync {
    /// Searches the academy directory. The query is remembered and re-run
    /// after every mutation.
    async fn fetch_directory(&self, params: ListParams) -> DirectoryResult;

    /// Reloads the caller's memberships from the server.
    async fn list_memberships(&self) -> ClientResult<Vec<AcademyMembership>>;

    async fn request_membership(&self, academy_id: AcademyId) -> MembershipResult;

    /// Cancels a PENDING request or leaves an APPROVED academy.
    async fn withdraw_membership(&self, membership_id: MembershipId) -> MembershipResult;

    fn select_active_academy(&self, academy_id: AcademyId) -> ClientResult<()>;

    fn active_academy(&self) -> Option<AcademyId>;

    fn pending_requests(&self) -> Vec<AcademyMembership>;

    fn approved_memberships(&self) -> Vec<AcademyMembership>;

    /// The most recent directory page, if any query ran.
    fn directory(&self) -> Option<DirectoryResult>;
}
