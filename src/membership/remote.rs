use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use scholaris_config::MembershipLimitConfig;
use scholaris_core::{ClientError, ClientResult, ConflictKind, ListParams};
use scholaris_models::{
    AcademyId, AcademyMembership, MembershipId, MembershipStatus, Role, normalize_memberships,
};
use tracing::{debug, info, instrument, warn};

use super::{ActiveAcademy, DirectoryResult, MembershipResult, MembershipWorkflow};
use crate::api::ApiClient;
use crate::session::SessionStore;
use crate::toast::ToastNotifier;

#[derive(Debug, Default)]
struct DirectoryCache {
    last_query: Option<ListParams>,
    last_result: Option<DirectoryResult>,
}

#[derive(Debug)]
pub struct RemoteMembershipWorkflow {
    api: ApiClient,
    session: SessionStore,
    toasts: ToastNotifier,
    active: ActiveAcademy,
    limits: MembershipLimitConfig,
    directory: Mutex<DirectoryCache>,
}

impl RemoteMembershipWorkflow {
    pub fn new(
        api: ApiClient,
        session: SessionStore,
        toasts: ToastNotifier,
        active: ActiveAcademy,
        limits: MembershipLimitConfig,
    ) -> Self {
        Self {
            api,
            session,
            toasts,
            active,
            limits,
            directory: Mutex::new(DirectoryCache::default()),
        }
    }

    fn cache(&self) -> MutexGuard<'_, DirectoryCache> {
        self.directory.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Academy cap for `role`, or `None` when the role cannot hold memberships.
    pub fn limit_for(&self, role: Role) -> Option<u32> {
        match role {
            Role::Teacher => Some(self.limits.teacher_limit),
            Role::Student => Some(self.limits.student_limit),
            Role::SuperAdmin | Role::AcademyOwner => None,
        }
    }

    /// Local checks that make a request pointless. Nothing here touches the
    /// network; the server remains the final judge.
    fn precheck_request(&self, academy_id: AcademyId) -> ClientResult<()> {
        let session = self.session.snapshot();
        let Some(role) = session.role.filter(|r| r.holds_memberships()) else {
            return Err(ClientError::authorization(
                "Only teachers and students can join academies",
            ));
        };

        if session
            .memberships
            .iter()
            .any(|m| m.academy_id == academy_id && m.status.is_active())
        {
            return Err(ClientError::conflict(ConflictKind::AlreadyMember));
        }

        if self.limits.client_check
            && let Some(limit) = self.limit_for(role)
        {
            let active = session
                .memberships
                .iter()
                .filter(|m| m.status.is_active())
                .count();
            if active >= limit as usize {
                return Err(ClientError::conflict(ConflictKind::LimitExceeded {
                    limit: Some(limit),
                }));
            }
        }

        Ok(())
    }

    fn precheck_withdraw(&self, membership_id: MembershipId) -> ClientResult<AcademyMembership> {
        let session = self.session.snapshot();
        let membership = session
            .memberships
            .into_iter()
            .find(|m| m.id == membership_id)
            .ok_or_else(|| ClientError::not_found("Membership not found"))?;
        if !membership.status.is_active() {
            return Err(ClientError::conflict(ConflictKind::InactiveMembership));
        }
        Ok(membership)
    }

    /// Reports a failure the way every membership screen does.
    fn report(&self, error: &ClientError) {
        if error.is_authorization() {
            self.session.expire();
        } else {
            self.toasts.notify_error(error);
        }
    }

    /// Reloads memberships and the remembered directory page after a
    /// mutation reached the server, whatever its outcome.
    async fn resync(&self) {
        if let Err(error) = self.list_memberships().await {
            debug!(%error, "membership refresh after mutation failed");
        }
        let query = self.cache().last_query.clone();
        if let Some(query) = query {
            self.fetch_directory(query).await;
        }
    }
}

#[async_trait]
impl MembershipWorkflow for RemoteMembershipWorkflow {
    #[instrument(skip(self))]
    async fn fetch_directory(&self, params: ListParams) -> DirectoryResult {
        self.cache().last_query = Some(params.clone());

        let result = DirectoryResult::from(self.api.directory(&params).await);
        if let Some(error) = &result.error {
            warn!(%error, "directory search failed");
            self.report(error);
        }

        self.cache().last_result = Some(result.clone());
        result
    }

    #[instrument(skip(self))]
    async fn list_memberships(&self) -> ClientResult<Vec<AcademyMembership>> {
        match self.api.my_memberships().await {
            Ok(records) => {
                let memberships = normalize_memberships(records);
                self.session.set_memberships(memberships.clone());
                self.active.revalidate(&memberships);
                Ok(memberships)
            }
            Err(error) => {
                self.report(&error);
                Err(error)
            }
        }
    }

    #[instrument(skip(self), fields(academy_id = %academy_id))]
    async fn request_membership(&self, academy_id: AcademyId) -> MembershipResult {
        if let Err(error) = self.precheck_request(academy_id) {
            info!(%error, "membership request blocked locally");
            self.toasts.notify_error(&error);
            return MembershipResult::failed(error);
        }

        let outcome = match self.api.request_membership(academy_id).await {
            Ok(membership) => {
                info!(membership_id = %membership.id, "membership requested");
                let academy = if membership.academy_name.is_empty() {
                    "the academy".to_string()
                } else {
                    membership.academy_name.clone()
                };
                self.toasts.success(
                    "Request sent",
                    format!("Your request to join {academy} is awaiting approval"),
                );
                MembershipResult::ok(Some(membership))
            }
            Err(error) => {
                warn!(%error, "membership request rejected");
                self.report(&error);
                MembershipResult::failed(error)
            }
        };

        if !outcome
            .error
            .as_ref()
            .is_some_and(ClientError::is_authorization)
        {
            self.resync().await;
        }
        outcome
    }

    #[instrument(skip(self), fields(membership_id = %membership_id))]
    async fn withdraw_membership(&self, membership_id: MembershipId) -> MembershipResult {
        let membership = match self.precheck_withdraw(membership_id) {
            Ok(membership) => membership,
            Err(error) => {
                info!(%error, "withdrawal blocked locally");
                self.toasts.notify_error(&error);
                return MembershipResult::failed(error);
            }
        };

        let outcome = match self.api.withdraw_membership(membership_id).await {
            Ok(()) => {
                let (title, description) = match membership.status {
                    MembershipStatus::Pending => (
                        "Request cancelled",
                        format!("Your request to join {} was withdrawn", membership.academy_name),
                    ),
                    _ => (
                        "Left academy",
                        format!("You are no longer a member of {}", membership.academy_name),
                    ),
                };
                info!(status = membership.status.as_str(), "membership withdrawn");
                self.toasts.success(title, description);
                MembershipResult::ok(None)
            }
            Err(error) => {
                warn!(%error, "withdrawal rejected");
                self.report(&error);
                MembershipResult::failed(error)
            }
        };

        if !outcome
            .error
            .as_ref()
            .is_some_and(ClientError::is_authorization)
        {
            self.resync().await;
        }
        outcome
    }

    fn select_active_academy(&self, academy_id: AcademyId) -> ClientResult<()> {
        self.active
            .select(academy_id, &self.session.snapshot().memberships)
    }

    fn active_academy(&self) -> Option<AcademyId> {
        self.active.resolve(&self.session.snapshot())
    }

    fn pending_requests(&self) -> Vec<AcademyMembership> {
        self.session.snapshot().pending_requests()
    }

    fn approved_memberships(&self) -> Vec<AcademyMembership> {
        self.session.snapshot().approved_memberships()
    }

    fn directory(&self) -> Option<DirectoryResult> {
        self.cache().last_result.clone()
    }
}
