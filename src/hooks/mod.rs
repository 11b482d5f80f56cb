//! Data hooks: observable, role-scoped views over REST collections.
//!
//! Every hook publishes its state through a `watch` channel. Loads are
//! cancel-and-replace: each `load()` takes a generation number and only the
//! newest generation may write state, so a slow response to an old filter
//! never overwrites a newer one. A disposed hook ignores results that arrive
//! after disposal.
//!
//! Failures are kept in the hook's `error` field and shown as a toast, except
//! authorization failures, which expire the session instead.

mod collection;
mod dashboard;
mod profile;
mod resources;
mod settings;

pub use collection::{Classes, Collection, CollectionHook, MutableCollection, Students};
pub use dashboard::{DashboardData, load_dashboard};
pub use profile::{ProfileHook, ProfileState};
pub use resources::{ResourceHook, Resources, StudentScope};
pub use settings::{AcademyScope, PlatformScope, SettingsHook, SettingsScope, SettingsState};

use scholaris_core::{ClientError, ListParams, PaginationMeta};
use scholaris_models::Role;

use crate::api::ApiClient;
use crate::membership::ActiveAcademy;
use crate::session::SessionStore;
use crate::toast::ToastNotifier;

/// What every hook needs from the application.
#[derive(Debug, Clone)]
pub struct HookContext {
    pub api: ApiClient,
    pub session: SessionStore,
    pub toasts: ToastNotifier,
    pub active: ActiveAcademy,
}

impl HookContext {
    /// Toasts `error`, or expires the session when it is an authorization failure.
    pub fn report(&self, error: &ClientError) {
        if error.is_authorization() {
            self.session.expire();
        } else {
            self.toasts.notify_error(error);
        }
    }

    /// Narrows `params` to the academy the current user works in.
    ///
    /// Teachers and students see their active academy and owners their own;
    /// super admins keep whatever filter they chose. `None` means the user
    /// has no academy to show yet.
    pub fn scope(&self, mut params: ListParams) -> Option<ListParams> {
        let session = self.session.snapshot();
        match session.role {
            Some(Role::Teacher | Role::Student) => {
                params.academy_id = Some(self.active.resolve(&session)?.into_inner());
            }
            Some(Role::AcademyOwner) => {
                let owned = session.user.as_ref().and_then(|u| u.owned_academy())?;
                params.academy_id = Some(owned.into_inner());
            }
            Some(Role::SuperAdmin) | None => {}
        }
        Some(params)
    }
}

/// Observable state of a collection hook.
#[derive(Debug, Clone, PartialEq)]
pub struct HookState<T> {
    pub data: Vec<T>,
    pub meta: Option<PaginationMeta>,
    pub loading: bool,
    pub error: Option<ClientError>,
}

impl<T> Default for HookState<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            meta: None,
            loading: false,
            error: None,
        }
    }
}
