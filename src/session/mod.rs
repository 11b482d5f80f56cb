//! Who is signed in and what they may see.
//!
//! ```text
//! LOADING ──▶ UNAUTHENTICATED
//!    │
//!    ├──────▶ PENDING_APPROVAL ◀──┐
//!    │                            │ approval revoked
//!    └──────▶ AUTHENTICATED(role) ┘
//!
//! any state ──sign_out──▶ UNAUTHENTICATED
//! ```

mod store;

pub use store::SessionStore;

use scholaris_models::{AcademyMembership, CurrentUser, MembershipStatus, Role, UserId};

/// Coarse authorization state derived from a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Loading,
    Unauthenticated,
    PendingApproval,
    /// Signed in; `None` when the server sent a role this client does not know.
    Authenticated(Option<Role>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: Option<CurrentUser>,
    pub role: Option<Role>,
    pub is_pending: bool,
    pub is_loading: bool,
    /// One record per academy, oldest request first.
    pub memberships: Vec<AcademyMembership>,
}

impl Default for Session {
    fn default() -> Self {
        Self::loading()
    }
}

impl Session {
    pub fn loading() -> Self {
        Self {
            user: None,
            role: None,
            is_pending: false,
            is_loading: true,
            memberships: Vec::new(),
        }
    }

    pub fn unauthenticated() -> Self {
        Self {
            is_loading: false,
            ..Self::loading()
        }
    }

    pub fn authenticated(user: CurrentUser, memberships: Vec<AcademyMembership>) -> Self {
        Self {
            role: user.role(),
            is_pending: user.is_pending,
            is_loading: false,
            memberships,
            user: Some(user),
        }
    }

    pub fn state(&self) -> SessionState {
        if self.is_loading {
            SessionState::Loading
        } else if self.user.is_none() {
            SessionState::Unauthenticated
        } else if self.is_pending {
            SessionState::PendingApproval
        } else {
            SessionState::Authenticated(self.role)
        }
    }

    pub fn is_authenticated(&self) -> bool {
        !self.is_loading && self.user.is_some()
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.user.as_ref().map(|u| u.id)
    }

    pub fn pending_requests(&self) -> Vec<AcademyMembership> {
        self.with_status(MembershipStatus::Pending)
    }

    pub fn approved_memberships(&self) -> Vec<AcademyMembership> {
        self.with_status(MembershipStatus::Approved)
    }

    fn with_status(&self, status: MembershipStatus) -> Vec<AcademyMembership> {
        self.memberships
            .iter()
            .filter(|m| m.status == status)
            .cloned()
            .collect()
    }
}
