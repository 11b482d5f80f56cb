//! Per-navigation access decisions.
//!
//! [`RouteGuard::evaluate`] applies, in order:
//!
//! 1. session still loading: [`GuardDecision::Loading`]
//! 2. nobody signed in: redirect to `/login`, remembering the requested path
//! 3. approval pending: render the pending-approval view in place
//! 4. wrong role: redirect to the home of the role the user actually has
//! 5. otherwise render the requested page
//!
//! [`RouteGuard::landing_redirect`] is a convenience on top: signed-in users
//! who open `/`, the auth pages or a marketing page go straight to their
//! dashboard. It only runs once `evaluate` has decided to render.

use scholaris_models::Role;

use crate::session::{Session, SessionState};

pub const LOGIN_ROUTE: &str = "/login";
pub const REGISTER_ROUTE: &str = "/register";
pub const GENERIC_DASHBOARD_ROUTE: &str = "/dashboard";

/// Public pages that need no session.
pub const MARKETING_ROUTES: [&str; 4] = ["/about", "/features", "/pricing", "/contact"];

/// Dashboard home for each role; an unknown role can only sign in again.
pub fn home_route(role: Option<Role>) -> &'static str {
    match role {
        Some(Role::SuperAdmin) => "/super-admin/dashboard",
        Some(Role::AcademyOwner) => "/academy/dashboard",
        Some(Role::Teacher) => "/teacher/dashboard",
        Some(Role::Student) => "/student/dashboard",
        None => LOGIN_ROUTE,
    }
}

/// The role a role-specific section requires, judged by its path prefix.
pub fn required_role_for(path: &str) -> Option<Role> {
    let path = strip_query(path);
    [
        ("/super-admin", Role::SuperAdmin),
        ("/academy", Role::AcademyOwner),
        ("/teacher", Role::Teacher),
        ("/student", Role::Student),
    ]
    .into_iter()
    .find(|(prefix, _)| {
        path == *prefix
            || path
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with('/'))
    })
    .map(|(_, role)| role)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderTarget {
    Requested,
    PendingApproval,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Show a placeholder; do not navigate.
    Loading,
    Redirect {
        to: String,
        /// Where to go after signing in.
        return_to: Option<String>,
    },
    Render(RenderTarget),
}

impl GuardDecision {
    fn redirect(to: &str) -> Self {
        GuardDecision::Redirect {
            to: to.to_string(),
            return_to: None,
        }
    }
}

pub struct RouteGuard;

impl RouteGuard {
    pub fn evaluate(session: &Session, required: Option<Role>, requested: &str) -> GuardDecision {
        match session.state() {
            SessionState::Loading => GuardDecision::Loading,
            SessionState::Unauthenticated => GuardDecision::Redirect {
                to: LOGIN_ROUTE.to_string(),
                return_to: is_internal(requested)
                    .then(|| requested.to_string())
                    .filter(|path| !is_login(path)),
            },
            SessionState::PendingApproval => GuardDecision::Render(RenderTarget::PendingApproval),
            SessionState::Authenticated(role) => match required {
                Some(required) if role != Some(required) => {
                    tracing::debug!(
                        requested,
                        required = %required,
                        actual = ?role,
                        "role mismatch"
                    );
                    GuardDecision::redirect(home_route(role))
                }
                _ => GuardDecision::Render(RenderTarget::Requested),
            },
        }
    }

    /// Dashboard shortcut for landing pages.
    ///
    /// Returns `None` unless the session is loaded, signed in and approved.
    /// Users whose role is unknown are sent to the generic dashboard.
    pub fn landing_redirect(session: &Session, path: &str) -> Option<String> {
        let SessionState::Authenticated(role) = session.state() else {
            return None;
        };
        let path = strip_query(path);
        let is_landing = path == "/"
            || path == LOGIN_ROUTE
            || path == REGISTER_ROUTE
            || path == GENERIC_DASHBOARD_ROUTE
            || MARKETING_ROUTES.contains(&path);
        if !is_landing {
            return None;
        }

        let target = match role {
            Some(role) => home_route(Some(role)),
            None => GENERIC_DASHBOARD_ROUTE,
        };
        (target != path).then(|| target.to_string())
    }

    /// [`evaluate`](Self::evaluate) followed by
    /// [`landing_redirect`](Self::landing_redirect) when the page would render.
    pub fn navigate(session: &Session, required: Option<Role>, requested: &str) -> GuardDecision {
        match Self::evaluate(session, required, requested) {
            GuardDecision::Render(RenderTarget::Requested) => {
                match Self::landing_redirect(session, requested) {
                    Some(to) => GuardDecision::Redirect {
                        to,
                        return_to: None,
                    },
                    None => GuardDecision::Render(RenderTarget::Requested),
                }
            }
            decision => decision,
        }
    }

    /// Where to go right after signing in.
    ///
    /// The remembered location wins when it is an internal path other than
    /// the login page; anything else falls back to the role's home.
    pub fn post_login_target(return_to: Option<&str>, role: Option<Role>) -> String {
        match return_to {
            Some(path) if is_internal(path) && !is_login(path) => path.to_string(),
            _ => home_route(role).to_string(),
        }
    }
}

fn strip_query(path: &str) -> &str {
    path.split(['?', '#']).next().unwrap_or(path)
}

fn is_internal(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//") && !path.contains('\\')
}

fn is_login(path: &str) -> bool {
    strip_query(path) == LOGIN_ROUTE
}
