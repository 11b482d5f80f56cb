//! # Scholaris
//!
//! Client core of the Scholaris education dashboard: who is signed in, where
//! they may go, and how they join academies and work with classes and
//! resources. Academy owners, teachers, students and super admins share the
//! same core; the REST API remains the authority on every rule.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── api/          # Transport seam, reqwest and in-memory transports, typed client
//! ├── session/      # Session store and derived authorization state
//! ├── guard.rs      # Route guard and role home table
//! ├── toast.rs      # Toast notifier
//! ├── membership/   # Membership workflow and active academy selection
//! ├── hooks/        # Role-scoped data hooks for classes, resources, settings, profile
//! ├── state.rs      # Application wiring
//! └── cli/          # The `scholaris` command
//! ```
//!
//! Control flow: the route guard reads the session store, pages call data
//! hooks, hooks call the API and report outcomes through the toast notifier,
//! and mutations that change memberships refresh the session.
//!
//! ## Roles
//!
//! | Role | Home | Scope of data hooks |
//! |------|------|---------------------|
//! | Super admin | `/super-admin/dashboard` | any academy, by filter |
//! | Academy owner | `/academy/dashboard` | the academy they own |
//! | Teacher | `/teacher/dashboard` | the active approved academy |
//! | Student | `/student/dashboard` | the active approved academy |
//!
//! ## Quick Start
//!
//! ```bash
//! SCHOLARIS_API_URL=https://api.example.com/api
//! LOG_LEVEL=debug
//! ```
//!
//! ```ignore
//! let state = AppState::from_config(ClientConfig::from_env())?;
//! state.boot().await;
//! let decision = RouteGuard::navigate(&state.session.snapshot(), None, "/");
//! ```

pub mod api;
pub mod cli;
pub mod guard;
pub mod hooks;
pub mod membership;
pub mod session;
pub mod state;
pub mod toast;

// Re-export workspace crates for convenience
pub use scholaris_auth;
pub use scholaris_config;
pub use scholaris_core;
pub use scholaris_models;

pub use state::AppState;
