//! Academy membership caps.
//!
//! Teachers and students may belong to a bounded number of academies at once.
//! The server enforces the cap; the client repeats the check so it can answer
//! without a round trip, and always defers to the server when the two disagree.
//!
//! - `SCHOLARIS_TEACHER_ACADEMY_LIMIT`: Maximum academies per teacher (default: 3)
//! - `SCHOLARIS_STUDENT_ACADEMY_LIMIT`: Maximum academies per student (default: 5)
//! - `SCHOLARIS_CLIENT_LIMIT_CHECK`: Run the local pre-check at all (default: true)

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MembershipLimitConfig {
    pub teacher_limit: u32,
    pub student_limit: u32,
    /// When false, limit enforcement is left entirely to the server.
    pub client_check: bool,
}

impl Default for MembershipLimitConfig {
    fn default() -> Self {
        Self {
            teacher_limit: 3,
            student_limit: 5,
            client_check: true,
        }
    }
}

impl MembershipLimitConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_source(&crate::env_source)
    }

    pub fn from_source(source: &dyn Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            teacher_limit: crate::parsed(
                source,
                "SCHOLARIS_TEACHER_ACADEMY_LIMIT",
                defaults.teacher_limit,
            ),
            student_limit: crate::parsed(
                source,
                "SCHOLARIS_STUDENT_ACADEMY_LIMIT",
                defaults.student_limit,
            ),
            client_check: crate::flag(source, "SCHOLARIS_CLIENT_LIMIT_CHECK", defaults.client_check),
        }
    }
}
