//! The fixed set of platform roles.
//!
//! Role strings arrive from the API in snake_case (`"academy_owner"`). A string
//! that is not one of the four known roles parses to `None`; callers must treat
//! such users as the most restricted case rather than guessing a role.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    AcademyOwner,
    Teacher,
    Student,
}

/// Role slugs as used on the wire.
pub mod slugs {
    pub const SUPER_ADMIN: &str = "super_admin";
    pub const ACADEMY_OWNER: &str = "academy_owner";
    pub const TEACHER: &str = "teacher";
    pub const STUDENT: &str = "student";
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::SuperAdmin,
        Role::AcademyOwner,
        Role::Teacher,
        Role::Student,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => slugs::SUPER_ADMIN,
            Role::AcademyOwner => slugs::ACADEMY_OWNER,
            Role::Teacher => slugs::TEACHER,
            Role::Student => slugs::STUDENT,
        }
    }

    /// Lenient parse of an API role string; unknown values yield `None`.
    pub fn parse(value: &str) -> Option<Role> {
        value.parse().ok()
    }

    /// Teachers and students join academies through membership requests;
    /// owners and super admins never hold memberships.
    pub fn holds_memberships(&self) -> bool {
        matches!(self, Role::Teacher | Role::Student)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "Super Admin",
            Role::AcademyOwner => "Academy Owner",
            Role::Teacher => "Teacher",
            Role::Student => "Student",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role: {}", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            slugs::SUPER_ADMIN => Ok(Role::SuperAdmin),
            slugs::ACADEMY_OWNER => Ok(Role::AcademyOwner),
            slugs::TEACHER => Ok(Role::Teacher),
            slugs::STUDENT => Ok(Role::Student),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_roles() {
        assert_eq!(Role::parse("super_admin"), Some(Role::SuperAdmin));
        assert_eq!(Role::parse("academy_owner"), Some(Role::AcademyOwner));
        assert_eq!(Role::parse("teacher"), Some(Role::Teacher));
        assert_eq!(Role::parse("student"), Some(Role::Student));
    }

    #[test]
    fn test_parse_is_case_and_separator_insensitive() {
        assert_eq!(Role::parse("SUPER_ADMIN"), Some(Role::SuperAdmin));
        assert_eq!(Role::parse("Academy-Owner"), Some(Role::AcademyOwner));
        assert_eq!(Role::parse(" Teacher "), Some(Role::Teacher));
    }

    #[test]
    fn test_parse_unknown_role() {
        assert_eq!(Role::parse("none"), None);
        assert_eq!(Role::parse(""), None);
        assert_eq!(Role::parse("admin"), None);
    }

    #[test]
    fn test_round_trip_through_as_str() {
        for role in Role::ALL {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
    }

    #[test]
    fn test_serde_snake_case() {
        assert_eq!(
            serde_json::to_string(&Role::AcademyOwner).unwrap(),
            r#""academy_owner""#
        );
    }

    #[test]
    fn test_holds_memberships() {
        assert!(Role::Teacher.holds_memberships());
        assert!(Role::Student.holds_memberships());
        assert!(!Role::AcademyOwner.holds_memberships());
        assert!(!Role::SuperAdmin.holds_memberships());
    }
}
