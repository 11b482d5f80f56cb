//! Strongly-typed ID newtypes for domain entities.
//!
//! Each entity gets its own wrapper around `Uuid`, so a `MembershipId` can
//! never be passed where an `AcademyId` is expected.
//!
//! ```ignore
//! use scholaris_models::ids::{AcademyId, MembershipId};
//!
//! fn withdraw(id: MembershipId) { /* ... */ }
//!
//! let academy = AcademyId::new();
//! // withdraw(academy); // Compile error! Type mismatch.
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Generates a newtype wrapper around `Uuid` with transparent serde support.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new random ID.
            #[inline]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Create an ID from a u128 value (useful for fixtures).
            #[inline]
            pub const fn from_u128(v: u128) -> Self {
                Self(Uuid::from_u128(v))
            }

            /// Get the inner UUID value.
            #[inline]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            #[inline]
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            #[inline]
            fn from(id: $name) -> Uuid {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }
    };
}

define_id!(
    /// Strongly-typed ID for users of any role.
    UserId
);

define_id!(
    /// Strongly-typed ID for academies (tenants).
    AcademyId
);

define_id!(
    /// Strongly-typed ID for membership records.
    MembershipId
);

define_id!(
    /// Strongly-typed ID for classes.
    ClassId
);

define_id!(
    /// Strongly-typed ID for learning resources.
    ResourceId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_serde_is_transparent() {
        let id = AcademyId::from_u128(42);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", Uuid::from_u128(42)));
        let back: AcademyId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_id_debug_names_type() {
        let id = MembershipId::from_u128(1);
        assert!(format!("{:?}", id).starts_with("MembershipId("));
    }

    #[test]
    fn test_id_from_str() {
        let id: ClassId = "00000000-0000-0000-0000-000000000009".parse().unwrap();
        assert_eq!(id, ClassId::from_u128(9));
        assert!("nope".parse::<ClassId>().is_err());
    }
}
