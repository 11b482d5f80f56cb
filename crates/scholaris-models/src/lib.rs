//! # Scholaris Models
//!
//! Domain models and DTOs exchanged with the Scholaris REST API.
//!
//! # Modules
//!
//! - [`classes`]: Classes and their create/update DTOs
//! - [`ids`]: Strongly-typed entity ids
//! - [`memberships`]: Academy memberships and the academy directory
//! - [`resources`]: Learning resources and their visibility
//! - [`roles`]: The fixed platform roles
//! - [`settings`]: Academy and platform settings
//! - [`users`]: The signed-in user, students, and profile DTOs
//!
//! Wire payloads are camelCase; DTOs carry `validator` rules so bad input is
//! rejected before a request is made.

pub mod classes;
pub mod ids;
pub mod memberships;
pub mod resources;
pub mod roles;
pub mod settings;
pub mod users;

// Re-export commonly used types at crate root for convenience
pub use classes::{Class, CreateClassDto, UpdateClassDto};
pub use ids::{AcademyId, ClassId, MembershipId, ResourceId, UserId};
pub use memberships::{
    AcademyMembership, DirectoryEntry, MembershipStatus, RequestMembershipDto,
    normalize_memberships,
};
pub use resources::{CreateResourceDto, Resource, UpdateResourceDto, Visibility};
pub use roles::Role;
pub use settings::{
    AcademySettings, PlatformSettings, UpdateAcademySettingsDto, UpdatePlatformSettingsDto,
};
pub use users::{CurrentUser, LoginRequest, LoginResponse, PhotoUpload, Student, UpdateProfileDto};
