//! User models and DTOs.
//!
//! # Core Types
//!
//! - [`CurrentUser`] - The signed-in user as returned by `GET /users/me`
//! - [`Student`] - A row of `GET /users/students`
//!
//! # Request DTOs
//!
//! - [`LoginRequest`] - Credentials for `POST /auth/login`
//! - [`UpdateProfileDto`] - Body of `PATCH /users/me`
//! - [`PhotoUpload`] - Multipart payload of `PATCH /users/me/photo`

use scholaris_core::serde::{deserialize_null_default, deserialize_optional_uuid};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::ids::{AcademyId, ClassId, UserId};
use crate::roles::Role;

/// The authenticated user.
///
/// `role` is kept as the raw string so that an unrecognised value survives
/// deserialization and is handled by the caller as "no known role".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub id: UserId,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub role: String,
    /// Approval is still outstanding for this account.
    #[serde(default, alias = "pending")]
    pub is_pending: bool,
    /// The academy an owner runs; `None` for every other role.
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub academy_id: Option<Uuid>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

impl CurrentUser {
    pub fn role(&self) -> Option<Role> {
        Role::parse(&self.role)
    }

    pub fn owned_academy(&self) -> Option<AcademyId> {
        self.academy_id.map(AcademyId::from)
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(alias = "access_token", alias = "token")]
    pub access_token: String,
    pub user: CurrentUser,
}

/// Profile edits. Names are required by the backend, so they are checked
/// before the request is sent.
#[derive(Debug, Clone, Default, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileDto {
    #[validate(length(
        min = 1,
        max = 100,
        message = "First name must be between 1 and 100 characters"
    ))]
    pub first_name: String,
    #[validate(length(
        min = 1,
        max = 100,
        message = "Last name must be between 1 and 100 characters"
    ))]
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 7, max = 20, message = "Phone number must be 7 to 20 characters"))]
    pub phone: Option<String>,
}

impl UpdateProfileDto {
    /// Trims text fields so whitespace-only names fail validation.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.first_name = self.first_name.trim().to_string();
        self.last_name = self.last_name.trim().to_string();
        self.phone = self
            .phone
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());
        self
    }
}

pub const MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;
pub const PHOTO_CONTENT_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

/// A profile photo waiting to be uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl PhotoUpload {
    /// Checks size and type before any bytes leave the client.
    pub fn check(&self) -> Result<(), String> {
        if self.bytes.is_empty() {
            return Err("Photo file is empty".to_string());
        }
        if self.bytes.len() > MAX_PHOTO_BYTES {
            return Err("Photo must be 5 MB or smaller".to_string());
        }
        if !PHOTO_CONTENT_TYPES.contains(&self.content_type.as_str()) {
            return Err("Photo must be a JPEG, PNG or WebP image".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: UserId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub email: String,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub class_ids: Vec<ClassId>,
}
