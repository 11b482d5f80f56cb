//! Academy-level and platform-level settings.

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademySettings {
    pub academy_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default = "default_true")]
    pub accept_join_requests: bool,
    #[serde(default)]
    pub contact_email: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAcademySettingsDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(
        min = 1,
        max = 100,
        message = "Academy name must be between 1 and 100 characters"
    ))]
    pub academy_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 1000, message = "Description must not exceed 1000 characters"))]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(url(message = "Logo must be a valid URL"))]
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accept_join_requests: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Contact email must be a valid email address"))]
    pub contact_email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformSettings {
    pub platform_name: String,
    #[serde(default)]
    pub maintenance_mode: bool,
    /// Server-side cap on academies per teacher.
    pub teacher_limit: u32,
    /// Server-side cap on academies per student.
    pub student_limit: u32,
    #[serde(default)]
    pub support_email: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlatformSettingsDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 100, message = "Platform name must be between 1 and 100 characters"))]
    pub platform_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 50, message = "Teacher limit must be between 1 and 50"))]
    pub teacher_limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 50, message = "Student limit must be between 1 and 50"))]
    pub student_limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Support email must be a valid email address"))]
    pub support_email: Option<String>,
}

fn default_true() -> bool {
    true
}
