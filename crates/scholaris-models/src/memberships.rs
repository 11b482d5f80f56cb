//! Academy memberships and the academy directory.
//!
//! A membership ties a teacher or student to an academy and moves through an
//! approval lifecycle:
//!
//! ```text
//! request ──▶ PENDING ──approve──▶ APPROVED ──revoke──▶ REVOKED
//!                │                     │
//!                └──reject──▶ REJECTED └──leave──▶ (removed)
//! ```
//!
//! A user has at most one record per academy. Requesting again after a
//! rejection or revocation yields a fresh PENDING record for that academy.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{AcademyId, MembershipId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MembershipStatus {
    Pending,
    Approved,
    Rejected,
    Revoked,
}

impl MembershipStatus {
    /// PENDING and APPROVED records count towards limits and block new requests.
    pub fn is_active(&self) -> bool {
        matches!(self, MembershipStatus::Pending | MembershipStatus::Approved)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipStatus::Pending => "PENDING",
            MembershipStatus::Approved => "APPROVED",
            MembershipStatus::Rejected => "REJECTED",
            MembershipStatus::Revoked => "REVOKED",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademyMembership {
    pub id: MembershipId,
    pub academy_id: AcademyId,
    #[serde(default)]
    pub academy_name: String,
    pub status: MembershipStatus,
    pub requested_at: DateTime<Utc>,
}

/// Read-only projection of an academy as listed in the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryEntry {
    #[serde(alias = "id")]
    pub academy_id: AcademyId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestMembershipDto {
    pub academy_id: AcademyId,
}

/// Collapses a membership list to one record per academy.
///
/// The most recently requested record wins; the result is ordered by
/// `requested_at`, oldest first, so "first approved membership" is stable.
pub fn normalize_memberships(records: Vec<AcademyMembership>) -> Vec<AcademyMembership> {
    let mut latest: HashMap<AcademyId, AcademyMembership> = HashMap::new();
    for record in records {
        match latest.get(&record.academy_id) {
            Some(existing) if existing.requested_at >= record.requested_at => {}
            _ => {
                latest.insert(record.academy_id, record);
            }
        }
    }

    let mut normalized: Vec<_> = latest.into_values().collect();
    normalized.sort_by(|a, b| {
        a.requested_at
            .cmp(&b.requested_at)
            .then_with(|| a.id.cmp(&b.id))
    });
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn membership(id: u128, academy: u128, status: MembershipStatus, day: u32) -> AcademyMembership {
        AcademyMembership {
            id: MembershipId::from_u128(id),
            academy_id: AcademyId::from_u128(academy),
            academy_name: format!("Academy {academy}"),
            status,
            requested_at: Utc.with_ymd_and_hms(2026, 3, day, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_status_serde_uppercase() {
        let json = serde_json::to_string(&MembershipStatus::Approved).unwrap();
        assert_eq!(json, r#""APPROVED""#);
        let status: MembershipStatus = serde_json::from_str(r#""REVOKED""#).unwrap();
        assert_eq!(status, MembershipStatus::Revoked);
    }

    #[test]
    fn test_is_active() {
        assert!(MembershipStatus::Pending.is_active());
        assert!(MembershipStatus::Approved.is_active());
        assert!(!MembershipStatus::Rejected.is_active());
        assert!(!MembershipStatus::Revoked.is_active());
    }

    #[test]
    fn test_normalize_keeps_latest_per_academy() {
        let records = vec![
            membership(1, 10, MembershipStatus::Revoked, 1),
            membership(2, 10, MembershipStatus::Pending, 5),
            membership(3, 20, MembershipStatus::Approved, 2),
        ];
        let normalized = normalize_memberships(records);
        assert_eq!(normalized.len(), 2);
        assert_eq!(normalized[0].id, MembershipId::from_u128(3));
        assert_eq!(normalized[1].id, MembershipId::from_u128(2));
        assert_eq!(normalized[1].status, MembershipStatus::Pending);
    }

    #[test]
    fn test_directory_entry_accepts_id_alias() {
        let json = r#"{"id":"00000000-0000-0000-0000-000000000005","name":"North","createdAt":"2026-01-01T00:00:00Z"}"#;
        let entry: DirectoryEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.academy_id, AcademyId::from_u128(5));
        assert_eq!(entry.description, None);
    }

    #[test]
    fn test_request_dto_serializes_camel_case() {
        let dto = RequestMembershipDto {
            academy_id: AcademyId::from_u128(1),
        };
        let json = serde_json::to_string(&dto).unwrap();
        assert!(json.starts_with(r#"{"academyId":"#));
    }
}
