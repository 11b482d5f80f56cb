#![allow(dead_code)]

use std::sync::Arc;

use chrono::{Duration as ChronoDuration, TimeZone, Utc};
use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};
use jsonwebtoken::{EncodingKey, Header, encode};
use reqwest::Method;
use scholaris::AppState;
use scholaris::api::{MemoryTransport, paths};
use scholaris::hooks::HookContext;
use scholaris::scholaris_auth::{AccessClaims, Credential, CredentialStore, MemoryCredentialStore};
use scholaris::scholaris_config::ClientConfig;
use scholaris::scholaris_models::{
    AcademyId, ClassId, MembershipId, MembershipStatus, ResourceId, UserId, Visibility,
};
use serde_json::{Value, json};

pub struct TestApp {
    pub state: AppState,
    pub transport: Arc<MemoryTransport>,
    pub credentials: Arc<MemoryCredentialStore>,
}

impl TestApp {
    pub fn hooks(&self) -> HookContext {
        self.state.hook_context()
    }
}

pub fn test_app() -> TestApp {
    test_app_with(ClientConfig::default())
}

pub fn test_app_with(config: ClientConfig) -> TestApp {
    let transport = Arc::new(MemoryTransport::new());
    let credentials = Arc::new(MemoryCredentialStore::new());
    let state = AppState::new(config, transport.clone(), credentials.clone());
    TestApp {
        state,
        transport,
        credentials,
    }
}

/// A token whose `exp` is `secs` from now (negative for an expired one).
pub fn token_expiring_in(secs: i64) -> String {
    let now = Utc::now();
    let claims = AccessClaims {
        sub: UserId::new().to_string(),
        exp: (now + ChronoDuration::seconds(secs)).timestamp(),
        iat: Some(now.timestamp()),
        email: Some(SafeEmail().fake()),
        role: None,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"only-the-server-knows"),
    )
    .unwrap()
}

pub fn valid_token() -> String {
    token_expiring_in(3600)
}

pub fn user_json(id: UserId, role: &str, pending: bool, academy: Option<AcademyId>) -> Value {
    let first: String = FirstName().fake();
    let last: String = LastName().fake();
    let email: String = SafeEmail().fake();
    json!({
        "id": id,
        "email": email,
        "firstName": first,
        "lastName": last,
        "role": role,
        "isPending": pending,
        "academyId": academy,
    })
}

pub fn membership_json(id: u128, academy: u128, status: MembershipStatus, day: u32) -> Value {
    json!({
        "id": MembershipId::from_u128(id),
        "academyId": AcademyId::from_u128(academy),
        "academyName": format!("Academy {academy}"),
        "status": status,
        "requestedAt": Utc.with_ymd_and_hms(2026, 5, day, 10, 0, 0).unwrap(),
    })
}

pub fn directory_entry_json(academy: u128, name: &str) -> Value {
    json!({
        "academyId": AcademyId::from_u128(academy),
        "name": name,
        "description": format!("{name} academy"),
        "createdAt": "2026-01-10T00:00:00Z",
    })
}

pub fn class_json(id: u128, academy: AcademyId, teacher: Option<UserId>, students: &[UserId]) -> Value {
    json!({
        "id": ClassId::from_u128(id),
        "academyId": academy,
        "name": format!("Class {id}"),
        "teacherId": teacher,
        "studentIds": students,
        "createdAt": "2026-02-01T00:00:00Z",
    })
}

pub fn resource_json(
    id: u128,
    academy: AcademyId,
    visibility: Visibility,
    class: Option<ClassId>,
    uploader: UserId,
) -> Value {
    json!({
        "id": ResourceId::from_u128(id),
        "academyId": academy,
        "title": format!("Resource {id}"),
        "visibility": visibility,
        "classId": class,
        "uploaderId": uploader,
        "createdAt": "2026-02-02T00:00:00Z",
    })
}

pub fn student_json(id: UserId) -> Value {
    let first: String = FirstName().fake();
    let email: String = SafeEmail().fake();
    json!({ "id": id, "firstName": first, "lastName": "Learner", "email": email, "classIds": [] })
}

/// Wraps `data` in the list envelope as a single page.
pub fn page_json(data: Vec<Value>) -> Value {
    let count = data.len();
    json!({
        "data": data,
        "meta": {
            "currentPage": 1,
            "totalPages": 1,
            "previousPage": null,
            "nextPage": null,
            "total": count,
            "count": count,
        }
    })
}

/// Scripts `/users/me` and `/memberships/me`, stores a valid token and boots.
pub async fn sign_in_as(
    app: &TestApp,
    role: &str,
    academy: Option<AcademyId>,
    memberships: Vec<Value>,
) -> UserId {
    let id = UserId::new();
    app.transport
        .respond(Method::GET, paths::ME, 200, user_json(id, role, false, academy));
    app.transport
        .respond(Method::GET, paths::MY_MEMBERSHIPS, 200, json!(memberships));
    app.credentials
        .save(&Credential::new(valid_token()))
        .unwrap();
    app.state.boot().await;
    app.transport.clear_journal();
    id
}

/// The academy most tests scope to.
pub const ACADEMY: AcademyId = AcademyId::from_u128(500);

pub fn approved_at(academy: AcademyId) -> Value {
    json!({
        "id": MembershipId::new(),
        "academyId": academy,
        "academyName": "Home Academy",
        "status": "APPROVED",
        "requestedAt": "2026-01-01T00:00:00Z",
    })
}
