//! Typed access to the REST API.

use std::sync::{Arc, PoisonError, RwLock};

use scholaris_core::{ClientError, ClientResult, ListParams, Paginated};
use scholaris_models::{
    AcademyId, AcademyMembership, AcademySettings, Class, CurrentUser, DirectoryEntry,
    LoginRequest, LoginResponse, MembershipId, PhotoUpload, PlatformSettings, Resource,
    Student, UpdateAcademySettingsDto, UpdatePlatformSettingsDto, UpdateProfileDto,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::transport::{ApiRequest, FilePart, RequestBody, Transport};

pub mod paths {
    pub const LOGIN: &str = "/auth/login";
    pub const ME: &str = "/users/me";
    pub const ME_PHOTO: &str = "/users/me/photo";
    pub const STUDENTS: &str = "/users/students";
    pub const DIRECTORY: &str = "/academies/directory";
    pub const MEMBERSHIPS: &str = "/memberships";
    pub const MY_MEMBERSHIPS: &str = "/memberships/me";
    pub const CLASSES: &str = "/classes";
    pub const RESOURCES: &str = "/resources";
    pub const ACADEMY_SETTINGS: &str = "/academy-settings";
    pub const PLATFORM_SETTINGS: &str = "/platform-settings";
}

/// Either a bare JSON array or a `{ "data": [...] }` envelope.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum ListBody<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl<T> ListBody<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            ListBody::Bare(items) | ListBody::Wrapped { data: items } => items,
        }
    }
}

/// Cheaply cloneable client; clones share the transport and the bearer token.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    token: Arc<RwLock<Option<String>>>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("authenticated", &self.token().is_some())
            .finish()
    }
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            token: Arc::new(RwLock::new(None)),
        }
    }

    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_token(&self, token: Option<String>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = token;
    }

    async fn execute(&self, request: ApiRequest) -> ClientResult<String> {
        let response = self
            .transport
            .send(request.with_bearer(self.token()))
            .await?;
        if response.is_success() {
            Ok(response.body)
        } else {
            Err(ClientError::from_status(response.status, &response.body))
        }
    }

    async fn execute_json<T: DeserializeOwned>(&self, request: ApiRequest) -> ClientResult<T> {
        let body = self.execute(request).await?;
        Ok(serde_json::from_str(&body)?)
    }

    // Generic endpoints

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.execute_json(ApiRequest::get(path)).await
    }

    pub async fn list<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &ListParams,
    ) -> ClientResult<Paginated<T>> {
        self.execute_json(ApiRequest::get(path).with_query(params.to_query()))
            .await
    }

    pub async fn create<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute_json(ApiRequest::post(path, encode(body)?)).await
    }

    pub async fn update<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute_json(ApiRequest::patch(path, encode(body)?)).await
    }

    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        self.execute(ApiRequest::delete(path)).await.map(|_| ())
    }

    // Auth and profile

    pub async fn login(&self, credentials: &LoginRequest) -> ClientResult<LoginResponse> {
        self.create(paths::LOGIN, credentials).await
    }

    pub async fn me(&self) -> ClientResult<CurrentUser> {
        self.get(paths::ME).await
    }

    pub async fn update_profile(&self, dto: &UpdateProfileDto) -> ClientResult<CurrentUser> {
        self.update(paths::ME, dto).await
    }

    pub async fn upload_photo(&self, photo: &PhotoUpload) -> ClientResult<CurrentUser> {
        let part = FilePart {
            field: "photo".to_string(),
            file_name: photo.file_name.clone(),
            content_type: photo.content_type.clone(),
            bytes: photo.bytes.clone(),
        };
        let request = ApiRequest::new(reqwest::Method::PATCH, paths::ME_PHOTO)
            .with_body(RequestBody::Multipart(part));
        self.execute_json(request).await
    }

    pub async fn students(&self, params: &ListParams) -> ClientResult<Paginated<Student>> {
        self.list(paths::STUDENTS, params).await
    }

    // Directory and memberships

    pub async fn directory(&self, params: &ListParams) -> ClientResult<Paginated<DirectoryEntry>> {
        self.list(paths::DIRECTORY, params).await
    }

    pub async fn my_memberships(&self) -> ClientResult<Vec<AcademyMembership>> {
        let body: ListBody<AcademyMembership> =
            self.get(paths::MY_MEMBERSHIPS).await?;
        Ok(body.into_vec())
    }

    pub async fn request_membership(&self, academy_id: AcademyId) -> ClientResult<AcademyMembership> {
        let dto = scholaris_models::RequestMembershipDto { academy_id };
        self.create(paths::MEMBERSHIPS, &dto).await
    }

    pub async fn withdraw_membership(&self, membership_id: MembershipId) -> ClientResult<()> {
        self.delete(&format!("{}/{}", paths::MEMBERSHIPS, membership_id))
            .await
    }

    // Classes and resources

    pub async fn classes(&self, params: &ListParams) -> ClientResult<Paginated<Class>> {
        self.list(paths::CLASSES, params).await
    }

    pub async fn resources(&self, params: &ListParams) -> ClientResult<Paginated<Resource>> {
        self.list(paths::RESOURCES, params).await
    }

    // Settings

    pub async fn academy_settings(&self) -> ClientResult<AcademySettings> {
        self.get(paths::ACADEMY_SETTINGS).await
    }

    pub async fn update_academy_settings(
        &self,
        dto: &UpdateAcademySettingsDto,
    ) -> ClientResult<AcademySettings> {
        self.update(paths::ACADEMY_SETTINGS, dto).await
    }

    pub async fn platform_settings(&self) -> ClientResult<PlatformSettings> {
        self.get(paths::PLATFORM_SETTINGS).await
    }

    pub async fn update_platform_settings(
        &self,
        dto: &UpdatePlatformSettingsDto,
    ) -> ClientResult<PlatformSettings> {
        self.update(paths::PLATFORM_SETTINGS, dto).await
    }
}

fn encode<B: Serialize + ?Sized>(body: &B) -> ClientResult<Value> {
    serde_json::to_value(body)
        .map_err(|e| ClientError::validation(format!("Could not encode request: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MemoryTransport;
    use reqwest::Method;
    use serde_json::json;

    fn client() -> (Arc<MemoryTransport>, ApiClient) {
        let transport = Arc::new(MemoryTransport::new());
        let client = ApiClient::new(transport.clone());
        (transport, client)
    }

    #[tokio::test]
    async fn test_bearer_token_attached() {
        let (transport, client) = client();
        transport.respond(
            Method::GET,
            paths::ME,
            200,
            json!({ "id": "00000000-0000-0000-0000-000000000001", "email": "a@b.co", "role": "teacher" }),
        );

        client.set_token(Some("tok".into()));
        let user = client.me().await.unwrap();
        assert_eq!(user.email, "a@b.co");
        assert_eq!(
            transport.requests_to(Method::GET, paths::ME)[0].bearer.as_deref(),
            Some("tok")
        );
    }

    #[tokio::test]
    async fn test_error_status_mapped() {
        let (transport, client) = client();
        transport.respond(Method::GET, paths::ME, 401, json!({ "error": "Token expired" }));
        let err = client.me().await.unwrap_err();
        assert_eq!(err, ClientError::authorization("Token expired"));
    }

    #[tokio::test]
    async fn test_list_sends_query_and_decodes_envelope() {
        let (transport, client) = client();
        transport.respond(
            Method::GET,
            paths::DIRECTORY,
            200,
            json!({
                "data": [{ "academyId": "00000000-0000-0000-0000-000000000009", "name": "North", "createdAt": "2026-01-01T00:00:00Z" }],
                "meta": { "currentPage": 1, "totalPages": 1, "total": 1, "count": 1 }
            }),
        );

        let page = client
            .directory(&ListParams::new().search("north").limit(5))
            .await
            .unwrap();
        assert_eq!(page.data[0].name, "North");

        let sent = &transport.requests_to(Method::GET, paths::DIRECTORY)[0];
        assert_eq!(sent.query_value("search"), Some("north"));
        assert_eq!(sent.query_value("limit"), Some("5"));
    }

    #[tokio::test]
    async fn test_my_memberships_accepts_bare_and_wrapped() {
        let (transport, client) = client();
        let record = json!({
            "id": "00000000-0000-0000-0000-000000000001",
            "academyId": "00000000-0000-0000-0000-000000000002",
            "academyName": "North",
            "status": "PENDING",
            "requestedAt": "2026-01-01T00:00:00Z"
        });
        transport.enqueue(Method::GET, paths::MY_MEMBERSHIPS, 200, json!([record.clone()]));
        transport.enqueue(Method::GET, paths::MY_MEMBERSHIPS, 200, json!({ "data": [record] }));

        assert_eq!(client.my_memberships().await.unwrap().len(), 1);
        assert_eq!(client.my_memberships().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_photo_upload_is_multipart() {
        let (transport, client) = client();
        transport.respond(
            Method::PATCH,
            paths::ME_PHOTO,
            200,
            json!({ "id": "00000000-0000-0000-0000-000000000001", "email": "a@b.co", "photoUrl": "https://cdn/x.png" }),
        );
        let photo = PhotoUpload {
            file_name: "me.png".into(),
            content_type: "image/png".into(),
            bytes: vec![1, 2, 3],
        };

        let user = client.upload_photo(&photo).await.unwrap();
        assert_eq!(user.photo_url.as_deref(), Some("https://cdn/x.png"));

        let sent = &transport.requests_to(Method::PATCH, paths::ME_PHOTO)[0];
        match &sent.body {
            RequestBody::Multipart(part) => {
                assert_eq!(part.field, "photo");
                assert_eq!(part.bytes, vec![1, 2, 3]);
            }
            other => panic!("expected multipart body, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_delete_ignores_empty_body() {
        let (transport, client) = client();
        let id = MembershipId::from_u128(4);
        transport.respond(Method::DELETE, &format!("/memberships/{id}"), 204, Value::Null);
        client.withdraw_membership(id).await.unwrap();
    }
}
