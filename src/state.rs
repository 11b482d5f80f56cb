use std::sync::Arc;

use scholaris_auth::{CredentialStore, FileCredentialStore};
use scholaris_config::ClientConfig;
use scholaris_core::ClientResult;

use crate::api::{ApiClient, HttpTransport, Transport};
use crate::hooks::HookContext;
use crate::membership::{ActiveAcademy, RemoteMembershipWorkflow};
use crate::session::SessionStore;
use crate::toast::ToastNotifier;

/// Everything a screen needs, wired together once at start-up.
#[derive(Clone, Debug)]
pub struct AppState {
    pub config: ClientConfig,
    pub api: ApiClient,
    pub session: SessionStore,
    pub toasts: ToastNotifier,
    pub active_academy: ActiveAcademy,
    pub memberships: Arc<RemoteMembershipWorkflow>,
}

impl AppState {
    pub fn new(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
        credentials: Arc<dyn CredentialStore>,
    ) -> Self {
        let api = ApiClient::new(transport);
        let session = SessionStore::new(api.clone(), credentials);
        let toasts = ToastNotifier::new(config.toast.clone());
        let active_academy = ActiveAcademy::new();
        let memberships = Arc::new(RemoteMembershipWorkflow::new(
            api.clone(),
            session.clone(),
            toasts.clone(),
            active_academy.clone(),
            config.limits.clone(),
        ));

        Self {
            config,
            api,
            session,
            toasts,
            active_academy,
            memberships,
        }
    }

    /// Production wiring: HTTP transport and the credential file.
    ///
    /// # Errors
    ///
    /// Fails when the HTTP client cannot be built.
    pub fn from_config(config: ClientConfig) -> ClientResult<Self> {
        let transport = Arc::new(HttpTransport::new(config.api.clone())?);
        let credentials = Arc::new(FileCredentialStore::new(config.credentials.path.clone()));
        Ok(Self::new(config, transport, credentials))
    }

    /// Restores the session and settles the active academy.
    pub async fn boot(&self) -> crate::session::SessionState {
        let state = self.session.restore_session().await;
        self.active_academy
            .revalidate(&self.session.snapshot().memberships);
        state
    }

    pub fn hook_context(&self) -> HookContext {
        HookContext {
            api: self.api.clone(),
            session: self.session.clone(),
            toasts: self.toasts.clone(),
            active: self.active_academy.clone(),
        }
    }
}
