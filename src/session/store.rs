use std::sync::Arc;

use scholaris_auth::{Credential, CredentialStore, TokenStatus, token_status};
use scholaris_core::{ClientError, ClientResult};
use scholaris_models::{AcademyMembership, CurrentUser, LoginRequest, Role, normalize_memberships};
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

use super::{Session, SessionState};
use crate::api::ApiClient;

struct SessionInner {
    api: ApiClient,
    credentials: Arc<dyn CredentialStore>,
    tx: watch::Sender<Session>,
}

/// Injectable handle to the current session. Clones share state.
///
/// Every change is published to receivers from [`subscribe`](Self::subscribe);
/// guards and hooks re-evaluate on each one.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<SessionInner>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("state", &self.snapshot().state())
            .finish()
    }
}

impl SessionStore {
    /// A store in the `LOADING` state; call [`restore_session`](Self::restore_session) next.
    pub fn new(api: ApiClient, credentials: Arc<dyn CredentialStore>) -> Self {
        let (tx, _) = watch::channel(Session::loading());
        Self {
            inner: Arc::new(SessionInner {
                api,
                credentials,
                tx,
            }),
        }
    }

    pub fn snapshot(&self) -> Session {
        self.inner.tx.borrow().clone()
    }

    pub fn state(&self) -> SessionState {
        self.inner.tx.borrow().state()
    }

    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.inner.tx.subscribe()
    }

    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    /// The signed-in user, or an authorization error when there is none.
    pub fn require_user(&self) -> ClientResult<CurrentUser> {
        self.inner
            .tx
            .borrow()
            .user
            .clone()
            .ok_or_else(|| ClientError::authorization("You need to sign in to continue"))
    }

    fn replace(&self, session: Session) {
        self.inner.tx.send_replace(session);
    }

    /// Hydrates the session from the persisted credential.
    ///
    /// Never fails: anything that goes wrong leaves an unauthenticated
    /// session. An expired token, or one the server refuses, is evicted.
    #[instrument(skip(self))]
    pub async fn restore_session(&self) -> SessionState {
        self.inner.tx.send_modify(|s| s.is_loading = true);

        let credential = match self.inner.credentials.load() {
            Ok(Some(credential)) => credential,
            Ok(None) => {
                debug!("no stored credential");
                return self.finish_unauthenticated();
            }
            Err(error) => {
                warn!(%error, "stored credential unreadable");
                self.evict_credential();
                return self.finish_unauthenticated();
            }
        };

        if token_status(&credential.access_token) == TokenStatus::Expired {
            info!("stored access token has expired");
            self.evict_credential();
            return self.finish_unauthenticated();
        }

        self.inner.api.set_token(Some(credential.access_token));
        match self.fetch_profile().await {
            Ok((user, memberships)) => {
                let session = Session::authenticated(user, memberships);
                let state = session.state();
                info!(?state, "session restored");
                self.replace(session);
                state
            }
            Err(error) => {
                if error.is_authorization() {
                    info!("stored access token rejected by server");
                    self.evict_credential();
                } else {
                    warn!(%error, "session restore failed");
                }
                self.inner.api.set_token(None);
                self.finish_unauthenticated()
            }
        }
    }

    /// Signs in with email and password and persists the access token.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] before any request when the input
    /// is malformed, otherwise whatever the server answered.
    #[instrument(skip(self, password))]
    pub async fn sign_in(&self, email: &str, password: &str) -> ClientResult<SessionState> {
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        request.validate()?;

        let response = self.inner.api.login(&request).await?;
        self.inner.api.set_token(Some(response.access_token.clone()));
        if let Err(error) = self
            .inner
            .credentials
            .save(&Credential::new(response.access_token))
        {
            warn!(%error, "could not persist credential; session will not survive restart");
        }

        let memberships = match self.fetch_memberships(&response.user).await {
            Ok(memberships) => memberships,
            Err(error) if error.is_authorization() => {
                self.expire();
                return Err(error);
            }
            Err(_) => Vec::new(),
        };

        let session = Session::authenticated(response.user, memberships);
        let state = session.state();
        info!(?state, "signed in");
        self.replace(session);
        Ok(state)
    }

    /// Re-reads the user and memberships from the server.
    ///
    /// # Errors
    ///
    /// Authorization failures also expire the session.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> ClientResult<SessionState> {
        match self.fetch_profile().await {
            Ok((user, memberships)) => {
                let session = Session::authenticated(user, memberships);
                let state = session.state();
                self.replace(session);
                Ok(state)
            }
            Err(error) => {
                if error.is_authorization() {
                    self.expire();
                }
                Err(error)
            }
        }
    }

    /// Ends a session the server no longer accepts. Unlike a failure, this is
    /// not reported to the user; guards redirect to the login page instead.
    pub fn expire(&self) {
        if self.snapshot().user.is_some() {
            info!("session expired");
        }
        self.clear();
    }

    pub fn sign_out(&self) {
        info!("signing out");
        self.clear();
    }

    fn clear(&self) {
        self.replace(Session::unauthenticated());
        self.inner.api.set_token(None);
        self.evict_credential();
    }

    pub fn set_role(&self, role: Option<Role>) {
        self.inner.tx.send_if_modified(|s| {
            let changed = s.role != role;
            s.role = role;
            changed
        });
    }

    pub fn set_pending(&self, pending: bool) {
        self.inner.tx.send_if_modified(|s| {
            let changed = s.is_pending != pending;
            s.is_pending = pending;
            changed
        });
    }

    /// Replaces the membership list, collapsing it to one record per academy.
    pub fn set_memberships(&self, memberships: Vec<AcademyMembership>) {
        let memberships = normalize_memberships(memberships);
        self.inner.tx.send_if_modified(|s| {
            if s.memberships == memberships {
                return false;
            }
            s.memberships = memberships;
            true
        });
    }

    fn finish_unauthenticated(&self) -> SessionState {
        self.replace(Session::unauthenticated());
        SessionState::Unauthenticated
    }

    fn evict_credential(&self) {
        if let Err(error) = self.inner.credentials.clear() {
            warn!(%error, "failed to remove stored credential");
        }
    }

    async fn fetch_profile(&self) -> ClientResult<(CurrentUser, Vec<AcademyMembership>)> {
        let user = self.inner.api.me().await?;
        let memberships = self.fetch_memberships(&user).await?;
        Ok((user, memberships))
    }

    /// Memberships only exist for teachers and students. A failure other than
    /// authorization is logged and treated as "none yet".
    async fn fetch_memberships(&self, user: &CurrentUser) -> ClientResult<Vec<AcademyMembership>> {
        if !user.role().is_some_and(|r| r.holds_memberships()) {
            return Ok(Vec::new());
        }
        match self.inner.api.my_memberships().await {
            Ok(records) => Ok(normalize_memberships(records)),
            Err(error) if error.is_authorization() => Err(error),
            Err(error) => {
                warn!(%error, "could not load memberships");
                Ok(Vec::new())
            }
        }
    }
}
