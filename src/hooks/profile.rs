use scholaris_core::{ClientError, ClientResult};
use scholaris_models::{CurrentUser, PhotoUpload, UpdateProfileDto};
use tokio::sync::watch;
use tracing::{debug, instrument, warn};
use validator::Validate;

use super::HookContext;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileState {
    pub saving: bool,
    pub error: Option<ClientError>,
}

/// Edits the signed-in user's profile and photo.
///
/// Required fields are checked before anything is sent; a successful save
/// refreshes the session so every view sees the new profile.
pub struct ProfileHook {
    ctx: HookContext,
    state: watch::Sender<ProfileState>,
}

impl ProfileHook {
    pub fn new(ctx: HookContext) -> Self {
        let (state, _) = watch::channel(ProfileState::default());
        Self { ctx, state }
    }

    pub fn state(&self) -> ProfileState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ProfileState> {
        self.state.subscribe()
    }

    #[instrument(skip(self, dto))]
    pub async fn update_profile(&self, dto: UpdateProfileDto) -> ClientResult<CurrentUser> {
        let dto = dto.normalized();
        if let Err(errors) = dto.validate() {
            return self.settle("Profile updated", Err(errors.into())).await;
        }

        self.state.send_modify(|s| s.saving = true);
        let result = self.ctx.api.update_profile(&dto).await;
        self.settle("Profile updated", result).await
    }

    #[instrument(skip(self, photo), fields(file = %photo.file_name, bytes = photo.bytes.len()))]
    pub async fn upload_photo(&self, photo: PhotoUpload) -> ClientResult<CurrentUser> {
        if let Err(message) = photo.check() {
            return self
                .settle("Photo updated", Err(ClientError::validation(message)))
                .await;
        }

        self.state.send_modify(|s| s.saving = true);
        let result = self.ctx.api.upload_photo(&photo).await;
        self.settle("Photo updated", result).await
    }

    async fn settle(&self, title: &str, result: ClientResult<CurrentUser>) -> ClientResult<CurrentUser> {
        match result {
            Ok(user) => {
                self.state.send_modify(|s| {
                    s.saving = false;
                    s.error = None;
                });
                self.ctx.toasts.success(title, "");
                if let Err(error) = self.ctx.session.refresh().await {
                    debug!(%error, "session refresh after profile change failed");
                }
                Ok(user)
            }
            Err(error) => {
                warn!(%error, "profile change failed");
                self.ctx.report(&error);
                self.state.send_modify(|s| {
                    s.saving = false;
                    s.error = Some(error.clone());
                });
                Err(error)
            }
        }
    }
}
