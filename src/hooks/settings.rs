use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use scholaris_core::ClientResult;
use scholaris_models::{
    AcademySettings, PlatformSettings, UpdateAcademySettingsDto, UpdatePlatformSettingsDto,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::watch;
use tracing::{debug, instrument, warn};
use validator::Validate;

use super::HookContext;
use crate::api::paths;

/// A settings document with a GET/PATCH endpoint.
pub trait SettingsScope: Send + Sync + 'static {
    type Settings: DeserializeOwned + Clone + Send + Sync + 'static;
    type Update: Serialize + Validate + Send + Sync;

    const PATH: &'static str;
    const LABEL: &'static str;
}

pub struct AcademyScope;

impl SettingsScope for AcademyScope {
    type Settings = AcademySettings;
    type Update = UpdateAcademySettingsDto;
    const PATH: &'static str = paths::ACADEMY_SETTINGS;
    const LABEL: &'static str = "Academy settings";
}

pub struct PlatformScope;

impl SettingsScope for PlatformScope {
    type Settings = PlatformSettings;
    type Update = UpdatePlatformSettingsDto;
    const PATH: &'static str = paths::PLATFORM_SETTINGS;
    const LABEL: &'static str = "Platform settings";
}

#[derive(Debug, Clone, PartialEq)]
pub struct SettingsState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<scholaris_core::ClientError>,
}

impl<T> Default for SettingsState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

pub struct SettingsHook<S: SettingsScope> {
    ctx: HookContext,
    generation: AtomicU64,
    disposed: AtomicBool,
    state: watch::Sender<SettingsState<S::Settings>>,
}

impl<S: SettingsScope> SettingsHook<S> {
    pub fn new(ctx: HookContext) -> Self {
        let (state, _) = watch::channel(SettingsState::default());
        Self {
            ctx,
            generation: AtomicU64::new(0),
            disposed: AtomicBool::new(false),
            state,
        }
    }

    pub fn state(&self) -> SettingsState<S::Settings> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SettingsState<S::Settings>> {
        self.state.subscribe()
    }

    pub fn dispose(&self) {
        self.disposed.store(true, Ordering::SeqCst);
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    #[instrument(skip(self), fields(settings = S::LABEL))]
    pub async fn load(&self) {
        if self.disposed.load(Ordering::SeqCst) {
            return;
        }
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        self.state.send_modify(|s| s.loading = true);
        let result = self.ctx.api.get::<S::Settings>(S::PATH).await;
        if self.disposed.load(Ordering::SeqCst)
            || self.generation.load(Ordering::SeqCst) != generation
        {
            debug!(generation, "discarding superseded settings load");
            return;
        }

        match result {
            Ok(settings) => self.state.send_modify(|s| {
                s.data = Some(settings);
                s.loading = false;
                s.error = None;
            }),
            Err(error) => {
                warn!(%error, "settings load failed");
                self.ctx.report(&error);
                self.state.send_modify(|s| {
                    s.loading = false;
                    s.error = Some(error);
                });
            }
        }
    }

    /// Validates and saves `dto`, then reloads.
    #[instrument(skip(self, dto), fields(settings = S::LABEL))]
    pub async fn save(&self, dto: S::Update) -> ClientResult<S::Settings> {
        let result = match dto.validate() {
            Ok(()) => self.ctx.api.update::<_, S::Settings>(S::PATH, &dto).await,
            Err(errors) => Err(errors.into()),
        };

        match result {
            Ok(settings) => {
                self.ctx.toasts.success(format!("{} saved", S::LABEL), "");
                self.load().await;
                Ok(settings)
            }
            Err(error) => {
                warn!(%error, "settings save failed");
                self.ctx.report(&error);
                self.state.send_modify(|s| s.error = Some(error.clone()));
                Err(error)
            }
        }
    }
}
