use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use scholaris_core::{ClientResult, ListParams, Paginated};
use scholaris_models::{
    Class, ClassId, CreateClassDto, CreateResourceDto, ResourceId, Student, UpdateClassDto,
    UpdateResourceDto,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::watch;
use tracing::{debug, instrument, warn};
use validator::Validate;

use super::{HookContext, HookState};
use crate::api::paths;

/// A REST collection a hook can list.
pub trait Collection: Send + Sync + 'static {
    type Item: DeserializeOwned + Clone + Send + Sync + 'static;

    const PATH: &'static str;
    /// Singular, capitalised name used in toasts.
    const LABEL: &'static str;

    /// Fetches one page for already-scoped `params`.
    fn fetch(
        ctx: &HookContext,
        params: ListParams,
    ) -> impl Future<Output = ClientResult<Paginated<Self::Item>>> + Send {
        let api = ctx.api.clone();
        async move { api.list::<Self::Item>(Self::PATH, &params).await }
    }
}

/// A collection that also accepts create, update and delete.
pub trait MutableCollection: Collection {
    type Id: std::fmt::Display + Copy + Send + Sync;
    type Create: Serialize + Validate + Send + Sync;
    type Update: Serialize + Validate + Send + Sync;
}

pub struct Classes;

impl Collection for Classes {
    type Item = Class;
    const PATH: &'static str = paths::CLASSES;
    const LABEL: &'static str = "Class";
}

impl MutableCollection for Classes {
    type Id = ClassId;
    type Create = CreateClassDto;
    type Update = UpdateClassDto;
}

pub struct Students;

impl Collection for Students {
    type Item = Student;
    const PATH: &'static str = paths::STUDENTS;
    const LABEL: &'static str = "Student";
}

impl MutableCollection for super::Resources {
    type Id = ResourceId;
    type Create = CreateResourceDto;
    type Update = UpdateResourceDto;
}

pub struct CollectionHook<C: Collection> {
    ctx: HookContext,
    filters: Mutex<ListParams>,
    generation: AtomicU64,
    disposed: AtomicBool,
    state: watch::Sender<HookState<C::Item>>,
    _collection: PhantomData<fn() -> C>,
}

impl<C: Collection> std::fmt::Debug for CollectionHook<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionHook")
            .field("collection", &C::LABEL)
            .field("generation", &self.generation.load(Ordering::SeqCst))
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

impl<C: Collection> CollectionHook<C> {
    pub fn new(ctx: HookContext) -> Self {
        Self::with_filters(ctx, ListParams::default())
    }

    pub fn with_filters(ctx: HookContext, filters: ListParams) -> Self {
        let (state, _) = watch::channel(HookState::default());
        Self {
            ctx,
            filters: Mutex::new(filters),
            generation: AtomicU64::new(0),
            disposed: AtomicBool::new(false),
            state,
            _collection: PhantomData,
        }
    }

    pub fn state(&self) -> HookState<C::Item> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<HookState<C::Item>> {
        self.state.subscribe()
    }

    pub fn filters(&self) -> ListParams {
        self.filters
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    /// Reloads with the current filters. Safe to call repeatedly.
    #[instrument(skip(self), fields(collection = C::LABEL))]
    pub async fn load(&self) {
        if self.is_disposed() {
            return;
        }
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let Some(params) = self.ctx.scope(self.filters()) else {
            debug!("no academy in scope");
            self.state.send_modify(|s| {
                s.data.clear();
                s.meta = None;
                s.loading = false;
                s.error = None;
            });
            return;
        };

        self.state.send_modify(|s| s.loading = true);
        let result = C::fetch(&self.ctx, params).await;

        if self.is_disposed() || self.generation.load(Ordering::SeqCst) != generation {
            debug!(generation, "discarding superseded load");
            return;
        }

        match result {
            Ok(page) => {
                debug!(count = page.data.len(), "collection loaded");
                self.state.send_modify(|s| {
                    s.data = page.data;
                    s.meta = Some(page.meta);
                    s.loading = false;
                    s.error = None;
                });
            }
            Err(error) => {
                warn!(%error, "collection load failed");
                self.ctx.report(&error);
                self.state.send_modify(|s| {
                    s.loading = false;
                    s.error = Some(error);
                });
            }
        }
    }

    /// Replaces the filters and reloads.
    pub async fn set_filters(&self, filters: ListParams) {
        *self.filters.lock().unwrap_or_else(PoisonError::into_inner) = filters;
        self.load().await;
    }

    /// Stops the hook from publishing; in-flight results are dropped.
    pub fn dispose(&self) {
        self.disposed.store(true, Ordering::SeqCst);
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

impl<C: MutableCollection> CollectionHook<C> {
    #[instrument(skip(self, dto), fields(collection = C::LABEL))]
    pub async fn create(&self, dto: C::Create) -> ClientResult<C::Item> {
        let result = match dto.validate() {
            Ok(()) => self.ctx.api.create(C::PATH, &dto).await,
            Err(errors) => Err(errors.into()),
        };
        self.settle("created", result).await
    }

    #[instrument(skip(self, dto), fields(collection = C::LABEL, id = %id))]
    pub async fn update(&self, id: C::Id, dto: C::Update) -> ClientResult<C::Item> {
        let result = match dto.validate() {
            Ok(()) => {
                self.ctx
                    .api
                    .update(&format!("{}/{}", C::PATH, id), &dto)
                    .await
            }
            Err(errors) => Err(errors.into()),
        };
        self.settle("updated", result).await
    }

    #[instrument(skip(self), fields(collection = C::LABEL, id = %id))]
    pub async fn delete(&self, id: C::Id) -> ClientResult<()> {
        let result = self.ctx.api.delete(&format!("{}/{}", C::PATH, id)).await;
        self.settle("deleted", result).await
    }

    /// Toasts the outcome; a success is followed by a full reload.
    async fn settle<T>(&self, verb: &str, result: ClientResult<T>) -> ClientResult<T> {
        match result {
            Ok(value) => {
                self.ctx
                    .toasts
                    .success(format!("{} {verb}", C::LABEL), "");
                self.load().await;
                Ok(value)
            }
            Err(error) => {
                warn!(%error, verb, "mutation failed");
                self.ctx.report(&error);
                self.state.send_modify(|s| s.error = Some(error.clone()));
                Err(error)
            }
        }
    }
}
