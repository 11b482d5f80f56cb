//! Resource listing with the student visibility rule.
//!
//! The server may return more resources than a student is allowed to see;
//! narrowing happens here. A student sees a resource when any of these hold:
//!
//! - it is `PUBLIC`
//! - it belongs to a class the student is enrolled in
//! - one of the student's teachers uploaded it
//! - the student uploaded it

use std::collections::HashSet;

use scholaris_core::pagination::MAX_LIMIT;
use scholaris_core::{ClientResult, ListParams, Paginated};
use scholaris_models::{Class, ClassId, Resource, Role, UserId, Visibility};
use tracing::debug;
use uuid::Uuid;

use super::{Collection, CollectionHook, HookContext};
use crate::api::paths;

pub struct Resources;

impl Collection for Resources {
    type Item = Resource;
    const PATH: &'static str = paths::RESOURCES;
    const LABEL: &'static str = "Resource";

    fn fetch(
        ctx: &HookContext,
        params: ListParams,
    ) -> impl Future<Output = ClientResult<Paginated<Resource>>> + Send {
        let ctx = ctx.clone();
        async move { fetch_visible(&ctx, params).await }
    }
}

pub type ResourceHook = CollectionHook<Resources>;

/// What a student is enrolled in, derived from the academy's classes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentScope {
    pub student_id: UserId,
    pub classes: HashSet<ClassId>,
    pub teachers: HashSet<UserId>,
}

impl StudentScope {
    pub fn new(student_id: UserId, classes: &[Class]) -> Self {
        let enrolled: Vec<&Class> = classes
            .iter()
            .filter(|c| c.student_ids.contains(&student_id))
            .collect();
        Self {
            student_id,
            classes: enrolled.iter().map(|c| c.id).collect(),
            teachers: enrolled.iter().filter_map(|c| c.teacher_id).collect(),
        }
    }

    pub fn can_see(&self, resource: &Resource) -> bool {
        resource.visibility == Visibility::Public
            || resource.class().is_some_and(|id| self.classes.contains(&id))
            || self.teachers.contains(&resource.uploader_id)
            || resource.uploader_id == self.student_id
    }
}

async fn fetch_visible(ctx: &HookContext, params: ListParams) -> ClientResult<Paginated<Resource>> {
    let session = ctx.session.snapshot();
    let (Some(Role::Student), Some(student_id)) = (session.role, session.user_id()) else {
        return ctx.api.resources(&params).await;
    };

    let (resources, classes) = tokio::join!(
        ctx.api.resources(&params),
        all_classes(ctx, params.academy_id)
    );
    let mut page = resources?;
    let scope = StudentScope::new(student_id, &classes?);

    let fetched = page.data.len();
    page.data.retain(|r| scope.can_see(r));
    page.meta.count = u32::try_from(page.data.len()).unwrap_or(u32::MAX);
    debug!(
        fetched,
        visible = page.data.len(),
        "resources narrowed for student"
    );
    Ok(page)
}

/// Every class in the academy; enrolment can sit on any page.
async fn all_classes(ctx: &HookContext, academy_id: Option<Uuid>) -> ClientResult<Vec<Class>> {
    let mut classes = Vec::new();
    let mut page = 1;
    loop {
        let params = ListParams {
            academy_id,
            page: Some(page),
            limit: Some(MAX_LIMIT),
            ..Default::default()
        };
        let batch = ctx.api.classes(&params).await?;
        classes.extend(batch.data);
        match batch.meta.next_page {
            Some(next) if next > page => page = next,
            _ => break,
        }
    }
    debug!(count = classes.len(), pages = page, "classes loaded for visibility");
    Ok(classes)
}
