use scholaris_core::{ClientResult, ListParams, Paginated};
use scholaris_models::{Class, Student};
use tracing::instrument;

use super::HookContext;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    pub classes: Paginated<Class>,
    pub students: Paginated<Student>,
}

impl DashboardData {
    fn empty() -> Self {
        Self {
            classes: Paginated::single_page(Vec::new()),
            students: Paginated::single_page(Vec::new()),
        }
    }
}

/// Loads the dashboard summary: classes and students, fetched in parallel.
///
/// # Errors
///
/// The first failure of either request; it has already been reported.
#[instrument(skip(ctx))]
pub async fn load_dashboard(ctx: &HookContext) -> ClientResult<DashboardData> {
    let Some(params) = ctx.scope(ListParams::default()) else {
        return Ok(DashboardData::empty());
    };

    let (classes, students) = tokio::join!(ctx.api.classes(&params), ctx.api.students(&params));
    let result = classes.and_then(|classes| {
        Ok(DashboardData {
            classes,
            students: students?,
        })
    });
    if let Err(error) = &result {
        ctx.report(error);
    }
    result
}
