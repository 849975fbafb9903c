use async_graphql::*;

use crate::graphql::types::{Paginated, Project, Season};
use crate::services::{Pagination, ProjectService, SeasonService};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn health(&self) -> &str {
        "OK"
    }

    async fn projects(
        &self,
        ctx: &Context<'_>,
        #[graphql(default = 1)] page: u64,
        #[graphql(default = 10)] limit: u64,
    ) -> Result<Paginated<Project>> {
        let project_service = ctx.data::<ProjectService>()?;

        let page = project_service
            .list_projects(Pagination::new(page, limit))
            .await
            .map_err(|e| e.extend())?;

        Ok(page.into())
    }

    async fn project(&self, ctx: &Context<'_>, id: i32) -> Result<Project> {
        let project_service = ctx.data::<ProjectService>()?;

        let project = project_service
            .find_project(id)
            .await
            .map_err(|e| e.extend())?;

        Ok(project.result.into())
    }

    async fn seasons(
        &self,
        ctx: &Context<'_>,
        #[graphql(default = 1)] page: u64,
        #[graphql(default = 10)] limit: u64,
    ) -> Result<Paginated<Season>> {
        let season_service = ctx.data::<SeasonService>()?;

        let page = season_service
            .list_seasons(Pagination::new(page, limit))
            .await
            .map_err(|e| e.extend())?;

        Ok(page.into())
    }

    async fn season(&self, ctx: &Context<'_>, id: i32) -> Result<Season> {
        let season_service = ctx.data::<SeasonService>()?;

        let season = season_service
            .find_season(id)
            .await
            .map_err(|e| e.extend())?;

        Ok(season.result.into())
    }

    async fn enabled_season(&self, ctx: &Context<'_>) -> Result<Season> {
        let season_service = ctx.data::<SeasonService>()?;

        let season = season_service
            .get_enabled_season()
            .await
            .map_err(|e| e.extend())?;

        Ok(season.result.into())
    }
}
