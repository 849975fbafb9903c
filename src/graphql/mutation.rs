use async_graphql::*;

use crate::auth::require_auth;
use crate::graphql::types::{
    MessageResponse, Project, ProjectInput, ProjectUpdateInput, Season, SeasonInput,
};
use crate::services::{ProjectService, SeasonService};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn create_project(&self, ctx: &Context<'_>, input: ProjectInput) -> Result<Project> {
        let auth_user = require_auth(ctx)?;
        let project_service = ctx.data::<ProjectService>()?;

        let project = project_service
            .create_project(input.into(), auth_user)
            .await
            .map_err(|e| e.extend())?;

        Ok(project.result.into())
    }

    async fn update_project(
        &self,
        ctx: &Context<'_>,
        id: i32,
        input: ProjectUpdateInput,
    ) -> Result<Project> {
        let auth_user = require_auth(ctx)?;
        let project_service = ctx.data::<ProjectService>()?;

        let project = project_service
            .update_project(input.into(), auth_user, id)
            .await
            .map_err(|e| e.extend())?;

        Ok(project.result.into())
    }

    async fn delete_project(&self, ctx: &Context<'_>, id: i32) -> Result<MessageResponse> {
        let auth_user = require_auth(ctx)?;
        let project_service = ctx.data::<ProjectService>()?;

        let message = project_service
            .delete_project(auth_user, id)
            .await
            .map_err(|e| e.extend())?;

        Ok(message.into())
    }

    async fn create_season(&self, ctx: &Context<'_>, input: SeasonInput) -> Result<Season> {
        let auth_user = require_auth(ctx)?;
        let season_service = ctx.data::<SeasonService>()?;

        let season = season_service
            .create_season(input.into(), auth_user)
            .await
            .map_err(|e| e.extend())?;

        Ok(season.result.into())
    }

    async fn update_season(&self, ctx: &Context<'_>, id: i32, input: SeasonInput) -> Result<Season> {
        let auth_user = require_auth(ctx)?;
        let season_service = ctx.data::<SeasonService>()?;

        let season = season_service
            .update_season(input.into(), auth_user, id)
            .await
            .map_err(|e| e.extend())?;

        Ok(season.result.into())
    }

    async fn delete_season(&self, ctx: &Context<'_>, id: i32) -> Result<MessageResponse> {
        let auth_user = require_auth(ctx)?;
        let season_service = ctx.data::<SeasonService>()?;

        let message = season_service
            .delete_season(auth_user, id)
            .await
            .map_err(|e| e.extend())?;

        Ok(message.into())
    }

    /// Make this season the only enabled one
    async fn enable_season(&self, ctx: &Context<'_>, id: i32) -> Result<Season> {
        let auth_user = require_auth(ctx)?;
        let season_service = ctx.data::<SeasonService>()?;

        let season = season_service
            .enable_season(auth_user, id)
            .await
            .map_err(|e| e.extend())?;

        Ok(season.result.into())
    }
}
