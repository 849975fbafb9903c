use async_graphql::{EmptySubscription, Schema};

use crate::graphql::{MutationRoot, QueryRoot};
use crate::services::{ProjectService, SeasonService};

pub type ApiSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema with the services every resolver reads from context.
pub fn create_schema(project_service: ProjectService, season_service: SeasonService) -> ApiSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(project_service)
        .data(season_service)
        .finish()
}
