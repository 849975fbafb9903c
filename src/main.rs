use std::time::Duration;

use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    http::{header::{AUTHORIZATION, CONTENT_TYPE}, HeaderValue, Method, StatusCode},
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Extension, Router,
};
use sea_orm::{ConnectOptions, Database};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use thesisdesk::auth::{optional_auth_middleware, AuthenticatedUser, JwtService};
use thesisdesk::config::AppConfig;
use thesisdesk::graphql::{create_schema, ApiSchema};
use thesisdesk::services::{ProjectService, SeasonService};

#[derive(Clone)]
struct AppState {
    schema: ApiSchema,
    expose_schema: bool,
}

async fn graphql_handler(
    State(state): State<AppState>,
    Extension(user): Extension<Option<AuthenticatedUser>>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = req.into_inner();

    if let Some(user) = user {
        request = request.data(user);
    }

    state.schema.execute(request).await.into()
}

async fn health() -> impl IntoResponse {
    "OK"
}

async fn graphql_schema(State(state): State<AppState>) -> impl IntoResponse {
    if !state.expose_schema {
        return (StatusCode::NOT_FOUND, "Schema not available in production").into_response();
    }

    (
        [(CONTENT_TYPE, "application/graphql")],
        state.schema.sdl(),
    )
        .into_response()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "thesisdesk=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    info!("Starting thesisdesk in {} environment", config.environment);

    info!("Connecting to database...");
    let mut options = ConnectOptions::new(config.database_url.clone());
    options
        .max_connections(config.db_max_connections)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);
    let db = Database::connect(options).await?;
    info!("Database connected successfully");

    let jwt_service = JwtService::from_config(&config);
    let project_service = ProjectService::new(db.clone());
    let season_service = SeasonService::new(db);

    let app_state = AppState {
        schema: create_schema(project_service, season_service),
        expose_schema: config.is_development(),
    };

    let cors = if config.cors_origins.trim() == "*" {
        warn!("CORS set to accept ANY origin (*), only use in development");
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .split(',')
            .filter_map(|origin| origin.trim().parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([CONTENT_TYPE, AUTHORIZATION])
            .allow_credentials(true)
    };

    let app = Router::new()
        .route("/graphql", post(graphql_handler))
        .route("/health", get(health))
        .route("/schema.graphql", get(graphql_schema))
        .layer(cors)
        .layer(middleware::from_fn_with_state(
            jwt_service,
            optional_auth_middleware,
        ))
        .with_state(app_state);

    let addr = config.addr();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server starting on http://{}", addr);
    info!("Health check available at http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
