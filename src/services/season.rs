use std::collections::BTreeSet;

use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, LoaderTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::auth::AuthenticatedUser;
use crate::entities::{prelude::*, requirement, season, stage};
use crate::error::{ErrorKind, ServiceError, ServiceResult};
use crate::services::{Envelope, Message, Page, Pagination};

pub const SEASONS_PATH: &str = "/api/season";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonInput {
    pub name: String,
    /// Full stage set. On update a given set replaces the current one and
    /// `None` keeps it.
    pub stages: Option<Vec<i32>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StageDetails {
    #[serde(flatten)]
    pub stage: stage::Model,
    pub requirements: Vec<requirement::Model>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeasonDetails {
    #[serde(flatten)]
    pub season: season::Model,
    pub stages: Vec<StageDetails>,
}

#[derive(Clone)]
pub struct SeasonService {
    db: DatabaseConnection,
}

impl SeasonService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// The season currently marked as enabled, with its stages and their requirements
    pub async fn get_enabled_season(&self) -> ServiceResult<Envelope<SeasonDetails>> {
        let season = Season::find()
            .filter(season::Column::EnableState.eq(true))
            .one(&self.db)
            .await?
            .ok_or_else(|| ServiceError::bad_request("Enable a season first"))?;

        let details = load_single_season(&self.db, season).await?;
        Ok(Envelope::new(details))
    }

    pub async fn list_seasons(&self, pagination: Pagination) -> ServiceResult<Page<SeasonDetails>> {
        let active = || Season::find().filter(season::Column::State.eq(true));

        let listing = async {
            let (total, seasons) = tokio::try_join!(
                active().count(&self.db),
                active()
                    .order_by_asc(season::Column::Id)
                    .offset(pagination.offset())
                    .limit(pagination.limit)
                    .all(&self.db),
            )?;
            let items = load_season_details(&self.db, seasons).await?;
            Ok::<_, DbErr>((total, items))
        };

        let (total, items) = listing.await.map_err(|e| {
            error!("Failed to list seasons: {}", e);
            ServiceError::internal("Internal Server Error")
        })?;

        Ok(Page::new(pagination, SEASONS_PATH, total, items))
    }

    /// Get a season by id, including soft-deleted ones
    pub async fn find_season(&self, season_id: i32) -> ServiceResult<Envelope<SeasonDetails>> {
        let season = Season::find_by_id(season_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| ServiceError::bad_request("Season does not exist"))?;

        let details = load_single_season(&self.db, season).await?;
        Ok(Envelope::new(details))
    }

    pub async fn create_season(
        &self,
        input: SeasonInput,
        acting_user: &AuthenticatedUser,
    ) -> ServiceResult<Envelope<SeasonDetails>> {
        let txn = self.db.begin().await?;

        if Season::find()
            .filter(season::Column::Name.eq(&input.name))
            .one(&txn)
            .await?
            .is_some()
        {
            warn!("Rejected season creation, name '{}' is taken", input.name);
            return Err(ServiceError::bad_request("Season already exists"));
        }

        let SeasonInput { name, stages } = input;

        let now = Utc::now();
        let new_season = season::ActiveModel {
            name: Set(name),
            state: Set(true),
            enable_state: Set(false),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        };

        let created = async {
            let season = new_season.insert(&txn).await?;
            connect_stages(&txn, season.id, &stages.unwrap_or_default()).await?;
            Ok::<_, ServiceError>(load_single_season(&txn, season).await?)
        }
        .await
        .inspect_err(|e| log_internal("create season", e))?;

        txn.commit().await?;

        info!("Season {} created by user {}", created.season.id, acting_user.id);
        Ok(Envelope::new(created))
    }

    /// Update a season, replacing its stage set when one is given
    pub async fn update_season(
        &self,
        input: SeasonInput,
        acting_user: &AuthenticatedUser,
        season_id: i32,
    ) -> ServiceResult<Envelope<SeasonDetails>> {
        let txn = self.db.begin().await?;

        if Season::find()
            .filter(season::Column::Name.eq(&input.name))
            .filter(season::Column::Id.ne(season_id))
            .one(&txn)
            .await?
            .is_some()
        {
            warn!(
                "Rejected update of season {}, name '{}' is taken",
                season_id, input.name
            );
            return Err(ServiceError::bad_request(
                "A season with the same name already exists",
            ));
        }

        let season = Season::find_by_id(season_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::bad_request("Season does not exist"))?;

        let updated = async {
            if let Some(stages) = &input.stages {
                disconnect_stages(&txn, season_id).await?;
                connect_stages(&txn, season_id, stages).await?;
            }

            let mut season_active: season::ActiveModel = season.into();
            season_active.name = Set(input.name);
            season_active.updated_at = Set(Utc::now().into());

            let season = season_active.update(&txn).await?;
            Ok::<_, ServiceError>(load_single_season(&txn, season).await?)
        }
        .await
        .inspect_err(|e| log_internal("update season", e))?;

        txn.commit().await?;

        info!("Season {} updated by user {}", season_id, acting_user.id);
        Ok(Envelope::new(updated))
    }

    /// Soft delete season and release its stages
    pub async fn delete_season(
        &self,
        acting_user: &AuthenticatedUser,
        season_id: i32,
    ) -> ServiceResult<Message> {
        let txn = self.db.begin().await?;

        let season = Season::find_by_id(season_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::bad_request("Season does not exist"))?;

        async {
            let mut season_active: season::ActiveModel = season.into();
            season_active.state = Set(false);
            season_active.updated_at = Set(Utc::now().into());
            season_active.update(&txn).await?;

            disconnect_stages(&txn, season_id).await?;
            Ok::<_, ServiceError>(())
        }
        .await
        .inspect_err(|e| log_internal("delete season", e))?;

        txn.commit().await?;

        info!("Season {} deleted by user {}", season_id, acting_user.id);
        Ok(Message::new("Season deleted"))
    }

    /// Make `season_id` the only enabled season.
    ///
    /// Clearing the flag on every other season and setting it on the target
    /// happen in one transaction, so readers never observe zero or two
    /// enabled seasons as a result of this call.
    pub async fn enable_season(
        &self,
        acting_user: &AuthenticatedUser,
        season_id: i32,
    ) -> ServiceResult<Envelope<SeasonDetails>> {
        let txn = self.db.begin().await?;

        let season = Season::find_by_id(season_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::bad_request("Season does not exist"))?;

        let enabled = async {
            Season::update_many()
                .col_expr(season::Column::EnableState, Expr::value(false))
                .filter(season::Column::Id.ne(season_id))
                .exec(&txn)
                .await?;

            let mut season_active: season::ActiveModel = season.into();
            season_active.enable_state = Set(true);
            season_active.updated_at = Set(Utc::now().into());

            let season = season_active.update(&txn).await?;
            Ok::<_, ServiceError>(load_single_season(&txn, season).await?)
        }
        .await
        .inspect_err(|e| log_internal("enable season", e))?;

        txn.commit().await?;

        info!("Season {} enabled by user {}", season_id, acting_user.id);
        Ok(Envelope::new(enabled))
    }
}

fn log_internal(operation: &str, err: &ServiceError) {
    if err.kind() == ErrorKind::Internal {
        error!("Failed to {}: {}", operation, err);
    }
}

async fn connect_stages<C: ConnectionTrait>(
    db: &C,
    season_id: i32,
    stage_ids: &[i32],
) -> ServiceResult<()> {
    let wanted: BTreeSet<i32> = stage_ids.iter().copied().collect();
    if wanted.is_empty() {
        return Ok(());
    }

    let result = Stage::update_many()
        .col_expr(stage::Column::SeasonId, Expr::value(season_id))
        .filter(stage::Column::Id.is_in(wanted.iter().copied()))
        .exec(db)
        .await?;

    if result.rows_affected != wanted.len() as u64 {
        return Err(ServiceError::internal(format!(
            "Cannot connect stages {:?} to season {}: some stages were not found",
            wanted, season_id
        )));
    }

    Ok(())
}

async fn disconnect_stages<C: ConnectionTrait>(db: &C, season_id: i32) -> Result<(), DbErr> {
    Stage::update_many()
        .col_expr(stage::Column::SeasonId, Expr::value(Option::<i32>::None))
        .filter(stage::Column::SeasonId.eq(season_id))
        .exec(db)
        .await?;
    Ok(())
}

async fn load_single_season<C: ConnectionTrait>(
    db: &C,
    season: season::Model,
) -> Result<SeasonDetails, DbErr> {
    load_season_details(db, vec![season])
        .await?
        .pop()
        .ok_or_else(|| DbErr::RecordNotFound("season".to_string()))
}

async fn load_season_details<C: ConnectionTrait>(
    db: &C,
    seasons: Vec<season::Model>,
) -> Result<Vec<SeasonDetails>, DbErr> {
    if seasons.is_empty() {
        return Ok(Vec::new());
    }

    let stages = seasons
        .load_many(Stage::find().order_by_asc(stage::Column::Position), db)
        .await?;

    let flat: Vec<stage::Model> = stages.iter().flatten().cloned().collect();
    let requirements = if flat.is_empty() {
        Vec::new()
    } else {
        flat.load_many(
            Requirement::find().order_by_asc(requirement::Column::Id),
            db,
        )
        .await?
    };
    let mut requirements = requirements.into_iter();

    Ok(seasons
        .into_iter()
        .zip(stages)
        .map(|(season, stages)| SeasonDetails {
            season,
            stages: stages
                .into_iter()
                .map(|stage| StageDetails {
                    stage,
                    requirements: requirements.next().unwrap_or_default(),
                })
                .collect(),
        })
        .collect())
}
