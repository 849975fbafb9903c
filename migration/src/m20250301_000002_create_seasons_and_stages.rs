use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Seasons::Table)
                    .if_not_exists()
                    .col(pk_auto(Seasons::Id))
                    .col(string_uniq(Seasons::Name))
                    .col(boolean(Seasons::State).default(true))
                    .col(boolean(Seasons::EnableState).default(false))
                    .col(timestamp_with_time_zone(Seasons::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(Seasons::UpdatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_seasons_enable_state")
                    .table(Seasons::Table)
                    .col(Seasons::EnableState)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Stages::Table)
                    .if_not_exists()
                    .col(pk_auto(Stages::Id))
                    .col(string(Stages::Name))
                    .col(integer(Stages::Position).default(0))
                    .col(integer_null(Stages::SeasonId))
                    .col(boolean(Stages::State).default(true))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stage_season")
                            .from(Stages::Table, Stages::SeasonId)
                            .to(Seasons::Table, Seasons::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Requirements::Table)
                    .if_not_exists()
                    .col(pk_auto(Requirements::Id))
                    .col(integer(Requirements::StageId))
                    .col(string(Requirements::Name))
                    .col(text_null(Requirements::Description))
                    .col(boolean(Requirements::State).default(true))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_requirement_stage")
                            .from(Requirements::Table, Requirements::StageId)
                            .to(Stages::Table, Stages::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Requirements::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Stages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Seasons::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Seasons {
    Table,
    Id,
    Name,
    State,
    EnableState,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Stages {
    Table,
    Id,
    Name,
    Position,
    SeasonId,
    State,
}

#[derive(DeriveIden)]
enum Requirements {
    Table,
    Id,
    StageId,
    Name,
    Description,
    State,
}
