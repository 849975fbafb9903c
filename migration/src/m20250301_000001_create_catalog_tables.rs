use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(string(Users::Name))
                    .col(string_uniq(Users::Email))
                    .col(boolean(Users::State).default(true))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(pk_auto(Categories::Id))
                    .col(string_uniq(Categories::Name))
                    .col(boolean(Categories::State).default(true))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TypeProjects::Table)
                    .if_not_exists()
                    .col(pk_auto(TypeProjects::Id))
                    .col(string_uniq(TypeProjects::Name))
                    .col(boolean(TypeProjects::State).default(true))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(pk_auto(Students::Id))
                    .col(string(Students::Name))
                    .col(string_uniq(Students::Code))
                    .col(boolean(Students::State).default(true))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TypeProjects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Name,
    Email,
    State,
}

#[derive(DeriveIden)]
enum Categories {
    Table,
    Id,
    Name,
    State,
}

#[derive(DeriveIden)]
enum TypeProjects {
    Table,
    Id,
    Name,
    State,
}

#[derive(DeriveIden)]
enum Students {
    Table,
    Id,
    Name,
    Code,
    State,
}
