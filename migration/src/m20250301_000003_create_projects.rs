use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Projects::Table)
                    .if_not_exists()
                    .col(pk_auto(Projects::Id))
                    .col(string(Projects::Title))
                    .col(string(Projects::Code))
                    .col(text_null(Projects::Description))
                    .col(integer_null(Projects::CategoryId))
                    .col(integer_null(Projects::TypeProjectId))
                    .col(integer_null(Projects::SeasonId))
                    .col(integer(Projects::StaffId))
                    .col(boolean(Projects::State).default(true))
                    .col(timestamp_with_time_zone(Projects::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(Projects::UpdatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_category")
                            .from(Projects::Table, Projects::CategoryId)
                            .to(Alias::new("categories"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_type")
                            .from(Projects::Table, Projects::TypeProjectId)
                            .to(Alias::new("type_projects"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_season")
                            .from(Projects::Table, Projects::SeasonId)
                            .to(Alias::new("seasons"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_staff")
                            .from(Projects::Table, Projects::StaffId)
                            .to(Alias::new("users"), Alias::new("id")),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_projects_title")
                    .table(Projects::Table)
                    .col(Projects::Title)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProjectStudents::Table)
                    .if_not_exists()
                    .col(integer(ProjectStudents::ProjectId))
                    .col(integer(ProjectStudents::StudentId))
                    .primary_key(
                        Index::create()
                            .col(ProjectStudents::ProjectId)
                            .col(ProjectStudents::StudentId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_student_project")
                            .from(ProjectStudents::Table, ProjectStudents::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_student_student")
                            .from(ProjectStudents::Table, ProjectStudents::StudentId)
                            .to(Alias::new("students"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProjectHistories::Table)
                    .if_not_exists()
                    .col(pk_auto(ProjectHistories::Id))
                    .col(integer(ProjectHistories::ProjectId))
                    .col(text(ProjectHistories::Description))
                    .col(timestamp_with_time_zone(ProjectHistories::CreatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_history_project")
                            .from(ProjectHistories::Table, ProjectHistories::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProjectHistories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProjectStudents::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Projects::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Projects {
    Table,
    Id,
    Title,
    Code,
    Description,
    CategoryId,
    TypeProjectId,
    SeasonId,
    StaffId,
    State,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ProjectStudents {
    Table,
    ProjectId,
    StudentId,
}

#[derive(DeriveIden)]
enum ProjectHistories {
    Table,
    Id,
    ProjectId,
    Description,
    CreatedAt,
}
