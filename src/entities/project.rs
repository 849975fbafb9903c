//! `SeaORM` Entity, Project

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub code: String,
    pub description: Option<String>,
    #[sea_orm(nullable)]
    pub category_id: Option<i32>,
    #[sea_orm(nullable)]
    pub type_project_id: Option<i32>,
    #[sea_orm(nullable)]
    pub season_id: Option<i32>,
    pub staff_id: i32,
    pub state: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Category,
    #[sea_orm(
        belongs_to = "super::type_project::Entity",
        from = "Column::TypeProjectId",
        to = "super::type_project::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    TypeProject,
    #[sea_orm(
        belongs_to = "super::season::Entity",
        from = "Column::SeasonId",
        to = "super::season::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Season,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::StaffId",
        to = "super::user::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Staff,
    #[sea_orm(has_many = "super::project_history::Entity")]
    ProjectHistory,
    #[sea_orm(has_many = "super::project_student::Entity")]
    ProjectStudent,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::type_project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TypeProject.def()
    }
}

impl Related<super::season::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Season.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Staff.def()
    }
}

impl Related<super::project_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProjectHistory.def()
    }
}

impl Related<super::project_student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProjectStudent.def()
    }
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        super::project_student::Relation::Student.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::project_student::Relation::Project.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
