use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub code: String,
    pub state: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::project_student::Entity")]
    ProjectStudent,
}

impl Related<super::project_student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProjectStudent.def()
    }
}

impl Related<super::project::Entity> for Entity {
    fn to() -> RelationDef {
        super::project_student::Relation::Project.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::project_student::Relation::Student.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
