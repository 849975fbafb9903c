use async_graphql::*;
use chrono::{DateTime, Utc};

use crate::services::{self, Page, ProjectDetails, SeasonDetails, StageDetails};

// Catalog Types
#[derive(SimpleObject)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub state: bool,
}

impl From<crate::entities::category::Model> for Category {
    fn from(category: crate::entities::category::Model) -> Self {
        Self {
            id: category.id,
            name: category.name,
            state: category.state,
        }
    }
}

#[derive(SimpleObject)]
pub struct TypeProject {
    pub id: i32,
    pub name: String,
    pub state: bool,
}

impl From<crate::entities::type_project::Model> for TypeProject {
    fn from(type_project: crate::entities::type_project::Model) -> Self {
        Self {
            id: type_project.id,
            name: type_project.name,
            state: type_project.state,
        }
    }
}

#[derive(SimpleObject)]
pub struct Student {
    pub id: i32,
    pub name: String,
    pub code: String,
    pub state: bool,
}

impl From<crate::entities::student::Model> for Student {
    fn from(student: crate::entities::student::Model) -> Self {
        Self {
            id: student.id,
            name: student.name,
            code: student.code,
            state: student.state,
        }
    }
}

#[derive(SimpleObject)]
pub struct Staff {
    pub id: i32,
    pub name: String,
    pub email: String,
}

impl From<crate::entities::user::Model> for Staff {
    fn from(user: crate::entities::user::Model) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

#[derive(SimpleObject)]
pub struct ProjectHistory {
    pub id: i32,
    pub project_id: i32,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl From<crate::entities::project_history::Model> for ProjectHistory {
    fn from(history: crate::entities::project_history::Model) -> Self {
        Self {
            id: history.id,
            project_id: history.project_id,
            description: history.description,
            created_at: history.created_at.into(),
        }
    }
}

// Season Types
#[derive(SimpleObject)]
pub struct Requirement {
    pub id: i32,
    pub stage_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub state: bool,
}

impl From<crate::entities::requirement::Model> for Requirement {
    fn from(requirement: crate::entities::requirement::Model) -> Self {
        Self {
            id: requirement.id,
            stage_id: requirement.stage_id,
            name: requirement.name,
            description: requirement.description,
            state: requirement.state,
        }
    }
}

#[derive(SimpleObject)]
pub struct Stage {
    pub id: i32,
    pub name: String,
    pub position: i32,
    pub season_id: Option<i32>,
    pub state: bool,
    pub requirements: Vec<Requirement>,
}

impl From<StageDetails> for Stage {
    fn from(details: StageDetails) -> Self {
        let StageDetails { stage, requirements } = details;
        Self {
            id: stage.id,
            name: stage.name,
            position: stage.position,
            season_id: stage.season_id,
            state: stage.state,
            requirements: requirements.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(SimpleObject)]
pub struct Season {
    pub id: i32,
    pub name: String,
    pub state: bool,
    pub enable_state: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub stages: Vec<Stage>,
}

impl From<SeasonDetails> for Season {
    fn from(details: SeasonDetails) -> Self {
        let SeasonDetails { season, stages } = details;
        Self {
            id: season.id,
            name: season.name,
            state: season.state,
            enable_state: season.enable_state,
            created_at: season.created_at.into(),
            updated_at: season.updated_at.into(),
            stages: stages.into_iter().map(Into::into).collect(),
        }
    }
}

/// Season as referenced from a project, without its stages.
#[derive(SimpleObject)]
pub struct SeasonSummary {
    pub id: i32,
    pub name: String,
    pub state: bool,
    pub enable_state: bool,
}

impl From<crate::entities::season::Model> for SeasonSummary {
    fn from(season: crate::entities::season::Model) -> Self {
        Self {
            id: season.id,
            name: season.name,
            state: season.state,
            enable_state: season.enable_state,
        }
    }
}

// Project Types
#[derive(SimpleObject)]
pub struct Project {
    pub id: i32,
    pub title: String,
    pub code: String,
    pub description: Option<String>,
    pub state: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub category: Option<Category>,
    pub type_project: Option<TypeProject>,
    pub students: Vec<Student>,
    pub season: Option<SeasonSummary>,
    pub staff: Option<Staff>,
    pub histories: Vec<ProjectHistory>,
}

impl From<ProjectDetails> for Project {
    fn from(details: ProjectDetails) -> Self {
        let ProjectDetails {
            project,
            category,
            type_project,
            students,
            season,
            staff,
            histories,
        } = details;

        Self {
            id: project.id,
            title: project.title,
            code: project.code,
            description: project.description,
            state: project.state,
            created_at: project.created_at.into(),
            updated_at: project.updated_at.into(),
            category: category.map(Into::into),
            type_project: type_project.map(Into::into),
            students: students.into_iter().map(Into::into).collect(),
            season: season.map(Into::into),
            staff: staff.map(Into::into),
            histories: histories.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(InputObject)]
pub struct ProjectInput {
    pub title: String,
    pub description: Option<String>,
    pub category_id: Option<i32>,
    pub type_project_id: Option<i32>,
    pub season_id: Option<i32>,
    #[graphql(default)]
    pub students: Vec<i32>,
}

impl From<ProjectInput> for services::ProjectInput {
    fn from(input: ProjectInput) -> Self {
        Self {
            title: input.title,
            description: input.description,
            category_id: input.category_id,
            type_project_id: input.type_project_id,
            season_id: input.season_id,
            students: input.students,
        }
    }
}

/// Omitted fields are left as stored; an explicit `null` clears them.
#[derive(InputObject)]
pub struct ProjectUpdateInput {
    pub title: String,
    pub description: MaybeUndefined<String>,
    pub category_id: MaybeUndefined<i32>,
    pub type_project_id: MaybeUndefined<i32>,
    pub season_id: MaybeUndefined<i32>,
    pub students: Option<Vec<i32>>,
}

fn changed<T>(value: MaybeUndefined<T>) -> Option<Option<T>> {
    match value {
        MaybeUndefined::Undefined => None,
        MaybeUndefined::Null => Some(None),
        MaybeUndefined::Value(value) => Some(Some(value)),
    }
}

impl From<ProjectUpdateInput> for services::ProjectChanges {
    fn from(input: ProjectUpdateInput) -> Self {
        Self {
            title: input.title,
            description: changed(input.description),
            category_id: changed(input.category_id),
            type_project_id: changed(input.type_project_id),
            season_id: changed(input.season_id),
            students: input.students,
        }
    }
}

#[derive(InputObject)]
pub struct SeasonInput {
    pub name: String,
    pub stages: Option<Vec<i32>>,
}

impl From<SeasonInput> for services::SeasonInput {
    fn from(input: SeasonInput) -> Self {
        Self {
            name: input.name,
            stages: input.stages,
        }
    }
}

// Listing envelopes
#[derive(SimpleObject)]
#[graphql(concrete(name = "ProjectPage", params(Project)))]
#[graphql(concrete(name = "SeasonPage", params(Season)))]
pub struct Paginated<T: OutputType> {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub next: String,
    pub prev: Option<String>,
    pub items: Vec<T>,
}

impl<S, T> From<Page<S>> for Paginated<T>
where
    T: OutputType + From<S>,
{
    fn from(page: Page<S>) -> Self {
        Self {
            page: page.page,
            limit: page.limit,
            total: page.total,
            next: page.next,
            prev: page.prev,
            items: page.items.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(SimpleObject)]
pub struct MessageResponse {
    pub message: String,
}

impl From<services::Message> for MessageResponse {
    fn from(message: services::Message) -> Self {
        Self {
            message: message.message,
        }
    }
}
