use std::collections::BTreeSet;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    LoaderTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::auth::AuthenticatedUser;
use crate::entities::{
    category, prelude::*, project, project_history, project_student, season, student,
    type_project, user,
};
use crate::error::{ErrorKind, ServiceError, ServiceResult};
use crate::services::{Envelope, Message, Page, Pagination};

pub const PROJECTS_PATH: &str = "/api/project";

/// Code stored on every new project until real code assignment exists.
pub const PROJECT_CODE_PLACEHOLDER: &str = "sdsss";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectInput {
    pub title: String,
    pub description: Option<String>,
    pub category_id: Option<i32>,
    pub type_project_id: Option<i32>,
    pub season_id: Option<i32>,
    pub students: Vec<i32>,
}

/// Changes applied by an update. `None` leaves a field untouched,
/// `Some(None)` clears a nullable column.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectChanges {
    pub title: String,
    pub description: Option<Option<String>>,
    pub category_id: Option<Option<i32>>,
    pub type_project_id: Option<Option<i32>>,
    pub season_id: Option<Option<i32>>,
    /// Full student roster, replacing the current one when given.
    pub students: Option<Vec<i32>>,
}

/// A project with every relation attached.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectDetails {
    #[serde(flatten)]
    pub project: project::Model,
    pub category: Option<category::Model>,
    pub type_project: Option<type_project::Model>,
    pub students: Vec<student::Model>,
    pub season: Option<season::Model>,
    pub staff: Option<user::Model>,
    pub histories: Vec<project_history::Model>,
}

#[derive(Clone)]
pub struct ProjectService {
    db: DatabaseConnection,
}

impl ProjectService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// List active projects, one page at a time
    pub async fn list_projects(&self, pagination: Pagination) -> ServiceResult<Page<ProjectDetails>> {
        let active = || Project::find().filter(project::Column::State.eq(true));

        let listing = async {
            let (total, projects) = tokio::try_join!(
                active().count(&self.db),
                active()
                    .order_by_asc(project::Column::Id)
                    .offset(pagination.offset())
                    .limit(pagination.limit)
                    .all(&self.db),
            )?;
            let items = load_project_details(&self.db, projects).await?;
            Ok::<_, DbErr>((total, items))
        };

        let (total, items) = listing.await.map_err(|e| {
            error!("Failed to list projects: {}", e);
            ServiceError::internal("Internal Server Error")
        })?;

        Ok(Page::new(pagination, PROJECTS_PATH, total, items))
    }

    /// Get a project by id, including soft-deleted ones
    pub async fn find_project(&self, project_id: i32) -> ServiceResult<Envelope<ProjectDetails>> {
        let project = Project::find_by_id(project_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| ServiceError::bad_request("Project does not exist"))?;

        let details = load_single_project(&self.db, project).await?;
        Ok(Envelope::new(details))
    }

    /// Create a new project owned by the acting staff member
    pub async fn create_project(
        &self,
        input: ProjectInput,
        acting_user: &AuthenticatedUser,
    ) -> ServiceResult<Envelope<ProjectDetails>> {
        let txn = self.db.begin().await?;

        if Project::find()
            .filter(project::Column::Title.eq(&input.title))
            .one(&txn)
            .await?
            .is_some()
        {
            warn!("Rejected project creation, title '{}' is taken", input.title);
            return Err(ServiceError::bad_request("Project already exists"));
        }

        let ProjectInput {
            title,
            description,
            category_id,
            type_project_id,
            season_id,
            students,
        } = input;

        let now = Utc::now();
        let new_project = project::ActiveModel {
            title: Set(title),
            code: Set(PROJECT_CODE_PLACEHOLDER.to_string()),
            description: Set(description),
            category_id: Set(category_id),
            type_project_id: Set(type_project_id),
            season_id: Set(season_id),
            staff_id: Set(acting_user.id),
            state: Set(true),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        };

        let created = async {
            let project = new_project.insert(&txn).await?;
            connect_students(&txn, project.id, &students).await?;
            Ok::<_, ServiceError>(load_single_project(&txn, project).await?)
        }
        .await
        .inspect_err(|e| log_internal("create project", e))?;

        txn.commit().await?;

        info!(
            "Project {} created by user {}",
            created.project.id, acting_user.id
        );
        Ok(Envelope::new(created))
    }

    /// Update a project. Omitted fields keep their stored values.
    pub async fn update_project(
        &self,
        input: ProjectChanges,
        acting_user: &AuthenticatedUser,
        project_id: i32,
    ) -> ServiceResult<Envelope<ProjectDetails>> {
        let txn = self.db.begin().await?;

        if Project::find()
            .filter(project::Column::Title.eq(&input.title))
            .filter(project::Column::Id.ne(project_id))
            .one(&txn)
            .await?
            .is_some()
        {
            warn!(
                "Rejected update of project {}, title '{}' is taken",
                project_id, input.title
            );
            return Err(ServiceError::bad_request(
                "A project with the same title already exists",
            ));
        }

        let project = Project::find_by_id(project_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::bad_request("Project does not exist"))?;

        let ProjectChanges {
            title,
            description,
            category_id,
            type_project_id,
            season_id,
            students,
        } = input;

        let updated = async {
            if let Some(students) = students {
                disconnect_students(&txn, project_id).await?;
                connect_students(&txn, project_id, &students).await?;
            }

            let mut project_active: project::ActiveModel = project.into();
            project_active.title = Set(title);
            if let Some(description) = description {
                project_active.description = Set(description);
            }
            if let Some(category_id) = category_id {
                project_active.category_id = Set(category_id);
            }
            if let Some(type_project_id) = type_project_id {
                project_active.type_project_id = Set(type_project_id);
            }
            if let Some(season_id) = season_id {
                project_active.season_id = Set(season_id);
            }
            project_active.updated_at = Set(Utc::now().into());

            let project = project_active.update(&txn).await?;
            Ok::<_, ServiceError>(load_single_project(&txn, project).await?)
        }
        .await
        .inspect_err(|e| log_internal("update project", e))?;

        txn.commit().await?;

        info!("Project {} updated by user {}", project_id, acting_user.id);
        Ok(Envelope::new(updated))
    }

    /// Soft delete project; relations are left in place
    pub async fn delete_project(
        &self,
        acting_user: &AuthenticatedUser,
        project_id: i32,
    ) -> ServiceResult<Message> {
        let txn = self.db.begin().await?;

        let project = Project::find_by_id(project_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::bad_request("Project does not exist"))?;

        let mut project_active: project::ActiveModel = project.into();
        project_active.state = Set(false);
        project_active.updated_at = Set(Utc::now().into());

        project_active
            .update(&txn)
            .await
            .map_err(ServiceError::from)
            .inspect_err(|e| log_internal("delete project", e))?;

        txn.commit().await?;

        info!("Project {} deleted by user {}", project_id, acting_user.id);
        Ok(Message::new("Project deleted"))
    }
}

fn log_internal(operation: &str, err: &ServiceError) {
    if err.kind() == ErrorKind::Internal {
        error!("Failed to {}: {}", operation, err);
    }
}

async fn connect_students<C: ConnectionTrait>(
    db: &C,
    project_id: i32,
    student_ids: &[i32],
) -> ServiceResult<()> {
    let wanted: BTreeSet<i32> = student_ids.iter().copied().collect();
    if wanted.is_empty() {
        return Ok(());
    }

    let found: BTreeSet<i32> = Student::find()
        .select_only()
        .column(student::Column::Id)
        .filter(student::Column::Id.is_in(wanted.iter().copied()))
        .into_tuple::<i32>()
        .all(db)
        .await?
        .into_iter()
        .collect();

    let missing: Vec<i32> = wanted.difference(&found).copied().collect();
    if !missing.is_empty() {
        return Err(ServiceError::internal(format!(
            "Cannot connect students {:?} to project {}: not found",
            missing, project_id
        )));
    }

    let links = wanted.into_iter().map(|student_id| project_student::ActiveModel {
        project_id: Set(project_id),
        student_id: Set(student_id),
    });
    ProjectStudent::insert_many(links)
        .exec_without_returning(db)
        .await?;

    Ok(())
}

async fn disconnect_students<C: ConnectionTrait>(db: &C, project_id: i32) -> Result<(), DbErr> {
    ProjectStudent::delete_many()
        .filter(project_student::Column::ProjectId.eq(project_id))
        .exec(db)
        .await?;
    Ok(())
}

async fn load_single_project<C: ConnectionTrait>(
    db: &C,
    project: project::Model,
) -> Result<ProjectDetails, DbErr> {
    load_project_details(db, vec![project])
        .await?
        .pop()
        .ok_or_else(|| DbErr::RecordNotFound("project".to_string()))
}

async fn load_project_details<C: ConnectionTrait>(
    db: &C,
    projects: Vec<project::Model>,
) -> Result<Vec<ProjectDetails>, DbErr> {
    if projects.is_empty() {
        return Ok(Vec::new());
    }

    let categories = projects.load_one(Category, db).await?;
    let types = projects.load_one(TypeProject, db).await?;
    let students = projects.load_many_to_many(Student, ProjectStudent, db).await?;
    let seasons = projects.load_one(Season, db).await?;
    let staff = projects.load_one(User, db).await?;
    let histories = projects.load_many(ProjectHistory, db).await?;

    let mut categories = categories.into_iter();
    let mut types = types.into_iter();
    let mut students = students.into_iter();
    let mut seasons = seasons.into_iter();
    let mut staff = staff.into_iter();
    let mut histories = histories.into_iter();

    Ok(projects
        .into_iter()
        .map(|project| ProjectDetails {
            project,
            category: categories.next().flatten(),
            type_project: types.next().flatten(),
            students: students.next().unwrap_or_default(),
            season: seasons.next().flatten(),
            staff: staff.next().flatten(),
            histories: histories.next().unwrap_or_default(),
        })
        .collect())
}
