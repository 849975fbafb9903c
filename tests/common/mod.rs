#![allow(dead_code)]

use sea_orm::{
    ActiveModelTrait, ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend,
    Schema, Set,
};
use thesisdesk::auth::AuthenticatedUser;
use thesisdesk::entities::{
    category, prelude::*, requirement, stage, student, user,
};

/// Fresh in-memory database with every table created from the entities.
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);
    let db = Database::connect(options).await.expect("connect sqlite");

    let backend = db.get_database_backend();
    let schema = Schema::new(DbBackend::Sqlite);
    let tables = [
        schema.create_table_from_entity(User),
        schema.create_table_from_entity(Category),
        schema.create_table_from_entity(TypeProject),
        schema.create_table_from_entity(Student),
        schema.create_table_from_entity(Season),
        schema.create_table_from_entity(Stage),
        schema.create_table_from_entity(Requirement),
        schema.create_table_from_entity(Project),
        schema.create_table_from_entity(ProjectStudent),
        schema.create_table_from_entity(ProjectHistory),
    ];
    for table in tables {
        db.execute(backend.build(&table)).await.expect("create table");
    }

    db
}

pub async fn seed_staff(db: &DatabaseConnection, name: &str) -> AuthenticatedUser {
    let email = format!("{}@example.com", name.to_lowercase());
    let staff = user::ActiveModel {
        name: Set(name.to_string()),
        email: Set(email),
        state: Set(true),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert staff");

    AuthenticatedUser {
        id: staff.id,
        email: staff.email,
    }
}

pub async fn seed_student(db: &DatabaseConnection, name: &str, code: &str) -> student::Model {
    student::ActiveModel {
        name: Set(name.to_string()),
        code: Set(code.to_string()),
        state: Set(true),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert student")
}

pub async fn seed_category(db: &DatabaseConnection, name: &str) -> category::Model {
    category::ActiveModel {
        name: Set(name.to_string()),
        state: Set(true),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert category")
}

pub async fn seed_stage(db: &DatabaseConnection, name: &str, position: i32) -> stage::Model {
    stage::ActiveModel {
        name: Set(name.to_string()),
        position: Set(position),
        season_id: Set(None),
        state: Set(true),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert stage")
}

pub async fn seed_requirement(
    db: &DatabaseConnection,
    stage_id: i32,
    name: &str,
) -> requirement::Model {
    requirement::ActiveModel {
        stage_id: Set(stage_id),
        name: Set(name.to_string()),
        description: Set(None),
        state: Set(true),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert requirement")
}
