mod common;

use common::{seed_category, seed_staff, seed_student, setup_db};
use thesisdesk::error::ErrorKind;
use thesisdesk::services::{
    Pagination, ProjectChanges, ProjectInput, ProjectService, PROJECT_CODE_PLACEHOLDER,
};

fn input(title: &str, students: Vec<i32>) -> ProjectInput {
    ProjectInput {
        title: title.to_string(),
        description: None,
        category_id: None,
        type_project_id: None,
        season_id: None,
        students,
    }
}

fn changes(title: &str) -> ProjectChanges {
    ProjectChanges {
        title: title.to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn create_project_attaches_staff_students_and_placeholder_code() {
    let db = setup_db().await;
    let staff = seed_staff(&db, "Ada").await;
    let alice = seed_student(&db, "Alice", "S-001").await;
    let bob = seed_student(&db, "Bob", "S-002").await;
    let category = seed_category(&db, "Research").await;
    let service = ProjectService::new(db);

    let mut new_project = input("Compiler in Rust", vec![alice.id, bob.id]);
    new_project.category_id = Some(category.id);

    let created = service
        .create_project(new_project, &staff)
        .await
        .expect("project created")
        .result;

    assert_eq!(created.project.title, "Compiler in Rust");
    assert_eq!(created.project.code, PROJECT_CODE_PLACEHOLDER);
    assert!(created.project.state);
    assert_eq!(created.staff.as_ref().map(|s| s.id), Some(staff.id));
    assert_eq!(created.category.as_ref().map(|c| c.name.as_str()), Some("Research"));
    assert!(created.type_project.is_none());
    assert!(created.season.is_none());

    let mut student_ids: Vec<i32> = created.students.iter().map(|s| s.id).collect();
    student_ids.sort();
    assert_eq!(student_ids, vec![alice.id, bob.id]);
}

#[tokio::test]
async fn create_project_rejects_duplicate_title() {
    let db = setup_db().await;
    let staff = seed_staff(&db, "Ada").await;
    let service = ProjectService::new(db);

    service
        .create_project(input("Weather Station", vec![]), &staff)
        .await
        .expect("first project created");

    let err = service
        .create_project(input("Weather Station", vec![]), &staff)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::BadRequest);
    assert_eq!(err.message(), "Project already exists");
}

#[tokio::test]
async fn title_comparison_is_case_sensitive() {
    let db = setup_db().await;
    let staff = seed_staff(&db, "Ada").await;
    let service = ProjectService::new(db);

    service
        .create_project(input("Weather Station", vec![]), &staff)
        .await
        .expect("first project created");

    service
        .create_project(input("weather station", vec![]), &staff)
        .await
        .expect("differently cased title is a different project");
}

#[tokio::test]
async fn create_project_with_unknown_student_leaves_nothing_behind() {
    let db = setup_db().await;
    let staff = seed_staff(&db, "Ada").await;
    let service = ProjectService::new(db);

    let err = service
        .create_project(input("Ghost Roster", vec![404]), &staff)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Internal);

    let page = service.list_projects(Pagination::new(1, 10)).await.unwrap();
    assert_eq!(page.total, 0);
}

#[tokio::test]
async fn update_project_replaces_roster_and_scalars() {
    let db = setup_db().await;
    let staff = seed_staff(&db, "Ada").await;
    let alice = seed_student(&db, "Alice", "S-001").await;
    let bob = seed_student(&db, "Bob", "S-002").await;
    let carol = seed_student(&db, "Carol", "S-003").await;
    let service = ProjectService::new(db);

    let created = service
        .create_project(input("Drone Mapping", vec![alice.id, bob.id]), &staff)
        .await
        .unwrap()
        .result;

    let mut update = changes("Drone Mapping");
    update.description = Some(Some("Aerial survey".to_string()));
    update.students = Some(vec![carol.id]);

    let updated = service
        .update_project(update, &staff, created.project.id)
        .await
        .expect("update with unchanged title succeeds")
        .result;

    assert_eq!(updated.project.description.as_deref(), Some("Aerial survey"));
    let student_ids: Vec<i32> = updated.students.iter().map(|s| s.id).collect();
    assert_eq!(student_ids, vec![carol.id]);
}

#[tokio::test]
async fn update_project_keeps_fields_it_does_not_mention() {
    let db = setup_db().await;
    let staff = seed_staff(&db, "Ada").await;
    let alice = seed_student(&db, "Alice", "S-001").await;
    let category = seed_category(&db, "Robotics").await;
    let service = ProjectService::new(db);

    let mut new_project = input("Robot Arm", vec![alice.id]);
    new_project.description = Some("keep me".to_string());
    new_project.category_id = Some(category.id);
    let created = service.create_project(new_project, &staff).await.unwrap().result;

    let updated = service
        .update_project(changes("Robot Arm v2"), &staff, created.project.id)
        .await
        .expect("title-only update succeeds")
        .result;

    assert_eq!(updated.project.title, "Robot Arm v2");
    assert_eq!(updated.project.description.as_deref(), Some("keep me"));
    assert_eq!(updated.category.map(|c| c.id), Some(category.id));
    let student_ids: Vec<i32> = updated.students.iter().map(|s| s.id).collect();
    assert_eq!(student_ids, vec![alice.id]);
}

#[tokio::test]
async fn update_project_clears_fields_set_to_none() {
    let db = setup_db().await;
    let staff = seed_staff(&db, "Ada").await;
    let alice = seed_student(&db, "Alice", "S-001").await;
    let category = seed_category(&db, "Robotics").await;
    let service = ProjectService::new(db);

    let mut new_project = input("Rover", vec![alice.id]);
    new_project.description = Some("six wheels".to_string());
    new_project.category_id = Some(category.id);
    let created = service.create_project(new_project, &staff).await.unwrap().result;

    let mut update = changes("Rover");
    update.category_id = Some(None);
    update.students = Some(vec![]);

    let updated = service
        .update_project(update, &staff, created.project.id)
        .await
        .unwrap()
        .result;

    assert!(updated.category.is_none());
    assert!(updated.students.is_empty());
    assert_eq!(updated.project.description.as_deref(), Some("six wheels"));
}

#[tokio::test]
async fn update_project_rejects_title_held_by_another_project() {
    let db = setup_db().await;
    let staff = seed_staff(&db, "Ada").await;
    let service = ProjectService::new(db);

    service
        .create_project(input("Solar Car", vec![]), &staff)
        .await
        .unwrap();
    let second = service
        .create_project(input("Smart Farm", vec![]), &staff)
        .await
        .unwrap()
        .result;

    let err = service
        .update_project(changes("Solar Car"), &staff, second.project.id)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::BadRequest);
    assert_eq!(err.message(), "A project with the same title already exists");
}

#[tokio::test]
async fn update_missing_project_is_a_client_error() {
    let db = setup_db().await;
    let staff = seed_staff(&db, "Ada").await;
    let service = ProjectService::new(db);

    let err = service
        .update_project(changes("Nowhere"), &staff, 99)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::BadRequest);
    assert_eq!(err.message(), "Project does not exist");
}

#[tokio::test]
async fn deleted_project_leaves_listing_but_stays_queryable() {
    let db = setup_db().await;
    let staff = seed_staff(&db, "Ada").await;
    let alice = seed_student(&db, "Alice", "S-001").await;
    let service = ProjectService::new(db);

    let created = service
        .create_project(input("Robot Arm", vec![alice.id]), &staff)
        .await
        .unwrap()
        .result;

    let message = service
        .delete_project(&staff, created.project.id)
        .await
        .expect("delete succeeds");
    assert_eq!(message.message, "Project deleted");

    let page = service.list_projects(Pagination::new(1, 10)).await.unwrap();
    assert_eq!(page.total, 0);
    assert!(page.items.is_empty());

    let found = service.find_project(created.project.id).await.unwrap().result;
    assert!(!found.project.state);
    assert_eq!(found.students.len(), 1);
    assert_eq!(found.staff.map(|s| s.id), Some(staff.id));
}

#[tokio::test]
async fn delete_missing_project_is_a_client_error() {
    let db = setup_db().await;
    let staff = seed_staff(&db, "Ada").await;
    let service = ProjectService::new(db);

    let err = service.delete_project(&staff, 12).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BadRequest);
    assert_eq!(err.message(), "Project does not exist");
}

#[tokio::test]
async fn listing_slices_pages_and_builds_links() {
    let db = setup_db().await;
    let staff = seed_staff(&db, "Ada").await;
    let service = ProjectService::new(db);

    for title in ["Alpha", "Beta", "Gamma"] {
        service.create_project(input(title, vec![]), &staff).await.unwrap();
    }

    let first = service.list_projects(Pagination::new(1, 2)).await.unwrap();
    assert_eq!(first.total, 3);
    assert_eq!(first.items.len(), 2);
    assert_eq!(first.next, "/api/project?page=2&limit=2");
    assert_eq!(first.prev, None);

    let second = service.list_projects(Pagination::new(2, 2)).await.unwrap();
    assert_eq!(second.total, 3);
    assert_eq!(second.items.len(), 1);
    assert_eq!(second.items[0].project.title, "Gamma");
    assert_eq!(second.next, "/api/project?page=3&limit=2");
    assert_eq!(second.prev.as_deref(), Some("/api/project?page=1&limit=2"));
}

#[tokio::test]
async fn listing_attaches_each_project_its_own_relations() {
    let db = setup_db().await;
    let staff = seed_staff(&db, "Ada").await;
    let alice = seed_student(&db, "Alice", "S-001").await;
    let bob = seed_student(&db, "Bob", "S-002").await;
    let carol = seed_student(&db, "Carol", "S-003").await;
    let research = seed_category(&db, "Research").await;
    let industry = seed_category(&db, "Industry").await;
    let service = ProjectService::new(db);

    let mut first = input("Compiler", vec![alice.id, bob.id]);
    first.category_id = Some(research.id);
    service.create_project(first, &staff).await.unwrap();

    service.create_project(input("No Relations", vec![]), &staff).await.unwrap();

    let mut third = input("Supply Chain", vec![carol.id]);
    third.category_id = Some(industry.id);
    service.create_project(third, &staff).await.unwrap();

    let page = service.list_projects(Pagination::new(1, 10)).await.unwrap();
    assert_eq!(page.total, 3);

    let summary: Vec<(&str, Option<i32>, Vec<i32>)> = page
        .items
        .iter()
        .map(|item| {
            let mut students: Vec<i32> = item.students.iter().map(|s| s.id).collect();
            students.sort();
            (
                item.project.title.as_str(),
                item.category.as_ref().map(|c| c.id),
                students,
            )
        })
        .collect();

    assert_eq!(
        summary,
        vec![
            ("Compiler", Some(research.id), vec![alice.id, bob.id]),
            ("No Relations", None, vec![]),
            ("Supply Chain", Some(industry.id), vec![carol.id]),
        ]
    );
    assert!(page.items.iter().all(|item| item.staff.as_ref().map(|s| s.id) == Some(staff.id)));
}
