//! PostgreSQL repository tests. Run with `cargo test -- --ignored` against a
//! database reachable through `DATABASE_URL`.

use model3d_api::domain::entities::{FileFormat, Model3DPatch, NewModel3D};
use model3d_api::domain::repositories::ModelRepository;
use model3d_api::infrastructure::persistence::PgModelRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn new_model(name: &str, file: &str, file_format: FileFormat) -> NewModel3D {
    NewModel3D {
        name: name.to_string(),
        file: file.to_string(),
        file_format,
    }
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_create_model(pool: PgPool) {
    let repo = PgModelRepository::new(Arc::new(pool));

    let model = repo
        .create(new_model("Cube", "models/a/cube.stl", FileFormat::Stl))
        .await
        .unwrap();

    assert!(model.id > 0);
    assert_eq!(model.name, "Cube");
    assert_eq!(model.file, "models/a/cube.stl");
    assert_eq!(model.file_format, FileFormat::Stl);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_find_by_id(pool: PgPool) {
    let repo = PgModelRepository::new(Arc::new(pool));
    let created = repo
        .create(new_model("Scene", "models/b/scene.obj", FileFormat::Obj))
        .await
        .unwrap();

    let found = repo.find_by_id(created.id).await.unwrap();

    let found = found.unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.file_format, FileFormat::Obj);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_find_by_id_not_found(pool: PgPool) {
    let repo = PgModelRepository::new(Arc::new(pool));

    let result = repo.find_by_id(999_999).await;

    assert!(result.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_list_newest_first(pool: PgPool) {
    let repo = PgModelRepository::new(Arc::new(pool));
    repo.create(new_model("First", "models/c/first.stl", FileFormat::Stl))
        .await
        .unwrap();
    repo.create(new_model("Second", "models/d/second.obj", FileFormat::Obj))
        .await
        .unwrap();

    let models = repo.list().await.unwrap();

    assert_eq!(models.len(), 2);
    assert_eq!(models[0].name, "Second");
    assert_eq!(models[1].name, "First");
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_update_partial(pool: PgPool) {
    let repo = PgModelRepository::new(Arc::new(pool));
    let created = repo
        .create(new_model("Cube", "models/e/cube.stl", FileFormat::Stl))
        .await
        .unwrap();

    let patch = Model3DPatch {
        name: Some("Renamed".to_string()),
        ..Default::default()
    };
    let updated = repo.update(created.id, patch).await.unwrap().unwrap();

    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.file_format, FileFormat::Stl);
    assert_eq!(updated.file, created.file);
    assert_eq!(updated.created_at, created.created_at);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_update_replaces_file(pool: PgPool) {
    let repo = PgModelRepository::new(Arc::new(pool));
    let created = repo
        .create(new_model("Cube", "models/h/cube.stl", FileFormat::Stl))
        .await
        .unwrap();

    let patch = Model3DPatch {
        file: Some("models/i/cube.obj".to_string()),
        file_format: Some(FileFormat::Obj),
        ..Default::default()
    };
    let updated = repo.update(created.id, patch).await.unwrap().unwrap();

    assert_eq!(updated.name, "Cube");
    assert_eq!(updated.file, "models/i/cube.obj");
    assert_eq!(updated.file_format, FileFormat::Obj);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_update_missing_row(pool: PgPool) {
    let repo = PgModelRepository::new(Arc::new(pool));

    let patch = Model3DPatch {
        name: Some("Ghost".to_string()),
        ..Default::default()
    };

    assert!(repo.update(424_242, patch).await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_delete_returns_removed_row(pool: PgPool) {
    let repo = PgModelRepository::new(Arc::new(pool));
    let created = repo
        .create(new_model("Cube", "models/f/cube.stl", FileFormat::Stl))
        .await
        .unwrap();

    let deleted = repo.delete(created.id).await.unwrap().unwrap();
    assert_eq!(deleted.file, "models/f/cube.stl");

    assert!(repo.find_by_id(created.id).await.unwrap().is_none());
    assert!(repo.delete(created.id).await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_file_format_check_constraint(pool: PgPool) {
    let result = sqlx::query("INSERT INTO models (name, file, file_format) VALUES ($1, $2, $3)")
        .bind("Bad")
        .bind("models/g/bad.fbx")
        .bind("fbx")
        .execute(&pool)
        .await;

    assert!(result.is_err());
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_ping(pool: PgPool) {
    let repo = PgModelRepository::new(Arc::new(pool));

    assert!(repo.ping().await.is_ok());
}
