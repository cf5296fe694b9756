#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum_test::TestServer;
use axum_test::multipart::{MultipartForm, Part};
use chrono::Utc;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use model3d_api::api::routes::model_routes;
use model3d_api::application::services::ModelService;
use model3d_api::domain::entities::{Model3D, Model3DPatch, NewModel3D};
use model3d_api::domain::repositories::ModelRepository;
use model3d_api::error::AppError;
use model3d_api::infrastructure::storage::LocalFileStorage;
use model3d_api::state::AppState;

pub const MAX_UPLOAD_SIZE: usize = 1024 * 1024;

/// Record storage kept in memory, so HTTP tests run without PostgreSQL.
#[derive(Default)]
pub struct InMemoryModelRepository {
    rows: Mutex<Vec<Model3D>>,
    next_id: AtomicI64,
    fail_inserts: AtomicBool,
}

impl InMemoryModelRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `create` fail with a database error.
    pub fn fail_inserts(&self) {
        self.fail_inserts.store(true, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl ModelRepository for InMemoryModelRepository {
    async fn create(&self, new_model: NewModel3D) -> Result<Model3D, AppError> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(AppError::internal("Database error", Value::Null));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let model = Model3D::new(
            id,
            new_model.name,
            new_model.file,
            new_model.file_format,
            Utc::now(),
        );
        self.rows.lock().unwrap().push(model.clone());
        Ok(model)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Model3D>, AppError> {
        Ok(self.rows.lock().unwrap().iter().find(|m| m.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Model3D>, AppError> {
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(rows)
    }

    async fn update(&self, id: i64, patch: Model3DPatch) -> Result<Option<Model3D>, AppError> {
        let mut rows = self.rows.lock().unwrap();
        let Some(model) = rows.iter_mut().find(|m| m.id == id) else {
            return Ok(None);
        };
        if let Some(name) = patch.name {
            model.name = name;
        }
        if let Some(file) = patch.file {
            model.file = file;
        }
        if let Some(file_format) = patch.file_format {
            model.file_format = file_format;
        }
        Ok(Some(model.clone()))
    }

    async fn delete(&self, id: i64) -> Result<Option<Model3D>, AppError> {
        let mut rows = self.rows.lock().unwrap();
        let position = rows.iter().position(|m| m.id == id);
        Ok(position.map(|i| rows.remove(i)))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// Everything a handler test needs; the temp dir lives as long as this does.
pub struct TestApp {
    pub server: TestServer,
    pub repository: Arc<InMemoryModelRepository>,
    pub media: TempDir,
}

pub async fn create_test_state() -> (AppState, Arc<InMemoryModelRepository>, TempDir) {
    let media = tempfile::tempdir().unwrap();
    let storage = LocalFileStorage::new(media.path()).await.unwrap();
    let repository = Arc::new(InMemoryModelRepository::new());

    let service = ModelService::new(repository.clone(), Arc::new(storage));
    let state = AppState::new(Arc::new(service), "/media");

    (state, repository, media)
}

pub async fn make_app() -> TestApp {
    let (state, repository, media) = create_test_state().await;
    let app = Router::new()
        .merge(model_routes(MAX_UPLOAD_SIZE))
        .with_state(state);

    TestApp {
        server: TestServer::new(app).unwrap(),
        repository,
        media,
    }
}

pub fn file_form(file_name: &str, data: &[u8]) -> MultipartForm {
    MultipartForm::new().add_part(
        "file",
        Part::bytes(data.to_vec())
            .file_name(file_name)
            .mime_type("application/octet-stream"),
    )
}

pub const CUBE_STL: &[u8] = b"solid cube\n  facet normal 0 0 1\n  endfacet\nendsolid cube\n";
pub const SCENE_OBJ: &[u8] = b"v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
