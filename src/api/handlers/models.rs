//! Handlers for the 3D model resource.
//!
//! One handler per operation: create, list, retrieve, replace, update,
//! delete and download.

use axum::{
    Json,
    body::Body,
    extract::{Multipart, State, multipart::MultipartRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tokio_util::io::ReaderStream;

use crate::api::dto::model::{ModelResponse, ReplaceModelRequest, UpdateModelRequest};
use crate::api::extractors::{AppPath, ModelBody};
use crate::api::multipart::{ModelForm, read_model_form};
use crate::application::services::ModelUpload;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::content_disposition;

/// Uploads a new 3D model.
///
/// # Endpoint
///
/// `POST /models`
///
/// # Request Body
///
/// `multipart/form-data` with:
/// - `file` (required) - the `.stl` or `.obj` file
/// - `name` (optional) - display name, defaults to the filename
///
/// # Response
///
/// `201 Created` with a `Location: /models/{id}` header:
///
/// ```json
/// {
///   "id": 1,
///   "name": "cube.STL",
///   "file": "/media/models/7f1c.../cube.STL",
///   "file_format": "stl",
///   "created_at": "2026-10-19T12:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// - 400 `{"error": "No file provided"}` when there is no `file` part, or the
///   request is not multipart at all
/// - 400 `{"error": "Invalid file format"}` for any extension other than `stl`/`obj`
/// - 400 with `details` when `name` or the filename fail validation, or the
///   file is empty
/// - 413 when the body exceeds `MAX_UPLOAD_SIZE`
pub async fn create_model_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, AppError> {
    let mut form = match multipart {
        Ok(multipart) => read_model_form(multipart).await?,
        Err(rejection) => {
            tracing::debug!(reason = %rejection.body_text(), "Upload is not a multipart request");
            ModelForm::default()
        }
    };
    let upload = ModelUpload {
        name: form.name.take(),
        file: form.file.take(),
    };

    let model = state.model_service.create(upload).await?;
    let location = format!("/models/{}", model.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ModelResponse::from_model(model, &state.media_url)),
    ))
}

/// Lists all models, newest first.
///
/// # Endpoint
///
/// `GET /models`
pub async fn list_models_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<ModelResponse>>, AppError> {
    let models = state.model_service.list().await?;

    Ok(Json(
        models
            .into_iter()
            .map(|m| ModelResponse::from_model(m, &state.media_url))
            .collect(),
    ))
}

/// Returns a single model.
///
/// # Endpoint
///
/// `GET /models/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if the model doesn't exist.
pub async fn get_model_handler(
    AppPath(id): AppPath<i64>,
    State(state): State<AppState>,
) -> Result<Json<ModelResponse>, AppError> {
    let model = state.model_service.get(id).await?;
    Ok(Json(ModelResponse::from_model(model, &state.media_url)))
}

/// Replaces a model's metadata, and optionally its file.
///
/// # Endpoint
///
/// `PUT /models/{id}`
///
/// # Request Body
///
/// JSON:
///
/// ```json
/// { "name": "Cube", "file_format": "stl" }
/// ```
///
/// or `multipart/form-data` with `name` and `file_format` text parts plus an
/// optional `file` part. A replacement file decides the new format and must
/// pass the same checks as an upload.
///
/// # Errors
///
/// - 400 if a field is missing, `name` is empty or longer than 255
///   characters, `file_format` is not `stl`/`obj` or contradicts the
///   replacement file, or the replacement file is rejected
/// - 404 if the model doesn't exist
pub async fn replace_model_handler(
    AppPath(id): AppPath<i64>,
    State(state): State<AppState>,
    body: ModelBody<ReplaceModelRequest>,
) -> Result<Json<ModelResponse>, AppError> {
    let model = match body {
        ModelBody::Json(payload) => {
            state
                .model_service
                .update(id, payload.into_patch()?, None)
                .await?
        }
        ModelBody::Multipart(multipart) => {
            let mut form = read_model_form(multipart).await?;
            let patch = ReplaceModelRequest::from_form(&mut form)?.into_patch()?;
            state
                .model_service
                .update(id, patch, form.file.take())
                .await?
        }
    };
    Ok(Json(ModelResponse::from_model(model, &state.media_url)))
}

/// Partially updates a model's metadata, and optionally its file.
///
/// # Endpoint
///
/// `PATCH /models/{id}`
///
/// # Request Body
///
/// All fields are optional. Only provided fields are changed.
///
/// ```json
/// { "name": "Renamed" }
/// ```
///
/// A multipart form with any of `name`, `file_format` and `file` is accepted
/// as well.
///
/// # Errors
///
/// Same as [`replace_model_handler`], except that no field is required.
pub async fn update_model_handler(
    AppPath(id): AppPath<i64>,
    State(state): State<AppState>,
    body: ModelBody<UpdateModelRequest>,
) -> Result<Json<ModelResponse>, AppError> {
    let model = match body {
        ModelBody::Json(payload) => {
            state
                .model_service
                .update(id, payload.into_patch()?, None)
                .await?
        }
        ModelBody::Multipart(multipart) => {
            let mut form = read_model_form(multipart).await?;
            let patch = UpdateModelRequest::from_form(&mut form).into_patch()?;
            state
                .model_service
                .update(id, patch, form.file.take())
                .await?
        }
    };
    Ok(Json(ModelResponse::from_model(model, &state.media_url)))
}

/// Deletes a model and its stored file.
///
/// # Endpoint
///
/// `DELETE /models/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if the model doesn't exist.
pub async fn delete_model_handler(
    AppPath(id): AppPath<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.model_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Streams a model's stored file as an attachment.
///
/// # Endpoint
///
/// `GET /models/{id}/download`
///
/// The body is streamed from disk; the file handle is released when the
/// body is dropped, whether it was fully sent or not.
///
/// # Errors
///
/// - 404 if the model doesn't exist
/// - 410 if the model exists but its stored file is missing
pub async fn download_model_handler(
    AppPath(id): AppPath<i64>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let (model, stored) = state.model_service.open_file(id).await?;

    let body = Body::from_stream(ReaderStream::new(stored.reader));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, model.file_format.content_type())
        .header(header::CONTENT_LENGTH, stored.size)
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition::attachment(model.file_name()),
        )
        .body(body)
        .map_err(|e| {
            AppError::internal(
                "Failed to build download response",
                json!({ "reason": e.to_string() }),
            )
        })
}
