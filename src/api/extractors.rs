//! Extractors that report rejections as [`AppError`] JSON bodies.

use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts, Multipart, Path, Request,
        rejection::PathRejection,
    },
    http::{header, request::Parts},
};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::error::AppError;

/// A `Path<T>` wrapper where an unparsable segment (e.g. `/models/abc`)
/// is treated as an unknown resource and answered with `404 Not Found`.
pub struct AppPath<T>(pub T);

impl<S, T> FromRequestParts<S> for AppPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e: PathRejection| {
                AppError::not_found("Not found", json!({ "reason": e.body_text() }))
            })?;
        Ok(AppPath(value))
    }
}

/// Body of a metadata update: either JSON, or a multipart form that may also
/// carry a replacement `file`.
pub enum ModelBody<T> {
    Json(T),
    Multipart(Multipart),
}

impl<S, T> FromRequest<S> for ModelBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.to_ascii_lowercase().starts_with("multipart/form-data"));

        if is_multipart {
            let multipart = Multipart::from_request(req, state).await.map_err(|e| {
                AppError::bad_request("Invalid request body", json!({ "reason": e.body_text() }))
            })?;
            return Ok(ModelBody::Multipart(multipart));
        }

        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|e| {
            AppError::bad_request("Invalid request body", json!({ "reason": e.body_text() }))
        })?;
        Ok(ModelBody::Json(value))
    }
}
