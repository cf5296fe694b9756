//! DTOs for the model resource endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use validator::Validate;

use crate::api::multipart::ModelForm;
use crate::domain::entities::{FileFormat, Model3D, Model3DPatch};
use crate::error::AppError;

/// JSON representation of a stored model.
///
/// `file` is the public URL of the stored content (`{MEDIA_URL}/{path}`).
#[derive(Debug, Serialize)]
pub struct ModelResponse {
    pub id: i64,
    pub name: String,
    pub file: String,
    pub file_format: FileFormat,
    pub created_at: DateTime<Utc>,
}

impl ModelResponse {
    pub fn from_model(model: Model3D, media_url: &str) -> Self {
        Self {
            id: model.id,
            name: model.name,
            file: format!("{}/{}", media_url.trim_end_matches('/'), model.file),
            file_format: model.file_format,
            created_at: model.created_at,
        }
    }
}

/// Request body for `PUT /models/{id}`. Both fields are required.
#[derive(Debug, Deserialize, Validate)]
pub struct ReplaceModelRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    pub file_format: String,
}

impl ReplaceModelRequest {
    /// Takes both fields from a multipart form.
    pub fn from_form(form: &mut ModelForm) -> Result<Self, AppError> {
        match (form.name.take(), form.file_format.take()) {
            (Some(name), Some(file_format)) => Ok(Self { name, file_format }),
            _ => Err(AppError::bad_request(
                "Invalid request body",
                json!({ "reason": "Both `name` and `file_format` are required" }),
            )),
        }
    }

    /// Validates the body and converts it into a patch touching every field.
    pub fn into_patch(self) -> Result<Model3DPatch, AppError> {
        self.validate()?;
        Ok(Model3DPatch {
            name: Some(self.name),
            file: None,
            file_format: Some(parse_format(&self.file_format)?),
        })
    }
}

/// Request body for `PATCH /models/{id}`.
///
/// All fields are optional; only provided fields are changed. A replacement
/// file can be sent alongside these fields as a multipart form.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateModelRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    pub file_format: Option<String>,
}

impl UpdateModelRequest {
    /// Takes whichever fields a multipart form carries.
    pub fn from_form(form: &mut ModelForm) -> Self {
        Self {
            name: form.name.take(),
            file_format: form.file_format.take(),
        }
    }

    /// Validates the body and converts it into a patch.
    pub fn into_patch(self) -> Result<Model3DPatch, AppError> {
        self.validate()?;
        Ok(Model3DPatch {
            name: self.name,
            file: None,
            file_format: self.file_format.as_deref().map(parse_format).transpose()?,
        })
    }
}

/// Applies the upload allow-list to a format supplied on update.
fn parse_format(raw: &str) -> Result<FileFormat, AppError> {
    raw.parse()
        .map_err(|_| AppError::bad_request("Invalid file format", Value::Null))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_prefixes_media_url() {
        let model = Model3D::new(
            4,
            "Cube".to_string(),
            "models/abc/cube.stl".to_string(),
            FileFormat::Stl,
            Utc::now(),
        );

        let response = ModelResponse::from_model(model, "/media/");
        assert_eq!(response.file, "/media/models/abc/cube.stl");

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["file_format"], "stl");
        assert_eq!(json["id"], 4);
    }

    #[test]
    fn test_update_request_accepts_known_format_any_case() {
        let req: UpdateModelRequest = serde_json::from_value(json!({ "file_format": "OBJ" })).unwrap();
        let patch = req.into_patch().unwrap();

        assert_eq!(patch.file_format, Some(FileFormat::Obj));
        assert!(patch.name.is_none());
    }

    #[test]
    fn test_update_request_rejects_unknown_format() {
        let req: UpdateModelRequest = serde_json::from_value(json!({ "file_format": "fbx" })).unwrap();
        let err = req.into_patch().unwrap_err();

        assert_eq!(err.to_string(), "Invalid file format");
    }

    #[test]
    fn test_update_request_rejects_empty_name() {
        let req: UpdateModelRequest = serde_json::from_value(json!({ "name": "" })).unwrap();
        assert!(matches!(req.into_patch(), Err(AppError::Validation { .. })));
    }

    #[test]
    fn test_update_request_empty_body_is_empty_patch() {
        let req: UpdateModelRequest = serde_json::from_value(json!({})).unwrap();
        assert!(req.into_patch().unwrap().is_empty());
    }

    #[test]
    fn test_replace_request_from_form_requires_both_fields() {
        let mut form = ModelForm::default();
        form.name = Some("Cube".to_string());
        let err = ReplaceModelRequest::from_form(&mut form).unwrap_err();
        assert_eq!(err.to_string(), "Invalid request body");

        let mut form = ModelForm::default();
        form.name = Some("Cube".to_string());
        form.file_format = Some("obj".to_string());
        let req = ReplaceModelRequest::from_form(&mut form).unwrap();
        assert_eq!(req.file_format, "obj");
        assert!(form.name.is_none());
    }

    #[test]
    fn test_replace_request_requires_both_fields() {
        assert!(serde_json::from_value::<ReplaceModelRequest>(json!({ "name": "x" })).is_err());

        let req: ReplaceModelRequest =
            serde_json::from_value(json!({ "name": "Cube", "file_format": "stl" })).unwrap();
        let patch = req.into_patch().unwrap();
        assert_eq!(patch.name.as_deref(), Some("Cube"));
        assert_eq!(patch.file_format, Some(FileFormat::Stl));
    }
}
