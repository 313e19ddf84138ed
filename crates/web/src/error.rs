use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use registration::{UploadError, WizardError};
use serde_json::json;
use std::fmt;
use storage::error::StorageError;
use validator::ValidationErrors;

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Storage(StorageError),
    Validation(ValidationErrors),
    Wizard(WizardError),
    BadRequest(String),
    Unauthorized,
    NotFound,
    ServiceUnavailable(String),
    #[allow(dead_code)]
    InternalServerError(String),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "Storage error: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::Wizard(e) => write!(f, "Registration error: {}", e),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::Unauthorized => write!(f, "Unauthorized"),
            Self::NotFound => write!(f, "Resource not found"),
            Self::ServiceUnavailable(msg) => write!(f, "Service unavailable: {}", msg),
            Self::InternalServerError(msg) => write!(f, "Internal server error: {}", msg),
        }
    }
}

fn field_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |e| {
                format!(
                    "{}: {}",
                    field,
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                )
            })
        })
        .collect();
    messages.sort();
    messages
}

fn wizard_status(error: &WizardError) -> StatusCode {
    match error {
        WizardError::Validation(_) | WizardError::UnknownEvent(_) => StatusCode::BAD_REQUEST,
        WizardError::Capacity { .. }
        | WizardError::IneligibleEvent { .. }
        | WizardError::AgeGroupMissing
        | WizardError::NoEventsSelected
        | WizardError::DocumentsMissing => StatusCode::UNPROCESSABLE_ENTITY,
        WizardError::UploadInProgress(_)
        | WizardError::PaymentNotInitiated
        | WizardError::AlreadySubmitted
        | WizardError::AtFirstStep
        | WizardError::WrongStep { .. } => StatusCode::CONFLICT,
        WizardError::Upload(e) if e.is_local() => StatusCode::BAD_REQUEST,
        WizardError::Upload(_) => StatusCode::BAD_GATEWAY,
        WizardError::Persistence(_) | WizardError::PaymentLink(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn wizard_body(error: &WizardError) -> serde_json::Value {
    match error {
        WizardError::Validation(errors) => json!({
            "error": "Validation failed",
            "details": field_messages(errors)
        }),
        WizardError::Upload(e) if e.is_local() => json!({
            "error": e.to_string()
        }),
        WizardError::Upload(e) => {
            tracing::warn!("Document upload failed: {}", e);
            json!({
                "error": "Upload failed. Please try again."
            })
        }
        WizardError::Persistence(e) => {
            tracing::error!("Failed to persist registration: {:?}", e);
            json!({
                "error": "Failed to initiate payment. Please try again."
            })
        }
        WizardError::PaymentLink(msg) => {
            tracing::error!("Failed to build payment link: {}", msg);
            json!({
                "error": "Failed to initiate payment. Please try again."
            })
        }
        other => json!({
            "error": other.to_string()
        }),
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            Self::Storage(StorageError::NotFound) => StatusCode::NOT_FOUND,
            Self::Storage(StorageError::ConstraintViolation(_)) => StatusCode::CONFLICT,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Wizard(e) => wizard_status(e),
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = match &self {
            Self::Storage(StorageError::NotFound) => {
                json!({
                    "error": "Resource not found"
                })
            }
            Self::Storage(StorageError::ConstraintViolation(msg)) => {
                json!({
                    "error": msg
                })
            }
            Self::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                json!({
                    "error": "An internal error occurred"
                })
            }
            Self::Validation(errors) => {
                json!({
                    "error": "Validation failed",
                    "details": field_messages(errors)
                })
            }
            Self::Wizard(e) => wizard_body(e),
            Self::BadRequest(msg) => {
                json!({
                    "error": msg
                })
            }
            Self::Unauthorized => {
                json!({
                    "error": "Unauthorized"
                })
            }
            Self::NotFound => {
                json!({
                    "error": "Resource not found"
                })
            }
            Self::ServiceUnavailable(msg) => {
                json!({
                    "error": msg
                })
            }
            Self::InternalServerError(msg) => {
                tracing::error!("Internal server error: {}", msg);
                json!({
                    "error": "An internal error occurred"
                })
            }
        };

        (status_code, Json(body)).into_response()
    }
}

impl From<StorageError> for WebError {
    fn from(error: StorageError) -> Self {
        Self::Storage(error)
    }
}

impl From<ValidationErrors> for WebError {
    fn from(error: ValidationErrors) -> Self {
        Self::Validation(error)
    }
}

impl From<WizardError> for WebError {
    fn from(error: WizardError) -> Self {
        Self::Wizard(error)
    }
}

impl From<UploadError> for WebError {
    fn from(error: UploadError) -> Self {
        Self::Wizard(WizardError::Upload(error))
    }
}

pub type ApiResult<T> = Result<T, WebError>;
