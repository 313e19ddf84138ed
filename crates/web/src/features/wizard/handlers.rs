use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use registration::{DocumentFile, DocumentSlot, DraftUpdate, UploadError};
use uuid::Uuid;

use super::services::{self, PaymentView, WizardView};
use crate::error::WebError;
use crate::state::AppState;

const FILE_FIELD: &str = "file";

#[utoipa::path(
    post,
    path = "/api/wizards",
    responses(
        (status = 201, description = "Registration wizard started", body = WizardView)
    ),
    tag = "registration"
)]
pub async fn start_wizard(State(state): State<AppState>) -> Result<Response, WebError> {
    let view = services::start(&state).await;

    Ok((StatusCode::CREATED, Json(view)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/wizards/{id}",
    params(
        ("id" = Uuid, Path, description = "Wizard id")
    ),
    responses(
        (status = 200, description = "Current wizard state", body = WizardView),
        (status = 404, description = "Wizard not found")
    ),
    tag = "registration"
)]
pub async fn get_wizard(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let view = services::view(&state, id).await?;

    Ok(Json(view).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/wizards/{id}",
    params(
        ("id" = Uuid, Path, description = "Wizard id")
    ),
    responses(
        (status = 204, description = "Draft discarded"),
        (status = 404, description = "Wizard not found")
    ),
    tag = "registration"
)]
pub async fn discard_wizard(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::discard(&state, id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

#[utoipa::path(
    patch,
    path = "/api/wizards/{id}/details",
    params(
        ("id" = Uuid, Path, description = "Wizard id")
    ),
    request_body = DraftUpdate,
    responses(
        (status = 200, description = "Participant details updated", body = WizardView),
        (status = 404, description = "Wizard not found"),
        (status = 409, description = "Not on the participant details step, or already submitted")
    ),
    tag = "registration"
)]
pub async fn update_details(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<DraftUpdate>,
) -> Result<Response, WebError> {
    let view = services::update_details(&state, id, update).await?;

    Ok(Json(view).into_response())
}

#[utoipa::path(
    post,
    path = "/api/wizards/{id}/events/{event_id}",
    params(
        ("id" = Uuid, Path, description = "Wizard id"),
        ("event_id" = String, Path, description = "Event id such as U8_KB")
    ),
    responses(
        (status = 200, description = "Event added or removed", body = WizardView),
        (status = 400, description = "Unknown event"),
        (status = 404, description = "Wizard not found"),
        (status = 422, description = "Event limit reached or event outside the age band")
    ),
    tag = "registration"
)]
pub async fn toggle_event(
    State(state): State<AppState>,
    Path((id, event_id)): Path<(Uuid, String)>,
) -> Result<Response, WebError> {
    let view = services::toggle_event(&state, id, &event_id).await?;

    Ok(Json(view).into_response())
}

#[utoipa::path(
    post,
    path = "/api/wizards/{id}/next",
    params(
        ("id" = Uuid, Path, description = "Wizard id")
    ),
    responses(
        (status = 200, description = "Moved to the next step", body = WizardView),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Wizard not found"),
        (status = 422, description = "Step requirements not met")
    ),
    tag = "registration"
)]
pub async fn next_step(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let view = services::next(&state, id).await?;

    Ok(Json(view).into_response())
}

#[utoipa::path(
    post,
    path = "/api/wizards/{id}/back",
    params(
        ("id" = Uuid, Path, description = "Wizard id")
    ),
    responses(
        (status = 200, description = "Moved to the previous step", body = WizardView),
        (status = 404, description = "Wizard not found"),
        (status = 409, description = "Already at the first step")
    ),
    tag = "registration"
)]
pub async fn previous_step(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let view = services::back(&state, id).await?;

    Ok(Json(view).into_response())
}

async fn read_document(mut multipart: Multipart) -> Result<DocumentFile, WebError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| WebError::BadRequest(e.body_text()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| WebError::BadRequest(e.body_text()))?;

        return Ok(DocumentFile {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }

    Err(UploadError::MissingFile.into())
}

#[utoipa::path(
    post,
    path = "/api/wizards/{id}/documents/{slot}",
    params(
        ("id" = Uuid, Path, description = "Wizard id"),
        ("slot" = String, Path, description = "Document slot: aadhaar or dob")
    ),
    request_body(content_type = "multipart/form-data", description = "Form with a single `file` part"),
    responses(
        (status = 200, description = "Document stored", body = WizardView),
        (status = 400, description = "File too large or of an unsupported type"),
        (status = 404, description = "Wizard not found"),
        (status = 409, description = "Upload already in progress for this slot"),
        (status = 502, description = "Media host failure")
    ),
    tag = "registration"
)]
pub async fn upload_document(
    State(state): State<AppState>,
    Path((id, slot)): Path<(Uuid, String)>,
    multipart: Multipart,
) -> Result<Response, WebError> {
    let slot: DocumentSlot = slot.parse().map_err(WebError::BadRequest)?;
    let file = read_document(multipart).await?;

    let view = services::upload_document(&state, id, slot, file).await?;

    Ok(Json(view).into_response())
}

#[utoipa::path(
    post,
    path = "/api/wizards/{id}/payment",
    params(
        ("id" = Uuid, Path, description = "Wizard id")
    ),
    responses(
        (status = 200, description = "Registration saved and payment link issued", body = PaymentView),
        (status = 404, description = "Wizard not found"),
        (status = 409, description = "Not on the payment step"),
        (status = 500, description = "Registration could not be saved")
    ),
    tag = "registration"
)]
pub async fn initiate_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let payment = services::initiate_payment(&state, id).await?;

    Ok(Json(payment).into_response())
}

#[utoipa::path(
    post,
    path = "/api/wizards/{id}/payment/confirm",
    params(
        ("id" = Uuid, Path, description = "Wizard id")
    ),
    responses(
        (status = 200, description = "Moved to confirmation", body = WizardView),
        (status = 404, description = "Wizard not found"),
        (status = 409, description = "Payment not initiated")
    ),
    tag = "registration"
)]
pub async fn confirm_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let view = services::confirm_payment(&state, id).await?;

    Ok(Json(view).into_response())
}

#[utoipa::path(
    get,
    path = "/api/wizards/{id}/receipt",
    params(
        ("id" = Uuid, Path, description = "Wizard id")
    ),
    responses(
        (status = 200, description = "Plain-text receipt", content_type = "text/plain", body = String),
        (status = 404, description = "Wizard not found"),
        (status = 409, description = "Registration not yet confirmed")
    ),
    tag = "registration"
)]
pub async fn download_receipt(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let receipt = services::receipt(&state, id).await?;
    let disposition = format!("attachment; filename=\"{}\"", receipt.filename());

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        receipt.render(),
    )
        .into_response())
}
