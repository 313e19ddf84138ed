use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use registration::{DashboardQuery, DashboardView};
use storage::models::Registration;

use super::services::{self, AdminLoginRequest, AdminSessionResponse};
use crate::error::WebError;
use crate::middleware::auth::bearer_token;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/admin/session",
    request_body = AdminLoginRequest,
    responses(
        (status = 201, description = "Admin session started", body = AdminSessionResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid API key")
    ),
    tag = "admin"
)]
pub async fn sign_in(
    State(state): State<AppState>,
    Json(req): Json<AdminLoginRequest>,
) -> Result<Response, WebError> {
    let session = services::sign_in(&state, &req).await?;

    Ok((StatusCode::CREATED, Json(session)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/admin/session",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Admin session ended"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "admin"
)]
pub async fn sign_out(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, WebError> {
    let token = bearer_token(&headers).ok_or(WebError::Unauthorized)?;
    services::sign_out(&state, &token).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

#[utoipa::path(
    get,
    path = "/api/admin/registrations",
    params(DashboardQuery),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Filtered registrations with overall counters", body = DashboardView),
        (status = 401, description = "Unauthorized")
    ),
    tag = "admin"
)]
pub async fn list_registrations(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Response, WebError> {
    let view = services::dashboard(&state, &query).await;

    Ok(Json(view).into_response())
}

#[utoipa::path(
    get,
    path = "/api/admin/registrations/export",
    params(DashboardQuery),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "CSV of the filtered registrations", content_type = "text/csv", body = String),
        (status = 401, description = "Unauthorized"),
        (status = 503, description = "Registrations could not be loaded")
    ),
    tag = "admin"
)]
pub async fn export_registrations(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Response, WebError> {
    let export = services::export(&state, &query).await?;
    let disposition = format!("attachment; filename=\"{}\"", export.filename);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export.body,
    )
        .into_response())
}

#[utoipa::path(
    get,
    path = "/api/admin/registrations/{reg_id}",
    params(
        ("reg_id" = String, Path, description = "Registration id such as SWIM-3F9A0C7D12E4B8A1")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Registration found", body = Registration),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Registration not found")
    ),
    tag = "admin"
)]
pub async fn get_registration(
    State(state): State<AppState>,
    Path(reg_id): Path<String>,
) -> Result<Response, WebError> {
    let registration = services::registration(&state, &reg_id).await?;

    Ok(Json(registration).into_response())
}
