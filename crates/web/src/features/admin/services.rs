use chrono::Utc;
use registration::admin::export_filename;
use registration::{DashboardQuery, DashboardView, load_dashboard};
use serde::{Deserialize, Serialize};
use storage::models::Registration;
use tracing::{info, warn};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{ApiResult, WebError};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AdminLoginRequest {
    #[validate(length(min = 1, message = "API key is required"))]
    pub api_key: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminSessionResponse {
    pub token: String,
}

pub struct CsvExport {
    pub filename: String,
    pub body: String,
}

/// Trade a valid API key for a session token
pub async fn sign_in(state: &AppState, request: &AdminLoginRequest) -> ApiResult<AdminSessionResponse> {
    request.validate()?;

    if !state.api_keys.is_valid(&request.api_key) {
        warn!("Rejected admin sign-in with invalid API key");
        return Err(WebError::Unauthorized);
    }

    let token = state.admin_sessions.create().await;
    info!("Admin session started");
    Ok(AdminSessionResponse { token })
}

pub async fn sign_out(state: &AppState, token: &str) -> ApiResult<()> {
    let session = state
        .admin_sessions
        .end(token)
        .await
        .ok_or(WebError::Unauthorized)?;

    let minutes = (Utc::now() - session.started_at).num_minutes();
    info!("Admin session ended after {} minutes", minutes);
    Ok(())
}

pub async fn dashboard(state: &AppState, query: &DashboardQuery) -> DashboardView {
    load_dashboard(state.store.as_ref()).await.view(query)
}

pub async fn registration(state: &AppState, reg_id: &str) -> ApiResult<Registration> {
    Ok(state.store.find_by_reg_id(reg_id).await?)
}

/// Fails instead of producing a header-only file when the store could not be read
pub async fn export(state: &AppState, query: &DashboardQuery) -> ApiResult<CsvExport> {
    let dashboard = load_dashboard(state.store.as_ref()).await;
    if let Some(notice) = &dashboard.notice {
        return Err(WebError::ServiceUnavailable(notice.clone()));
    }

    Ok(CsvExport {
        filename: export_filename(Utc::now().date_naive()),
        body: dashboard.export(query),
    })
}
