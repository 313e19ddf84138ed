use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use registration::AgeGroup;
use serde::Deserialize;
use utoipa::IntoParams;

use super::services::{self, AgeGroupEvents, InfoResponse};
use crate::error::WebError;
use crate::state::AppState;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EventsQuery {
    /// Age band such as `U-8`
    pub age_group: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/info",
    responses(
        (status = 200, description = "Competition details and fee table", body = InfoResponse)
    ),
    tag = "catalog"
)]
pub async fn get_info(State(state): State<AppState>) -> Result<Response, WebError> {
    Ok(Json(services::info(&state.catalog)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/events",
    params(EventsQuery),
    responses(
        (status = 200, description = "Events grouped by age band", body = Vec<AgeGroupEvents>),
        (status = 400, description = "Unknown age group")
    ),
    tag = "catalog"
)]
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventsQuery>,
) -> Result<Response, WebError> {
    let age_group = query
        .age_group
        .as_deref()
        .map(str::parse::<AgeGroup>)
        .transpose()
        .map_err(|e| WebError::BadRequest(e.to_string()))?;

    Ok(Json(services::list_events(&state.catalog, age_group)).into_response())
}
