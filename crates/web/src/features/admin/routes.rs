use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::handlers::{
    export_registrations, get_registration, list_registrations, sign_in, sign_out,
};
use crate::middleware::auth::require_admin;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/registrations", get(list_registrations))
        .route("/registrations/export", get(export_registrations))
        .route("/registrations/:reg_id", get(get_registration))
        .route_layer(middleware::from_fn_with_state(state, require_admin));

    Router::new()
        .route("/session", post(sign_in).delete(sign_out))
        .merge(protected)
}
