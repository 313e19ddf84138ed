use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
};
use registration::upload::MAX_FILE_SIZE;

use super::handlers::{
    confirm_payment, discard_wizard, download_receipt, get_wizard, initiate_payment,
    next_step, previous_step, start_wizard, toggle_event, update_details, upload_document,
};
use crate::state::AppState;

/// Headroom over the file limit for multipart framing, so oversized files
/// reach `validate_file` and get its message
const UPLOAD_BODY_LIMIT: usize = MAX_FILE_SIZE + 1024 * 1024;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(start_wizard))
        .route("/:id", get(get_wizard).delete(discard_wizard))
        .route("/:id/details", patch(update_details))
        .route("/:id/events/:event_id", post(toggle_event))
        .route("/:id/next", post(next_step))
        .route("/:id/back", post(previous_step))
        .route(
            "/:id/documents/:slot",
            post(upload_document).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/:id/payment", post(initiate_payment))
        .route("/:id/payment/confirm", post(confirm_payment))
        .route("/:id/receipt", get(download_receipt))
}
