use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::features::{admin, catalog, wizard};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        catalog::handlers::get_info,
        catalog::handlers::list_events,
        wizard::handlers::start_wizard,
        wizard::handlers::get_wizard,
        wizard::handlers::discard_wizard,
        wizard::handlers::update_details,
        wizard::handlers::toggle_event,
        wizard::handlers::next_step,
        wizard::handlers::previous_step,
        wizard::handlers::upload_document,
        wizard::handlers::initiate_payment,
        wizard::handlers::confirm_payment,
        wizard::handlers::download_receipt,
        admin::handlers::sign_in,
        admin::handlers::sign_out,
        admin::handlers::list_registrations,
        admin::handlers::export_registrations,
        admin::handlers::get_registration,
    ),
    components(
        schemas(
            catalog::services::InfoResponse,
            catalog::services::AgeGroupEvents,
            wizard::services::WizardView,
            wizard::services::PaymentView,
            admin::services::AdminLoginRequest,
            admin::services::AdminSessionResponse,
            registration::AgeGroup,
            registration::Event,
            registration::Step,
            registration::DraftUpdate,
            registration::ParticipantDetails,
            registration::RegistrationDraft,
            registration::FeeBreakdown,
            registration::DocumentSlot,
            registration::StatusFilter,
            registration::Summary,
            registration::DashboardView,
            registration::wizard::UploadProgress,
            storage::models::Registration,
            storage::models::Attachments,
            storage::models::PaymentRef,
            storage::models::PaymentStatus,
        )
    ),
    tags(
        (name = "catalog", description = "Public competition and event endpoints"),
        (name = "registration", description = "Registration wizard endpoints"),
        (name = "admin", description = "Registration review and export"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("Admin session token")
                        .build(),
                ),
            )
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .merge(catalog::routes::routes())
        .nest("/wizards", wizard::routes::routes())
        .nest("/admin", admin::routes::routes(state.clone()));

    Router::new()
        .nest("/api", api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
