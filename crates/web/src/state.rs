use registration::{EventCatalog, MediaHost, PaymentConfig, RegistrationStore};
use std::sync::Arc;

use crate::features::wizard::sessions::WizardSessions;
use crate::middleware::auth::{AdminSessions, ApiKeys};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RegistrationStore>,
    pub media: Arc<dyn MediaHost>,
    pub catalog: EventCatalog,
    pub payment: Arc<PaymentConfig>,
    pub wizards: WizardSessions,
    pub admin_sessions: AdminSessions,
    pub api_keys: ApiKeys,
}

impl AppState {
    pub fn new(
        store: Arc<dyn RegistrationStore>,
        media: Arc<dyn MediaHost>,
        payment: PaymentConfig,
        api_keys: ApiKeys,
    ) -> Self {
        Self {
            store,
            media,
            catalog: EventCatalog::standard(),
            payment: Arc::new(payment),
            wizards: WizardSessions::new(),
            admin_sessions: AdminSessions::new(),
            api_keys,
        }
    }
}
