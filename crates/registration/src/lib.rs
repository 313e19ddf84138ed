pub mod admin;
pub mod catalog;
pub mod error;
pub mod fees;
pub mod payment;
pub mod receipt;
pub mod store;
pub mod upload;
pub mod wizard;

pub use admin::{Dashboard, DashboardQuery, DashboardView, StatusFilter, Summary, load_dashboard};
pub use catalog::{AgeGroup, Event, EventCatalog};
pub use error::{Result, UploadError, WizardError};
pub use fees::{FeeBreakdown, fee_for_selection};
pub use payment::PaymentConfig;
pub use receipt::Receipt;
pub use store::{InMemoryRegistrationStore, RegistrationStore};
pub use upload::{CloudinaryClient, CloudinaryConfig, DocumentFile, DocumentSlot, MediaHost};
pub use wizard::{DraftUpdate, ParticipantDetails, RegistrationDraft, Step, Wizard};
