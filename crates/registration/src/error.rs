use storage::error::StorageError;
use thiserror::Error;
use validator::ValidationErrors;

use crate::upload::{DocumentSlot, MAX_FILE_SIZE_MB};
use crate::wizard::Step;

pub type Result<T> = std::result::Result<T, WizardError>;

#[derive(Error, Debug)]
pub enum WizardError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("You can select a maximum of {max} events")]
    Capacity { max: usize },

    #[error("Unknown event: '{0}'")]
    UnknownEvent(String),

    #[error("Event '{event_id}' is not available for age group {age_group}")]
    IneligibleEvent { event_id: String, age_group: String },

    #[error("Please select an age group first")]
    AgeGroupMissing,

    #[error("Please select at least one event")]
    NoEventsSelected,

    #[error("Please upload both documents")]
    DocumentsMissing,

    #[error("{0} upload is already in progress")]
    UploadInProgress(DocumentSlot),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error("Failed to initiate payment: {0}")]
    Persistence(#[from] StorageError),

    #[error("Failed to build payment link: {0}")]
    PaymentLink(String),

    #[error("Payment has not been initiated yet")]
    PaymentNotInitiated,

    #[error("Registration has already been submitted")]
    AlreadySubmitted,

    #[error("Already at the first step")]
    AtFirstStep,

    #[error("Not available during the {current} step")]
    WrongStep { current: Step },
}

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("File size must be less than {}MB", MAX_FILE_SIZE_MB)]
    TooLarge { size: usize },

    #[error("Only JPG, PNG, and PDF files are allowed")]
    UnsupportedType(String),

    #[error("No file was provided")]
    MissingFile,

    #[error("Upload request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Media host rejected the upload ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("Media host response did not contain a file URL")]
    MissingUrl,
}

impl UploadError {
    /// Whether the file was refused before reaching the media host
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::TooLarge { .. } | Self::UnsupportedType(_) | Self::MissingFile
        )
    }
}
