use registration::upload::validate_file;
use registration::wizard::UploadProgress;
use registration::{
    DocumentFile, DocumentSlot, DraftUpdate, Event, FeeBreakdown, Receipt, RegistrationDraft,
    Step, Wizard, fee_for_selection,
};
use serde::Serialize;
use tracing::{info, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use super::sessions::WizardHandle;
use crate::error::{ApiResult, WebError};
use crate::state::AppState;

/// Snapshot of a wizard returned after every action
#[derive(Debug, Serialize, ToSchema)]
pub struct WizardView {
    pub id: Uuid,
    pub step: Step,
    pub step_title: String,
    pub step_number: usize,
    pub total_steps: usize,
    pub progress_percent: u8,
    pub draft: RegistrationDraft,
    pub uploading: UploadProgress,
    pub available_events: Vec<Event>,
    /// Fee for the current selection
    pub fees: Option<FeeBreakdown>,
}

impl WizardView {
    pub fn of(id: Uuid, wizard: &Wizard) -> Self {
        let draft = wizard.draft().clone();
        let fees = draft
            .fees
            .or_else(|| fee_for_selection(&draft.selected_events, wizard.catalog()).ok());

        Self {
            id,
            step: wizard.step(),
            step_title: wizard.step().title().to_string(),
            step_number: wizard.step().index() + 1,
            total_steps: Step::ALL.len(),
            progress_percent: wizard.progress_percent(),
            draft,
            uploading: wizard.uploads(),
            available_events: wizard.available_events().into_iter().copied().collect(),
            fees,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentView {
    pub reg_id: String,
    pub fees: FeeBreakdown,
    pub upi_link: String,
    pub qr_url: String,
}

async fn handle(state: &AppState, id: Uuid) -> ApiResult<WizardHandle> {
    state.wizards.get(id).await.ok_or(WebError::NotFound)
}

pub async fn start(state: &AppState) -> WizardView {
    let (id, handle) = state.wizards.create(state.catalog).await;
    info!("Started registration wizard {}", id);

    let wizard = handle.lock().await;
    WizardView::of(id, &wizard)
}

pub async fn view(state: &AppState, id: Uuid) -> ApiResult<WizardView> {
    let handle = handle(state, id).await?;
    let wizard = handle.lock().await;
    Ok(WizardView::of(id, &wizard))
}

pub async fn discard(state: &AppState, id: Uuid) -> ApiResult<()> {
    if state.wizards.remove(id).await {
        info!("Discarded registration wizard {}", id);
        Ok(())
    } else {
        Err(WebError::NotFound)
    }
}

pub async fn update_details(
    state: &AppState,
    id: Uuid,
    update: DraftUpdate,
) -> ApiResult<WizardView> {
    let handle = handle(state, id).await?;
    let mut wizard = handle.lock().await;
    wizard.update(update)?;
    Ok(WizardView::of(id, &wizard))
}

pub async fn toggle_event(state: &AppState, id: Uuid, event_id: &str) -> ApiResult<WizardView> {
    let handle = handle(state, id).await?;
    let mut wizard = handle.lock().await;
    wizard.toggle_event(event_id)?;
    Ok(WizardView::of(id, &wizard))
}

pub async fn next(state: &AppState, id: Uuid) -> ApiResult<WizardView> {
    let handle = handle(state, id).await?;
    let mut wizard = handle.lock().await;
    wizard.next()?;
    Ok(WizardView::of(id, &wizard))
}

pub async fn back(state: &AppState, id: Uuid) -> ApiResult<WizardView> {
    let handle = handle(state, id).await?;
    let mut wizard = handle.lock().await;
    wizard.back()?;
    Ok(WizardView::of(id, &wizard))
}

/// Upload one proof document.
///
/// The wizard lock is released while the media host call runs so the other
/// slot can upload at the same time.
pub async fn upload_document(
    state: &AppState,
    id: Uuid,
    slot: DocumentSlot,
    file: DocumentFile,
) -> ApiResult<WizardView> {
    validate_file(&file)?;

    let handle = handle(state, id).await?;
    handle.lock().await.begin_upload(slot)?;

    let size = file.size();
    let result = state.media.upload(file).await;
    match &result {
        Ok(url) => info!("Uploaded {} for wizard {} ({} bytes): {}", slot, id, size, url),
        Err(e) => warn!("Upload of {} for wizard {} failed: {}", slot, id, e),
    }

    let mut wizard = handle.lock().await;
    wizard.finish_upload(slot, result)?;
    Ok(WizardView::of(id, &wizard))
}

pub async fn initiate_payment(state: &AppState, id: Uuid) -> ApiResult<PaymentView> {
    let handle = handle(state, id).await?;
    let mut wizard = handle.lock().await;

    let payment_ref = wizard
        .initiate_payment(state.store.as_ref(), &state.payment)
        .await?;

    let draft = wizard.draft();
    let (Some(reg_id), Some(fees)) = (draft.reg_id.clone(), draft.fees) else {
        return Err(WebError::InternalServerError(
            "Payment initiated without a registration id".to_string(),
        ));
    };

    Ok(PaymentView {
        reg_id,
        fees,
        upi_link: payment_ref.upi_link,
        qr_url: payment_ref.qr_url,
    })
}

pub async fn confirm_payment(state: &AppState, id: Uuid) -> ApiResult<WizardView> {
    let handle = handle(state, id).await?;
    let mut wizard = handle.lock().await;
    wizard.confirm_payment()?;

    info!(
        "Registration {} marked as paid by registrant, awaiting verification",
        wizard.draft().reg_id.as_deref().unwrap_or_default()
    );
    Ok(WizardView::of(id, &wizard))
}

pub async fn receipt(state: &AppState, id: Uuid) -> ApiResult<Receipt> {
    let handle = handle(state, id).await?;
    let wizard = handle.lock().await;
    Ok(wizard.receipt()?)
}
