use registration::{EventCatalog, Wizard};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

pub type WizardHandle = Arc<Mutex<Wizard>>;

/// In-progress drafts, one per wizard id. Nothing here outlives the process.
#[derive(Clone, Default)]
pub struct WizardSessions {
    wizards: Arc<RwLock<HashMap<Uuid, WizardHandle>>>,
}

impl WizardSessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self, catalog: EventCatalog) -> (Uuid, WizardHandle) {
        let id = Uuid::new_v4();
        let handle = Arc::new(Mutex::new(Wizard::new(catalog)));

        let mut wizards = self.wizards.write().await;
        wizards.insert(id, handle.clone());
        (id, handle)
    }

    pub async fn get(&self, id: Uuid) -> Option<WizardHandle> {
        let wizards = self.wizards.read().await;
        wizards.get(&id).cloned()
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        let mut wizards = self.wizards.write().await;
        wizards.remove(&id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.wizards.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.wizards.read().await.is_empty()
    }
}
