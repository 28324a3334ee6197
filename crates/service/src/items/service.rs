use std::sync::Arc;

use models::{Item, ItemPayload};
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument, warn};

use crate::errors::ServiceError;
use crate::items::next_id;
use crate::storage::CollectionStore;

/// Application service owning the item collection.
///
/// Every operation loads the whole collection from the store, works on it in
/// memory and, for mutations, saves it back. A mutex held across that cycle
/// keeps concurrent requests from losing each other's writes.
pub struct ItemService {
    store: Arc<dyn CollectionStore<Item>>,
    lock: Mutex<()>,
    strict_writes: bool,
}

impl ItemService {
    pub fn new(store: Arc<dyn CollectionStore<Item>>) -> Self {
        Self { store, lock: Mutex::new(()), strict_writes: true }
    }

    /// When false, a failed save is logged and the operation still succeeds.
    pub fn with_strict_writes(mut self, strict: bool) -> Self {
        self.strict_writes = strict;
        self
    }

    async fn load(&self) -> Vec<Item> {
        match self.store.load().await {
            Ok(items) => items,
            Err(e) => {
                error!(path = %self.store.location(), error = %e, "failed to read items; treating collection as empty");
                Vec::new()
            }
        }
    }

    async fn persist(&self, items: &[Item]) -> Result<(), ServiceError> {
        match self.store.save(items).await {
            Ok(()) => {
                debug!(path = %self.store.location(), count = items.len(), "items saved");
                Ok(())
            }
            Err(e) if self.strict_writes => {
                error!(path = %self.store.location(), error = %e, "failed to save items");
                Err(e)
            }
            Err(e) => {
                warn!(path = %self.store.location(), error = %e, "failed to save items; returning unsaved result");
                Ok(())
            }
        }
    }

    /// All items in insertion order.
    pub async fn list(&self) -> Vec<Item> {
        let _guard = self.lock.lock().await;
        self.load().await
    }

    pub async fn get(&self, id: &str) -> Result<Item, ServiceError> {
        let _guard = self.lock.lock().await;
        self.load()
            .await
            .into_iter()
            .find(|i| i.id == id)
            .ok_or_else(|| ServiceError::not_found(id))
    }

    #[instrument(skip_all)]
    pub async fn create(&self, payload: ItemPayload) -> Result<Item, ServiceError> {
        let input = payload.into_new_item()?;
        let _guard = self.lock.lock().await;
        let mut items = self.load().await;
        let item = Item::new(next_id(&items)?, input);
        items.push(item.clone());
        self.persist(&items).await?;
        info!(item_id = %item.id, count = items.len(), "item created");
        Ok(item)
    }

    /// Partial update. Fields absent from `payload` keep their values; a
    /// payload with any invalid field changes nothing.
    #[instrument(skip(self, payload))]
    pub async fn update(&self, id: &str, payload: ItemPayload) -> Result<Item, ServiceError> {
        let _guard = self.lock.lock().await;
        let mut items = self.load().await;
        let idx = items
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| ServiceError::not_found(id))?;
        let changes = payload.into_changes()?;
        items[idx].apply(changes);
        let updated = items[idx].clone();
        self.persist(&items).await?;
        info!(item_id = %updated.id, "item updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let _guard = self.lock.lock().await;
        let mut items = self.load().await;
        let before = items.len();
        items.retain(|i| i.id != id);
        if items.len() == before {
            return Err(ServiceError::not_found(id));
        }
        self.persist(&items).await?;
        info!(item_id = %id, count = items.len(), "item deleted");
        Ok(())
    }
}
