//! Server state management.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use docmeta_core::config::DocMetaConfig;
use docmeta_core::metadata::DocumentProcessor;
use docmeta_core::types::MetadataRecord;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// Finished records in insertion order, capped at `capacity`.
struct ResultStore {
    records: HashMap<Uuid, MetadataRecord>,
    order: VecDeque<Uuid>,
    capacity: usize,
}

impl ResultStore {
    fn new(capacity: usize) -> Self {
        Self {
            records: HashMap::new(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    fn insert(&mut self, id: Uuid, record: MetadataRecord) {
        while self.records.len() >= self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            if self.records.remove(&oldest).is_some() {
                debug!(id = %oldest, "Evicted oldest stored result");
            }
        }
        self.records.insert(id, record);
        self.order.push_back(id);
    }

    fn remove(&mut self, id: &Uuid) -> bool {
        let removed = self.records.remove(id).is_some();
        if removed {
            self.order.retain(|stored| stored != id);
        }
        removed
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    processor: Arc<DocumentProcessor>,
    results: Arc<RwLock<ResultStore>>,
}

impl AppState {
    /// Create a new application state around a configured processor.
    /// At most `server.max_stored_results` records are kept.
    pub fn new(processor: DocumentProcessor) -> Self {
        let capacity = processor.config().server.max_stored_results;
        Self {
            processor: Arc::new(processor),
            results: Arc::new(RwLock::new(ResultStore::new(capacity))),
        }
    }

    pub fn processor(&self) -> &DocumentProcessor {
        &self.processor
    }

    pub fn config(&self) -> &DocMetaConfig {
        self.processor.config()
    }

    /// Keep a finished record and return the id it is stored under.
    /// The oldest record is evicted when the store is full.
    pub async fn store(&self, record: MetadataRecord) -> Uuid {
        let id = Uuid::new_v4();
        self.results.write().await.insert(id, record);
        id
    }

    pub async fn get(&self, id: &Uuid) -> Option<MetadataRecord> {
        self.results.read().await.records.get(id).cloned()
    }

    /// Drop a stored record. Returns whether it existed.
    pub async fn remove(&self, id: &Uuid) -> bool {
        self.results.write().await.remove(id)
    }

    pub async fn len(&self) -> usize {
        self.results.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.results.read().await.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docmeta_core::config::ServerConfig;
    use docmeta_core::metadata::MetadataBuilder;

    #[tokio::test]
    async fn test_store_get_remove() {
        let state = AppState::new(DocumentProcessor::with_defaults(
            DocMetaConfig::default(),
            None,
        ));
        assert!(state.is_empty().await);

        let record = MetadataBuilder::new("a.txt", 3).build();
        let id = state.store(record.clone()).await;

        assert_eq!(state.len().await, 1);
        assert_eq!(state.get(&id).await, Some(record));
        assert!(state.remove(&id).await);
        assert!(!state.remove(&id).await);
        assert!(state.get(&id).await.is_none());
    }

    #[tokio::test]
    async fn test_store_evicts_oldest_when_full() {
        let config = DocMetaConfig::builder()
            .server(ServerConfig {
                max_stored_results: 2,
                ..Default::default()
            })
            .build();
        let state = AppState::new(DocumentProcessor::with_defaults(config, None));

        let first = state.store(MetadataBuilder::new("a.txt", 1).build()).await;
        let second = state.store(MetadataBuilder::new("b.txt", 2).build()).await;
        let third = state.store(MetadataBuilder::new("c.txt", 3).build()).await;

        assert_eq!(state.len().await, 2);
        assert!(state.get(&first).await.is_none());
        assert!(state.get(&second).await.is_some());
        assert_eq!(state.get(&third).await.unwrap().file_name, "c.txt");

        // A cleared slot is reused without evicting anything else.
        assert!(state.remove(&second).await);
        let fourth = state.store(MetadataBuilder::new("d.txt", 4).build()).await;
        assert!(state.get(&third).await.is_some());
        assert!(state.get(&fourth).await.is_some());
        assert_eq!(state.len().await, 2);
    }
}
