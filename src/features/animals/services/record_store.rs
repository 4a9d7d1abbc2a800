use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;

use crate::core::config::{ReloadPolicy, StoreConfig};
use crate::core::error::{AppError, Result};
use crate::features::animals::clients::RecordApi;
use crate::features::animals::events::StoreEvent;
use crate::features::animals::models::{AnimalId, AnimalRecord};

/// What a successful `load()` did to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Replaced { sequence: u64, count: usize },
    /// The response was older than the applied one and was dropped
    Stale { sequence: u64, applied: u64 },
}

struct Snapshot {
    records: Arc<Vec<AnimalRecord>>,
    /// Sequence of the load that produced `records`; 0 before the first load
    sequence: u64,
}

/// Read-through cache of the shelter's record collection.
///
/// The only writer is `load()`, which swaps the whole set at once; readers
/// hold an `Arc` to whichever set was current when they asked.
pub struct RecordStore {
    api: Arc<dyn RecordApi>,
    snapshot: RwLock<Snapshot>,
    policy: ReloadPolicy,
    next_sequence: AtomicU64,
    events: broadcast::Sender<StoreEvent>,
}

impl RecordStore {
    pub fn new(api: Arc<dyn RecordApi>, config: &StoreConfig) -> Self {
        let (events, _) = broadcast::channel(config.event_capacity);
        Self {
            api,
            snapshot: RwLock::new(Snapshot {
                records: Arc::new(Vec::new()),
                sequence: 0,
            }),
            policy: config.reload_policy,
            next_sequence: AtomicU64::new(0),
            events,
        }
    }

    /// Receive every replace and load-failure event from now on
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// The current record set. Empty until the first successful load.
    pub fn current(&self) -> Arc<Vec<AnimalRecord>> {
        let snapshot = self.snapshot.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&snapshot.records)
    }

    /// Records shown in the user view
    pub fn adoptable(&self) -> Vec<AnimalRecord> {
        self.current()
            .iter()
            .filter(|record| record.is_available())
            .cloned()
            .collect()
    }

    pub fn find(&self, id: &AnimalId) -> Option<AnimalRecord> {
        self.current().iter().find(|record| &record.id == id).cloned()
    }

    /// Fetch the full collection and replace the record set with it.
    ///
    /// On failure the record set is untouched and a `LoadFailed` event is
    /// published. Nothing is retried.
    pub async fn load(&self) -> Result<LoadOutcome> {
        let sequence = self.next_sequence.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!("Starting load #{}", sequence);

        let records = match self.api.fetch_all().await.and_then(check_unique_ids) {
            Ok(records) => records,
            Err(e) => {
                tracing::error!("Load #{} failed: {}", sequence, e);
                self.publish(StoreEvent::load_failed(sequence, e.user_message()));
                return Err(e);
            }
        };

        let count = records.len();
        {
            let mut snapshot = self.snapshot.write().unwrap_or_else(|e| e.into_inner());

            if self.policy == ReloadPolicy::DiscardStale && sequence < snapshot.sequence {
                tracing::info!(
                    "Discarding load #{}: load #{} is already applied",
                    sequence,
                    snapshot.sequence
                );
                return Ok(LoadOutcome::Stale {
                    sequence,
                    applied: snapshot.sequence,
                });
            }

            *snapshot = Snapshot {
                records: Arc::new(records),
                sequence,
            };
        }

        tracing::info!("Load #{} replaced record set ({} records)", sequence, count);
        self.publish(StoreEvent::replaced(sequence, count));

        Ok(LoadOutcome::Replaced { sequence, count })
    }

    fn publish(&self, event: StoreEvent) {
        // No receivers is fine
        let _ = self.events.send(event);
    }
}

fn check_unique_ids(records: Vec<AnimalRecord>) -> Result<Vec<AnimalRecord>> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in &records {
        if !seen.insert(&record.id) {
            return Err(AppError::LoadFailure(format!(
                "Duplicate record id in collection: {}",
                record.id
            )));
        }
    }
    Ok(records)
}
