use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

use crate::features::animals::events::StoreEvent;
use crate::features::animals::services::RecordStore;
use crate::features::stats::models::Distributions;
use crate::features::stats::services::aggregation;

/// Keeps dashboard distributions in step with the record store.
///
/// Recomputes on every `Replaced` event and publishes the result on a watch
/// channel, so readers always see the distributions of the latest set.
pub struct StatsFeed {
    receiver: watch::Receiver<Distributions>,
    task: JoinHandle<()>,
}

impl StatsFeed {
    pub fn spawn(store: Arc<RecordStore>) -> Self {
        // Subscribe before the first snapshot so no replacement is missed
        let events = BroadcastStream::new(store.subscribe());
        let (sender, receiver) = watch::channel(aggregation::summarize(&store.current()));

        let task = tokio::spawn(run(store, events, sender));

        Self { receiver, task }
    }

    /// Latest distributions
    pub fn latest(&self) -> Distributions {
        self.receiver.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Distributions> {
        self.receiver.clone()
    }
}

impl Drop for StatsFeed {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run(
    store: Arc<RecordStore>,
    mut events: BroadcastStream<StoreEvent>,
    sender: watch::Sender<Distributions>,
) {
    while let Some(event) = events.next().await {
        match event {
            Ok(StoreEvent::Replaced {
                sequence, count, ..
            }) => {
                tracing::debug!(
                    "Recomputing stats for load #{} ({} records)",
                    sequence,
                    count
                );
                let _ = sender.send(aggregation::summarize(&store.current()));
            }
            Ok(StoreEvent::LoadFailed { .. }) => {}
            Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                // Only the newest set matters, so catch up from it
                tracing::warn!("Stats feed lagged by {} events; resyncing", skipped);
                let _ = sender.send(aggregation::summarize(&store.current()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::StoreConfig;
    use crate::shared::test_helpers::{sample_record, FakeRecordApi};

    #[tokio::test]
    async fn test_feed_follows_store_replacements() {
        let api = Arc::new(FakeRecordApi::with_records(vec![
            sample_record("1", "Available"),
            sample_record("2", "Adopted"),
        ]));
        let store = Arc::new(RecordStore::new(api.clone(), &StoreConfig::default()));
        let feed = StatsFeed::spawn(Arc::clone(&store));
        let mut updates = feed.subscribe();

        assert_eq!(feed.latest().status.total(), 0);

        store.load().await.unwrap();
        updates.changed().await.unwrap();
        let latest = feed.latest();
        assert_eq!(latest.status.get("Available"), 1);
        assert_eq!(latest.status.get("Adopted"), 1);

        api.set_records(vec![sample_record("3", "Available")]);
        store.load().await.unwrap();
        updates.changed().await.unwrap();
        assert_eq!(feed.latest().status.total(), 1);
    }

    #[tokio::test]
    async fn test_failed_load_does_not_touch_stats() {
        let api = Arc::new(FakeRecordApi::with_records(vec![sample_record(
            "1",
            "Available",
        )]));
        let store = Arc::new(RecordStore::new(api.clone(), &StoreConfig::default()));
        let feed = StatsFeed::spawn(Arc::clone(&store));
        let mut updates = feed.subscribe();

        store.load().await.unwrap();
        updates.changed().await.unwrap();

        api.fail_fetch("HTTP 500");
        assert!(store.load().await.is_err());
        tokio::task::yield_now().await;

        assert!(!updates.has_changed().unwrap());
        assert_eq!(feed.latest().status.total(), 1);
    }
}
