use chrono::{DateTime, Utc};

/// Published by the record store whenever its state changes or a load fails.
///
/// Views and the stats feed subscribe to these instead of polling the store.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    /// The record set was replaced wholesale
    Replaced {
        sequence: u64,
        count: usize,
        at: DateTime<Utc>,
    },

    /// A load failed; the record set was left as it was
    LoadFailed {
        sequence: u64,
        message: String,
        at: DateTime<Utc>,
    },
}

impl StoreEvent {
    pub fn replaced(sequence: u64, count: usize) -> Self {
        StoreEvent::Replaced {
            sequence,
            count,
            at: Utc::now(),
        }
    }

    pub fn load_failed(sequence: u64, message: impl Into<String>) -> Self {
        StoreEvent::LoadFailed {
            sequence,
            message: message.into(),
            at: Utc::now(),
        }
    }

    pub fn sequence(&self) -> u64 {
        match self {
            StoreEvent::Replaced { sequence, .. } | StoreEvent::LoadFailed { sequence, .. } => {
                *sequence
            }
        }
    }
}
