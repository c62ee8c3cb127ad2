//! Test utilities: recording implementations of the loader seams.
//!
//! Handwritten mocks for dependency injection in unit tests. All mocks use
//! `Arc<Mutex<_>>` for interior mutability, allowing test assertions on
//! recorded calls.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::error::AppError;
use crate::registry::ModelRegistry;
use crate::report::{LoadEvent, LoadReporter, SkipReason};

/// Owned snapshot of a [`LoadEvent`], recordable across the borrow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedEvent {
    SchemaBuilt { name: String, path: PathBuf },
    ModelRegistered { name: String, collection: String },
    EntrySkipped { path: PathBuf, reason: SkipReason },
    WalkError { message: String },
}

/// Reporter that records every event it receives.
#[derive(Debug, Default, Clone)]
pub struct RecordingReporter {
    events: Arc<Mutex<Vec<RecordedEvent>>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Names from `ModelRegistered` events, in report order.
    pub fn registered_names(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                RecordedEvent::ModelRegistered { name, .. } => Some(name),
                _ => None,
            })
            .collect()
    }

    /// Paths from `EntrySkipped` events with the given reason.
    pub fn skipped_paths(&self, reason: SkipReason) -> Vec<PathBuf> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                RecordedEvent::EntrySkipped { path, reason: r } if r == reason => Some(path),
                _ => None,
            })
            .collect()
    }
}

impl LoadReporter for RecordingReporter {
    fn report(&self, event: LoadEvent<'_>) {
        let recorded = match event {
            LoadEvent::SchemaBuilt { name, path } => RecordedEvent::SchemaBuilt {
                name: name.to_string(),
                path: path.to_path_buf(),
            },
            LoadEvent::ModelRegistered { name, collection } => RecordedEvent::ModelRegistered {
                name: name.to_string(),
                collection: collection.to_string(),
            },
            LoadEvent::EntrySkipped { path, reason } => RecordedEvent::EntrySkipped {
                path: path.to_path_buf(),
                reason,
            },
            LoadEvent::WalkError { error } => RecordedEvent::WalkError {
                message: error.to_string(),
            },
        };
        self.events.lock().unwrap().push(recorded);
    }
}

/// Registry that rejects every registration with a configurable message.
#[derive(Debug, Clone)]
pub struct FailingRegistry {
    message: String,
}

impl FailingRegistry {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

impl ModelRegistry for FailingRegistry {
    fn register_model(
        &mut self,
        _name: &str,
        _schema: Value,
        _collection: &str,
    ) -> Result<(), AppError> {
        Err(AppError::Registry(self.message.clone()))
    }
}
