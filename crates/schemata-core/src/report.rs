use std::path::Path;

/// Why a discovered file was not registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The file lives under the configured partials directory.
    Partial,
    /// The file does not carry the schema extension.
    Extension,
}

/// Events emitted during a traversal for monitoring/logging.
#[derive(Debug)]
pub enum LoadEvent<'a> {
    SchemaBuilt {
        name: &'a str,
        path: &'a Path,
    },
    ModelRegistered {
        name: &'a str,
        collection: &'a str,
    },
    EntrySkipped {
        path: &'a Path,
        reason: SkipReason,
    },
    WalkError {
        error: &'a walkdir::Error,
    },
}

/// Trait for receiving loader events (decoupled logging).
///
/// The default method body drops every event, so `NoopReporter` is the
/// quiet default and [`TracingReporter`] is the debug sink.
pub trait LoadReporter: Send + Sync {
    fn report(&self, event: LoadEvent<'_>) {
        let _ = event;
    }
}

/// Reporter that ignores all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl LoadReporter for NoopReporter {}

/// Reporter that uses the `tracing` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl LoadReporter for TracingReporter {
    fn report(&self, event: LoadEvent<'_>) {
        match event {
            LoadEvent::SchemaBuilt { name, path } => {
                tracing::debug!(%name, path = %path.display(), "Built schema");
            }
            LoadEvent::ModelRegistered { name, collection } => {
                tracing::debug!(%name, %collection, "Registered model");
            }
            LoadEvent::EntrySkipped { path, reason } => {
                tracing::debug!(path = %path.display(), ?reason, "Skipped entry");
            }
            LoadEvent::WalkError { error } => {
                tracing::warn!(%error, "Walk error, entry skipped");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_reporter_accepts_events() {
        let reporter = NoopReporter;
        reporter.report(LoadEvent::EntrySkipped {
            path: Path::new("partials/user.json"),
            reason: SkipReason::Partial,
        });
        reporter.report(LoadEvent::ModelRegistered {
            name: "user",
            collection: "users",
        });
    }
}
