//! Progress reporting.
//!
//! Workers publish synchronously and never wait for a reply. A sink that
//! wants to forward events elsewhere (a channel, a UI) must not block.

use super::job::PartitionId;
use std::fmt;
use tracing::info;

/// One progress notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEvent {
    /// Partition the event comes from; `None` for tuner lifecycle messages.
    pub partition: Option<PartitionId>,
    /// Completed generation count, for per-generation events.
    pub generation: Option<usize>,
    /// Human-readable label.
    pub label: String,
}

impl ProgressEvent {
    /// A lifecycle message not tied to a partition.
    pub fn message(label: impl Into<String>) -> Self {
        Self {
            partition: None,
            generation: None,
            label: label.into(),
        }
    }

    /// A per-generation event, labelled `"{strategy} [{partition}]: generation {n}"`.
    pub fn generation(partition: PartitionId, strategy: &str, generation: usize) -> Self {
        Self {
            partition: Some(partition),
            generation: Some(generation),
            label: format!("{strategy} [{partition}]: generation {generation}"),
        }
    }
}

impl fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Receives progress events from the tuner and its workers.
///
/// Closures `Fn(&ProgressEvent)` implement this trait.
pub trait ProgressSink: Send + Sync {
    /// Handles one event. Fire-and-forget.
    fn publish(&self, event: &ProgressEvent);
}

impl<F> ProgressSink for F
where
    F: Fn(&ProgressEvent) + Send + Sync,
{
    fn publish(&self, event: &ProgressEvent) {
        self(event)
    }
}

/// Forwards events to `tracing` at `info` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn publish(&self, event: &ProgressEvent) {
        match event.partition {
            Some(partition) => info!(
                partition = %partition,
                generation = event.generation,
                "{}",
                event.label
            ),
            None => info!("{}", event.label),
        }
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn publish(&self, _event: &ProgressEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_generation_label() {
        let event = ProgressEvent::generation(PartitionId(3), "Random Search", 12);
        assert_eq!(event.label, "Random Search [P3]: generation 12");
        assert_eq!(event.partition, Some(PartitionId(3)));
        assert_eq!(event.generation, Some(12));
    }

    #[test]
    fn test_message_has_no_partition() {
        let event = ProgressEvent::message("Getting final solutions...");
        assert_eq!(event.partition, None);
        assert_eq!(event.to_string(), "Getting final solutions...");
    }

    #[test]
    fn test_closure_sink() {
        let seen = Mutex::new(Vec::new());
        let sink = |event: &ProgressEvent| seen.lock().expect("lock").push(event.label.clone());
        sink.publish(&ProgressEvent::message("a"));
        sink.publish(&ProgressEvent::message("b"));
        assert_eq!(*seen.lock().expect("lock"), vec!["a", "b"]);
    }

    #[test]
    fn test_builtin_sinks_accept_events() {
        let event = ProgressEvent::generation(PartitionId(0), "Evolutionary Search", 1);
        TracingProgress.publish(&event);
        NoProgress.publish(&event);
    }
}
