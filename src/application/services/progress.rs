use tokio::sync::mpsc::UnboundedSender;

use crate::domain::models::ProgressEvent;

/// Receives one event per finished attempt. Implementations must return
/// promptly; the dispatch loop calls them inline.
pub trait ProgressSink: Send + Sync {
    fn publish(&self, event: ProgressEvent);
}

impl<F> ProgressSink for F
where
    F: Fn(ProgressEvent) + Send + Sync,
{
    fn publish(&self, event: ProgressEvent) {
        self(event)
    }
}

/// Forwards events into an unbounded channel. A dropped receiver is ignored.
pub struct ChannelProgressSink {
    tx: UnboundedSender<ProgressEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: UnboundedSender<ProgressEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn publish(&self, event: ProgressEvent) {
        let _ = self.tx.send(event);
    }
}

pub struct LoggingProgressSink;

impl ProgressSink for LoggingProgressSink {
    fn publish(&self, event: ProgressEvent) {
        tracing::info!(current = event.current, total = event.total, "dispatch progress");
    }
}
