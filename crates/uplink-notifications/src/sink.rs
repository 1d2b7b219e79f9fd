//! Toast Delivery Sinks
//!
//! Publishing is synchronous and infallible from the caller's point of
//! view: the upload core never blocks on, retries, or observes delivery.

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::debug;

use crate::toast::Toast;

/// Sink the upload core publishes toasts into
pub trait ToastSink: Send + Sync {
    /// Publish a toast, fire-and-forget.
    fn publish(&self, toast: Toast);
}

/// Sink forwarding toasts into an unbounded channel for a UI event loop
/// to drain.
pub struct ChannelSink {
    sender: mpsc::UnboundedSender<Toast>,
}

impl ChannelSink {
    /// Create a sink and the receiving half the presentation layer drains.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Toast>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl ToastSink for ChannelSink {
    fn publish(&self, toast: Toast) {
        // A closed receiver means the UI is gone; nothing left to notify.
        if self.sender.send(toast).is_err() {
            debug!("toast receiver dropped, notification discarded");
        }
    }
}

/// In-memory sink for tests
#[derive(Default)]
pub struct MemorySink {
    toasts: Mutex<Vec<Toast>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything published so far
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().clone()
    }

    pub fn error_count(&self) -> usize {
        self.toasts.lock().iter().filter(|t| t.is_error()).count()
    }
}

impl ToastSink for MemorySink {
    fn publish(&self, toast: Toast) {
        self.toasts.lock().push(toast);
    }
}
