//! # uplink-notifications
//!
//! Toast notifications for Uplink.
//!
//! The upload core emits toasts fire-and-forget; how they reach the user
//! is the presentation layer's concern. A [`ToastSink`] is the seam: the
//! core publishes into it and never waits on delivery.

pub mod sink;
pub mod toast;

pub use sink::{ChannelSink, MemorySink, ToastSink};
pub use toast::{Severity, Toast};
