//! # uplink-uploads
//!
//! Per-file upload lifecycle orchestration for Uplink.
//!
//! ## Features
//!
//! - Base64 encoding of selected files with byte-read progress
//! - An explicit per-entry upload state machine (uploading, ready, failed)
//! - A copy-on-write preview list shared across concurrent uploads
//! - Preview resolution by file kind (public link for PDFs, version
//!   download URL for images)
//! - Optimistic deletion with a compensating remote delete
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use uplink_core::UploaderConfig;
//! use uplink_notifications::ChannelSink;
//! use uplink_uploads::{MemoryRemoteStore, SelectedFile, UploadService};
//!
//! let (toasts, mut toast_rx) = ChannelSink::new();
//! let service = UploadService::new(
//!     Arc::new(MemoryRemoteStore::new()),
//!     Arc::new(toasts),
//!     UploaderConfig::default(),
//! );
//!
//! let file = SelectedFile::new("report.pdf", 10, None, chrono::Utc::now());
//! service.select_file(file, &b"%PDF-1.4 x"[..]).await.unwrap();
//! ```

pub mod encoder;
pub mod model;
pub mod preview;
pub mod remote;
pub mod service;

pub use encoder::{check_size, encode_base64};
pub use model::{SelectedFile, UploadEntry, UploadState, UploadStatus};
pub use preview::PreviewList;
pub use remote::{MemoryRemoteStore, RecordedCall, RemoteStore};
pub use service::UploadService;
