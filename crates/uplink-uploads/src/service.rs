//! Upload Service
//!
//! Owns the per-file upload lifecycle: size precondition, local encode
//! with progress, remote store, preview resolution by kind, and the
//! terminal ready/failed transition. Each selected file runs the state
//! machine in its own task; the shared preview list tolerates their
//! interleaved updates. Deletion is the symmetric flow: optimistic local
//! removal plus a compensating remote delete.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::io::AsyncRead;
use tokio::task::JoinHandle;
use tracing::{error, info, instrument, warn};

use uplink_core::{DurableId, FileKind, TempId, UploadError, UploaderConfig};
use uplink_notifications::{Toast, ToastSink};

use crate::encoder;
use crate::model::{SelectedFile, UploadEntry};
use crate::preview::PreviewList;
use crate::remote::RemoteStore;

/// Preview details resolved after a successful store call
struct ResolvedPreview {
    preview_url: Option<String>,
    distribution_id: Option<uplink_core::DistributionId>,
    alt_text: Option<String>,
}

impl ResolvedPreview {
    fn none() -> Self {
        Self {
            preview_url: None,
            distribution_id: None,
            alt_text: None,
        }
    }
}

/// Drives uploads and deletions against the remote storage platform
#[derive(Clone)]
pub struct UploadService {
    remote: Arc<dyn RemoteStore>,
    toasts: Arc<dyn ToastSink>,
    previews: PreviewList,
    /// Durable ids awaiting association in deferred-association mode
    pending: Arc<Mutex<HashSet<DurableId>>>,
    config: UploaderConfig,
}

impl UploadService {
    pub fn new(
        remote: Arc<dyn RemoteStore>,
        toasts: Arc<dyn ToastSink>,
        config: UploaderConfig,
    ) -> Self {
        Self {
            remote,
            toasts,
            previews: PreviewList::new(),
            pending: Arc::new(Mutex::new(HashSet::new())),
            config,
        }
    }

    /// The shared preview list, for the rendering layer.
    pub fn previews(&self) -> &PreviewList {
        &self.previews
    }

    /// Durable ids accumulated in deferred-association mode, for the
    /// later linking step.
    pub fn pending_document_ids(&self) -> Vec<DurableId> {
        self.pending.lock().iter().cloned().collect()
    }

    /// Start uploading a selected file in its own task. Files selected
    /// together proceed concurrently with no completion ordering.
    pub fn select_file<R>(&self, file: SelectedFile, reader: R) -> JoinHandle<()>
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let service = self.clone();
        tokio::spawn(async move { service.run_upload(file, reader).await })
    }

    /// Start one upload task per selected file.
    pub fn select_files<R>(
        &self,
        files: impl IntoIterator<Item = (SelectedFile, R)>,
    ) -> Vec<JoinHandle<()>>
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        files
            .into_iter()
            .map(|(file, reader)| self.select_file(file, reader))
            .collect()
    }

    /// Per-file state machine.
    #[instrument(skip(self, reader), fields(file = %file.name, size = file.size))]
    async fn run_upload<R>(&self, file: SelectedFile, reader: R)
    where
        R: AsyncRead + Unpin + Send,
    {
        // Hard precondition: an oversize file is rejected before any read
        // and never gets an entry; the toast is the only observable effect.
        if let Err(err) = encoder::check_size(file.size, self.config.max_file_size) {
            warn!(error = %err, "file rejected before read");
            self.toasts.publish(Toast::error("Error", err.to_string()));
            return;
        }

        // The entry appears immediately so the user gets feedback before
        // the first byte is read.
        let entry = UploadEntry::new(&file);
        let temp_id = entry.temp_id.clone();
        let kind = entry.kind;
        self.previews.push(entry);

        let payload = match encoder::encode_base64(reader, file.size, |percent| {
            self.previews.set_progress(&temp_id, percent);
        })
        .await
        {
            Ok(payload) => payload,
            Err(err) => {
                self.fail_entry(&temp_id, &file.name, &err.into());
                return;
            }
        };

        let durable_id = match self
            .remote
            .store_file(&file.name, &payload, self.config.host_record_id.as_ref())
            .await
        {
            Ok(id) => id,
            Err(err) => {
                self.fail_entry(&temp_id, &file.name, &err.into());
                return;
            }
        };

        // No host record yet: keep the id so a later step can associate it.
        if self.config.is_deferred_association() {
            self.pending.lock().insert(durable_id.clone());
        }

        let resolved = match self.resolve_preview(kind, &durable_id, &file.name).await {
            Ok(resolved) => resolved,
            Err(err) => {
                // The stored document is not rolled back; only the entry
                // flips to failed.
                self.fail_entry(&temp_id, &file.name, &err.into());
                return;
            }
        };

        self.previews.update(&temp_id, |entry| {
            entry.finalize(
                durable_id.clone(),
                resolved.preview_url.clone(),
                resolved.distribution_id.clone(),
                resolved.alt_text.clone(),
            )
        });
        info!(durable_id = %durable_id, "upload complete");
    }

    /// Branch by kind after a successful store call.
    async fn resolve_preview(
        &self,
        kind: FileKind,
        durable_id: &DurableId,
        file_name: &str,
    ) -> Result<ResolvedPreview, uplink_core::RemoteError> {
        match kind {
            FileKind::Pdf => {
                let link = self.remote.create_public_link(durable_id).await?;
                Ok(ResolvedPreview {
                    preview_url: Some(link.public_url),
                    distribution_id: Some(link.distribution_id),
                    alt_text: None,
                })
            }
            FileKind::Image => match self.remote.latest_version_id(durable_id).await? {
                Some(version_id) => Ok(ResolvedPreview {
                    preview_url: Some(self.config.version_download_url(&version_id)),
                    distribution_id: None,
                    alt_text: Some(format!("Preview of {file_name}")),
                }),
                None => {
                    // Soft fail: degraded but successful, nothing surfaced
                    // to the user.
                    warn!(durable_id = %durable_id, "no version found for image, preview skipped");
                    Ok(ResolvedPreview::none())
                }
            },
            FileKind::Other => Ok(ResolvedPreview::none()),
        }
    }

    fn fail_entry(&self, temp_id: &TempId, file_name: &str, error: &UploadError) {
        error!(file = file_name, error = %error, "upload failed");
        self.previews.update(temp_id, |entry| entry.mark_failed());
        self.toasts
            .publish(Toast::error("Error uploading file", error.to_string()));
    }

    /// Remove a ready entry and issue the compensating remote delete.
    ///
    /// Removal is optimistic: the entry leaves the list (and, in
    /// deferred-association mode, the pending set) before the remote call
    /// resolves, and is never restored on remote failure. Returns `false`
    /// without any side effect when no entry holds `durable_id`.
    #[instrument(skip(self))]
    pub async fn delete(&self, durable_id: &DurableId) -> bool {
        let Some(entry) = self.previews.remove_by_durable_id(durable_id) else {
            return false;
        };

        if self.config.is_deferred_association() {
            self.pending.lock().remove(durable_id);
        }

        let distribution_id = entry.distribution_id().cloned();
        match self
            .remote
            .delete_file(
                durable_id,
                self.config.host_record_id.as_ref(),
                distribution_id.as_ref(),
            )
            .await
        {
            Ok(()) => {
                info!(file = %entry.name, "file deleted");
                self.toasts
                    .publish(Toast::success("Success", "File deleted successfully"));
            }
            Err(err) => {
                // Known reconciliation gap: the local removal stands even
                // though the server may still hold the document.
                error!(file = %entry.name, error = %err, "remote delete failed");
                self.toasts
                    .publish(Toast::error("Error deleting file", err.to_string()));
            }
        }
        true
    }
}
