//! Upload Entry Model
//!
//! One [`UploadEntry`] exists per selected file for as long as it stays
//! in the preview list. The lifecycle lives in [`UploadState`] as a
//! tagged union, so a ready entry always carries its durable id and a
//! failed one can never report partial progress.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use uplink_core::{DistributionId, DurableId, FileKind, TempId};

/// Read-only description of a file picked by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// Original filename
    pub name: String,
    /// Declared size in bytes
    pub size: u64,
    /// Declared content type
    pub content_type: String,
    /// Last-modified time reported by the picker
    pub last_modified: DateTime<Utc>,
}

impl SelectedFile {
    /// Describe a picked file. When the picker supplies no content type,
    /// fall back to a guess from the filename.
    pub fn new(
        name: impl Into<String>,
        size: u64,
        content_type: Option<String>,
        last_modified: DateTime<Utc>,
    ) -> Self {
        let name = name.into();
        let content_type = content_type.unwrap_or_else(|| {
            mime_guess::from_path(&name)
                .first_or_octet_stream()
                .to_string()
        });
        Self {
            name,
            size,
            content_type,
            last_modified,
        }
    }
}

/// Flat status view for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadStatus {
    Uploading,
    Ready,
    Failed,
}

/// Lifecycle state of a single entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum UploadState {
    /// Bytes are being read locally or sent remotely
    Uploading {
        /// Byte-read progress, 0-100
        progress: u8,
    },
    /// Stored remotely; preview resolution finished
    Ready {
        durable_id: DurableId,
        preview_url: Option<String>,
        distribution_id: Option<DistributionId>,
        show_fallback_icon: bool,
    },
    /// Terminal failure; the entry stays visible so the user can see
    /// which file failed
    Failed,
}

impl UploadState {
    pub fn status(&self) -> UploadStatus {
        match self {
            Self::Uploading { .. } => UploadStatus::Uploading,
            Self::Ready { .. } => UploadStatus::Ready,
            Self::Failed => UploadStatus::Failed,
        }
    }
}

/// A per-file record in the preview list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadEntry {
    /// Client-generated id, stable from creation to deletion
    pub temp_id: TempId,
    /// Original filename
    pub name: String,
    /// Preview strategy bucket, fixed at creation
    pub kind: FileKind,
    /// Alt text for image previews
    pub alt_text: Option<String>,
    /// Accessible label for the delete control
    pub delete_label: String,
    /// Lifecycle state
    pub state: UploadState,
}

impl UploadEntry {
    /// Build the initial entry for a freshly selected file: appended to
    /// the list before encoding starts so the user sees immediate
    /// feedback.
    pub fn new(file: &SelectedFile) -> Self {
        Self {
            temp_id: TempId::generate(&file.name, file.size, file.last_modified),
            name: file.name.clone(),
            kind: FileKind::classify(&file.content_type),
            alt_text: None,
            delete_label: format!("Delete {}", file.name),
            state: UploadState::Uploading { progress: 0 },
        }
    }

    pub fn status(&self) -> UploadStatus {
        self.state.status()
    }

    /// Byte-read progress: 100 once ready, reset to 0 on failure
    pub fn progress(&self) -> u8 {
        match &self.state {
            UploadState::Uploading { progress } => *progress,
            UploadState::Ready { .. } => 100,
            UploadState::Failed => 0,
        }
    }

    /// Durable id, present only once the entry is ready
    pub fn durable_id(&self) -> Option<&DurableId> {
        match &self.state {
            UploadState::Ready { durable_id, .. } => Some(durable_id),
            _ => None,
        }
    }

    pub fn preview_url(&self) -> Option<&str> {
        match &self.state {
            UploadState::Ready { preview_url, .. } => preview_url.as_deref(),
            _ => None,
        }
    }

    pub fn distribution_id(&self) -> Option<&DistributionId> {
        match &self.state {
            UploadState::Ready {
                distribution_id, ..
            } => distribution_id.as_ref(),
            _ => None,
        }
    }

    /// Whether the rendering layer should fall back to a generic icon
    pub fn show_fallback_icon(&self) -> bool {
        match &self.state {
            UploadState::Uploading { .. } => false,
            UploadState::Ready {
                show_fallback_icon, ..
            } => *show_fallback_icon,
            UploadState::Failed => true,
        }
    }

    /// Advance progress while uploading. Ignored in terminal states and
    /// never allowed to move backwards.
    pub fn set_progress(&mut self, percent: u8) {
        if let UploadState::Uploading { progress } = &mut self.state {
            if percent > *progress {
                *progress = percent.min(100);
            }
        }
    }

    /// Terminal success transition. The durable id is assigned here,
    /// exactly once; calling this on a terminal entry is a no-op.
    pub fn finalize(
        &mut self,
        durable_id: DurableId,
        preview_url: Option<String>,
        distribution_id: Option<DistributionId>,
        alt_text: Option<String>,
    ) {
        if !matches!(self.state, UploadState::Uploading { .. }) {
            return;
        }
        let show_fallback_icon = preview_url.is_none();
        self.alt_text = alt_text;
        self.state = UploadState::Ready {
            durable_id,
            preview_url,
            distribution_id,
            show_fallback_icon,
        };
    }

    /// Terminal failure transition; a no-op once the entry is terminal.
    pub fn mark_failed(&mut self) {
        if matches!(self.state, UploadState::Uploading { .. }) {
            self.state = UploadState::Failed;
        }
    }
}
