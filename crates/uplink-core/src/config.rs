//! Uploader configuration

use serde::{Deserialize, Serialize};

use crate::types::RecordId;

/// Default per-file size ceiling: 2 GiB
pub const DEFAULT_MAX_FILE_SIZE: u64 = 2 * 1024 * 1024 * 1024;

/// Configuration surface of the upload core
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploaderConfig {
    /// Host record uploads attach to. `None` selects deferred-association
    /// mode: stored document ids accumulate for later linking.
    pub host_record_id: Option<RecordId>,

    /// Advisory content-type filter for the file picker. Not enforced by
    /// this core.
    pub accepted_types: String,

    /// Hard per-file size ceiling, checked before any read begins.
    pub max_file_size: u64,

    /// Prefix of the deterministic version-download path used for image
    /// previews. The full pattern is an external contract of the storage
    /// platform.
    pub version_download_path: String,
}

impl Default for UploaderConfig {
    fn default() -> Self {
        Self {
            host_record_id: None,
            accepted_types: "*".to_string(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            version_download_path: "/files/version/download".to_string(),
        }
    }
}

impl UploaderConfig {
    /// Attach uploads to a host record
    pub fn for_record(record_id: RecordId) -> Self {
        Self {
            host_record_id: Some(record_id),
            ..Self::default()
        }
    }

    /// Whether stored document ids must be accumulated for later linking
    pub fn is_deferred_association(&self) -> bool {
        self.host_record_id.is_none()
    }

    /// Build the preview URL for a resolved image version
    pub fn version_download_url(&self, version_id: &crate::types::VersionId) -> String {
        format!(
            "{}/{}",
            self.version_download_path.trim_end_matches('/'),
            version_id
        )
    }
}
