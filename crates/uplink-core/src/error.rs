//! Error types for upload and deletion flows
//!
//! Each collaborator call reports failure through a typed [`RemoteError`]
//! carrying the call discriminator, never by probing the shape of an
//! opaque error value.

use thiserror::Error;

/// Which remote collaborator call failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteCall {
    StoreFile,
    CreatePublicLink,
    LatestVersionId,
    DeleteFile,
}

impl RemoteCall {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StoreFile => "store_file",
            Self::CreatePublicLink => "create_public_link",
            Self::LatestVersionId => "latest_version_id",
            Self::DeleteFile => "delete_file",
        }
    }
}

impl std::fmt::Display for RemoteCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A remote collaborator rejected a call
#[derive(Debug, Clone, Error)]
#[error("{call} failed: {message}")]
pub struct RemoteError {
    /// The call that failed
    pub call: RemoteCall,
    /// Server-provided rejection message
    pub message: String,
}

impl RemoteError {
    pub fn new(call: RemoteCall, message: impl Into<String>) -> Self {
        Self {
            call,
            message: message.into(),
        }
    }
}

pub type RemoteResult<T> = Result<T, RemoteError>;

/// Local encode-phase errors, raised before any remote call is made
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The hard per-file precondition: files over the limit are rejected
    /// before any read begins.
    #[error("File size exceeds the 2GB limit ({size} > {max} bytes)")]
    SizeLimitExceeded { size: u64, max: u64 },

    #[error("Read failed: {0}")]
    Read(#[from] std::io::Error),
}

pub type EncodeResult<T> = Result<T, EncodeError>;

/// Terminal failure of a single file's upload lifecycle
#[derive(Debug, Error)]
pub enum UploadError {
    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Remote(#[from] RemoteError),
}

pub type UploadResult<T> = Result<T, UploadError>;
