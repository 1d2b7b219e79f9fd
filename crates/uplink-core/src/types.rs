//! Identifier and classification types
//!
//! Every identifier handed back by a remote collaborator is an opaque
//! string. Newtyping them keeps a distribution id from being passed where
//! a durable document id is expected.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

id_type! {
    /// Server-assigned identifier for a stored document, stable for its
    /// lifetime.
    DurableId
}

id_type! {
    /// Identifier of a public-link record associated with a stored document.
    DistributionId
}

id_type! {
    /// Identifier of a specific stored version of a document.
    VersionId
}

id_type! {
    /// Identifier of the host record files are attached to.
    RecordId
}

/// Client-generated identifier tracking an upload entry before (and
/// independent of) a durable identifier.
///
/// Composed from the file name, size, last-modified time, and a random
/// component, so duplicate filenames and repeated selection of an
/// unmodified file never collide. Stable from entry creation to deletion,
/// never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TempId(String);

impl TempId {
    pub fn generate(name: &str, size: u64, last_modified: DateTime<Utc>) -> Self {
        Self(format!(
            "{}-{}-{}-{}",
            name,
            size,
            last_modified.timestamp_millis(),
            Uuid::new_v4()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TempId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Preview strategy bucket for an uploaded file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    Image,
    Pdf,
    Other,
}

impl FileKind {
    /// Classify a declared content type.
    ///
    /// Pure and total: `Image` for anything in the `image/` family, `Pdf`
    /// for exactly the canonical PDF media type, `Other` for the rest.
    pub fn classify(content_type: &str) -> Self {
        if content_type.starts_with("image/") {
            Self::Image
        } else if content_type == "application/pdf" {
            Self::Pdf
        } else {
            Self::Other
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, Self::Image)
    }

    pub fn is_pdf(&self) -> bool {
        matches!(self, Self::Pdf)
    }
}

/// Result of creating a public link for a stored document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicLink {
    pub distribution_id: DistributionId,
    pub public_url: String,
}
