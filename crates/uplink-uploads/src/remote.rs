//! Remote Collaborator Seam
//!
//! The storage platform persists bytes, mints public links, resolves
//! version ids, and deletes documents. This core only sees those four
//! calls; everything behind them (persistence, auth, link mechanics) is
//! the collaborator's business.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use uplink_core::{
    DistributionId, DurableId, PublicLink, RecordId, RemoteCall, RemoteError, RemoteResult,
    VersionId,
};

/// The four calls the upload core makes against the storage platform
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Persist an encoded file, optionally attached to a host record.
    /// Returns the durable document id.
    async fn store_file(
        &self,
        file_name: &str,
        base64_payload: &str,
        host_record_id: Option<&RecordId>,
    ) -> RemoteResult<DurableId>;

    /// Mint a public distribution link for a stored document. Only called
    /// for PDFs.
    async fn create_public_link(&self, durable_id: &DurableId) -> RemoteResult<PublicLink>;

    /// Resolve the most recent version id of a stored document. Only
    /// called for images; `None` is a valid answer, not an error.
    async fn latest_version_id(&self, durable_id: &DurableId) -> RemoteResult<Option<VersionId>>;

    /// Delete a stored document and, when present, its distribution link.
    async fn delete_file(
        &self,
        durable_id: &DurableId,
        host_record_id: Option<&RecordId>,
        distribution_id: Option<&DistributionId>,
    ) -> RemoteResult<()>;
}

/// Every call a [`MemoryRemoteStore`] has received, for assertions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    StoreFile {
        file_name: String,
        host_record_id: Option<RecordId>,
    },
    CreatePublicLink {
        durable_id: DurableId,
    },
    LatestVersionId {
        durable_id: DurableId,
    },
    DeleteFile {
        durable_id: DurableId,
        host_record_id: Option<RecordId>,
        distribution_id: Option<DistributionId>,
    },
}

#[derive(Debug, Clone)]
struct StoredDocument {
    #[allow(dead_code)]
    file_name: String,
    payload: String,
}

#[derive(Default)]
struct Inner {
    calls: Vec<RecordedCall>,
    documents: HashMap<DurableId, StoredDocument>,
    next_id: u64,
}

/// In-memory remote store for tests: mints sequential ids (`D1`, `L1`,
/// `V1`, ...), records every call, and can be scripted to reject any
/// individual call or to answer version lookups with nothing.
#[derive(Default)]
pub struct MemoryRemoteStore {
    inner: Mutex<Inner>,
    fail_store: bool,
    fail_link_create: bool,
    fail_version_lookup: bool,
    fail_delete: bool,
    versionless: bool,
}

impl MemoryRemoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every `store_file` call.
    pub fn fail_store(mut self) -> Self {
        self.fail_store = true;
        self
    }

    /// Reject every `create_public_link` call.
    pub fn fail_link_create(mut self) -> Self {
        self.fail_link_create = true;
        self
    }

    /// Reject every `latest_version_id` call.
    pub fn fail_version_lookup(mut self) -> Self {
        self.fail_version_lookup = true;
        self
    }

    /// Reject every `delete_file` call.
    pub fn fail_delete(mut self) -> Self {
        self.fail_delete = true;
        self
    }

    /// Answer every version lookup with `None`.
    pub fn without_versions(mut self) -> Self {
        self.versionless = true;
        self
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.inner.lock().calls.clone()
    }

    /// Number of stored documents currently held.
    pub fn document_count(&self) -> usize {
        self.inner.lock().documents.len()
    }

    /// Stored payload for a document, if still present.
    pub fn payload(&self, durable_id: &DurableId) -> Option<String> {
        self.inner
            .lock()
            .documents
            .get(durable_id)
            .map(|d| d.payload.clone())
    }
}

#[async_trait]
impl RemoteStore for MemoryRemoteStore {
    async fn store_file(
        &self,
        file_name: &str,
        base64_payload: &str,
        host_record_id: Option<&RecordId>,
    ) -> RemoteResult<DurableId> {
        let mut inner = self.inner.lock();
        inner.calls.push(RecordedCall::StoreFile {
            file_name: file_name.to_string(),
            host_record_id: host_record_id.cloned(),
        });

        if self.fail_store {
            return Err(RemoteError::new(RemoteCall::StoreFile, "store rejected"));
        }

        inner.next_id += 1;
        let durable_id = DurableId::new(format!("D{}", inner.next_id));
        inner.documents.insert(
            durable_id.clone(),
            StoredDocument {
                file_name: file_name.to_string(),
                payload: base64_payload.to_string(),
            },
        );
        Ok(durable_id)
    }

    async fn create_public_link(&self, durable_id: &DurableId) -> RemoteResult<PublicLink> {
        let mut inner = self.inner.lock();
        inner.calls.push(RecordedCall::CreatePublicLink {
            durable_id: durable_id.clone(),
        });

        if self.fail_link_create {
            return Err(RemoteError::new(
                RemoteCall::CreatePublicLink,
                "link creation rejected",
            ));
        }
        if !inner.documents.contains_key(durable_id) {
            return Err(RemoteError::new(
                RemoteCall::CreatePublicLink,
                format!("unknown document {durable_id}"),
            ));
        }

        inner.next_id += 1;
        let distribution_id = DistributionId::new(format!("L{}", inner.next_id));
        Ok(PublicLink {
            public_url: format!("https://links.example/{distribution_id}"),
            distribution_id,
        })
    }

    async fn latest_version_id(&self, durable_id: &DurableId) -> RemoteResult<Option<VersionId>> {
        let mut inner = self.inner.lock();
        inner.calls.push(RecordedCall::LatestVersionId {
            durable_id: durable_id.clone(),
        });

        if self.fail_version_lookup {
            return Err(RemoteError::new(
                RemoteCall::LatestVersionId,
                "lookup rejected",
            ));
        }
        if self.versionless || !inner.documents.contains_key(durable_id) {
            return Ok(None);
        }

        inner.next_id += 1;
        Ok(Some(VersionId::new(format!("V{}", inner.next_id))))
    }

    async fn delete_file(
        &self,
        durable_id: &DurableId,
        host_record_id: Option<&RecordId>,
        distribution_id: Option<&DistributionId>,
    ) -> RemoteResult<()> {
        let mut inner = self.inner.lock();
        inner.calls.push(RecordedCall::DeleteFile {
            durable_id: durable_id.clone(),
            host_record_id: host_record_id.cloned(),
            distribution_id: distribution_id.cloned(),
        });

        if self.fail_delete {
            return Err(RemoteError::new(RemoteCall::DeleteFile, "delete rejected"));
        }

        inner.documents.remove(durable_id);
        Ok(())
    }
}
