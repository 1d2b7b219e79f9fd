//! Preview List Store
//!
//! The one piece of state shared by every concurrent upload task. Entries
//! are kept in selection order; every mutation clones the current list,
//! applies its change, and swaps in the fresh snapshot under the write
//! lock. Writers therefore always merge against the latest list, never a
//! snapshot captured before an await point, and the lock is never held
//! across an await.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use uplink_core::{DurableId, TempId};

use crate::model::UploadEntry;

/// Cheaply cloneable handle to the shared, copy-on-write entry list
#[derive(Clone, Default)]
pub struct PreviewList {
    entries: Arc<RwLock<Arc<Vec<UploadEntry>>>>,
}

impl PreviewList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot; cheap, and immutable once handed out.
    pub fn snapshot(&self) -> Arc<Vec<UploadEntry>> {
        Arc::clone(&self.entries.read())
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Append an entry, preserving selection order.
    pub fn push(&self, entry: UploadEntry) {
        self.mutate(|entries| entries.push(entry));
    }

    /// Update exactly the entry with `temp_id`, leaving every other entry
    /// untouched. Returns `false` when no entry matches.
    pub fn update<F>(&self, temp_id: &TempId, f: F) -> bool
    where
        F: FnOnce(&mut UploadEntry),
    {
        let mut found = false;
        self.mutate(|entries| {
            if let Some(entry) = entries.iter_mut().find(|e| &e.temp_id == temp_id) {
                f(entry);
                found = true;
            }
        });
        if !found {
            debug!(temp_id = %temp_id, "update for unknown entry ignored");
        }
        found
    }

    /// Record byte-read progress for an uploading entry.
    pub fn set_progress(&self, temp_id: &TempId, percent: u8) {
        self.update(temp_id, |entry| entry.set_progress(percent));
    }

    pub fn find_by_durable_id(&self, durable_id: &DurableId) -> Option<UploadEntry> {
        self.entries
            .read()
            .iter()
            .find(|e| e.durable_id() == Some(durable_id))
            .cloned()
    }

    /// Remove the entry holding `durable_id`. This is the only removal
    /// path; `None` means no entry matched and the list is unchanged.
    pub fn remove_by_durable_id(&self, durable_id: &DurableId) -> Option<UploadEntry> {
        let mut removed = None;
        self.mutate(|entries| {
            if let Some(pos) = entries
                .iter()
                .position(|e| e.durable_id() == Some(durable_id))
            {
                removed = Some(entries.remove(pos));
            }
        });
        removed
    }

    /// Clone-apply-swap: the whole list is replaced wholesale so readers
    /// holding an older snapshot are never mutated under their feet.
    fn mutate<F>(&self, f: F)
    where
        F: FnOnce(&mut Vec<UploadEntry>),
    {
        let mut guard = self.entries.write();
        let mut next = guard.as_ref().clone();
        f(&mut next);
        *guard = Arc::new(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SelectedFile;
    use chrono::Utc;
    use uplink_core::DistributionId;

    fn entry(name: &str) -> UploadEntry {
        UploadEntry::new(&SelectedFile::new(name, 8, None, Utc::now()))
    }

    #[test]
    fn test_push_preserves_selection_order() {
        let list = PreviewList::new();
        list.push(entry("a.txt"));
        list.push(entry("b.txt"));
        list.push(entry("c.txt"));

        let names: Vec<_> = list.snapshot().iter().map(|e| e.name.clone()).collect();
        assert_eq!(names, ["a.txt", "b.txt", "c.txt"]);
    }

    #[test]
    fn test_update_touches_only_the_matching_entry() {
        let list = PreviewList::new();
        let a = entry("a.txt");
        let b = entry("b.txt");
        let a_id = a.temp_id.clone();
        list.push(a);
        list.push(b);

        assert!(list.update(&a_id, |e| e.set_progress(55)));

        let snapshot = list.snapshot();
        assert_eq!(snapshot[0].progress(), 55);
        assert_eq!(snapshot[1].progress(), 0);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let list = PreviewList::new();
        list.push(entry("a.txt"));
        let before = list.snapshot();

        let ghost = TempId::generate("ghost", 1, Utc::now());
        assert!(!list.update(&ghost, |e| e.mark_failed()));
        assert_eq!(*list.snapshot(), *before);
    }

    #[test]
    fn test_snapshots_are_immutable() {
        let list = PreviewList::new();
        let a = entry("a.txt");
        let a_id = a.temp_id.clone();
        list.push(a);

        let old = list.snapshot();
        list.set_progress(&a_id, 90);

        assert_eq!(old[0].progress(), 0);
        assert_eq!(list.snapshot()[0].progress(), 90);
    }

    #[test]
    fn test_remove_by_durable_id() {
        let list = PreviewList::new();
        let mut a = entry("a.txt");
        a.finalize(
            DurableId::new("D3"),
            None,
            Some(DistributionId::new("L3")),
            None,
        );
        list.push(a);
        list.push(entry("b.txt"));

        let removed = list.remove_by_durable_id(&DurableId::new("D3")).unwrap();
        assert_eq!(removed.name, "a.txt");
        assert_eq!(removed.distribution_id(), Some(&DistributionId::new("L3")));
        assert_eq!(list.len(), 1);

        // Second removal finds nothing and changes nothing.
        assert!(list.remove_by_durable_id(&DurableId::new("D3")).is_none());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_uploading_entries_are_invisible_to_durable_lookup() {
        let list = PreviewList::new();
        list.push(entry("a.txt"));
        assert!(list.find_by_durable_id(&DurableId::new("D1")).is_none());
    }
}
