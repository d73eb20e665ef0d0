//! Once-per-id deduplication of reward notifications.

use dashmap::DashSet;

use bunny_core::types::NotificationId;

/// Notification ids already converted into reward events.
///
/// Grows monotonically for the lifetime of the session; ids are never removed.
#[derive(Debug, Default)]
pub struct ProcessedIds {
    ids: DashSet<NotificationId>,
}

impl ProcessedIds {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the set with ids processed by an earlier session
    pub fn from_ids(ids: impl IntoIterator<Item = NotificationId>) -> Self {
        let set = Self::new();
        for id in ids {
            set.ids.insert(id);
        }
        set
    }

    /// Claim an id for processing.
    ///
    /// Returns `true` exactly once per id, `false` for every later claim.
    pub fn claim(&self, id: NotificationId) -> bool {
        self.ids.insert(id)
    }

    /// Whether the id was already claimed
    pub fn contains(&self, id: NotificationId) -> bool {
        self.ids.contains(&id)
    }

    /// Number of claimed ids
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing has been claimed yet
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Sorted copy of all claimed ids
    pub fn snapshot(&self) -> Vec<NotificationId> {
        let mut ids: Vec<NotificationId> = self.ids.iter().map(|r| *r.key()).collect();
        ids.sort_unstable();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_once() {
        let set = ProcessedIds::new();
        assert!(set.claim(NotificationId(1)));
        assert!(!set.claim(NotificationId(1)));
        assert!(set.claim(NotificationId(2)));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_seeded_ids_are_already_claimed() {
        let set = ProcessedIds::from_ids([NotificationId(5), NotificationId(3)]);
        assert!(set.contains(NotificationId(3)));
        assert!(!set.claim(NotificationId(5)));
        assert_eq!(set.snapshot(), vec![NotificationId(3), NotificationId(5)]);
    }
}
