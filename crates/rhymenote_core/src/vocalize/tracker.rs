//! Per-bar revision counters for last-edit-wins vocalization.

use crate::model::phonetics::BarId;
use std::collections::HashMap;

/// Identifies one pending vocalization for one bar text revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VocalizationTicket {
    pub bar_id: BarId,
    pub revision: u64,
}

/// Tracks the latest text revision of every bar.
#[derive(Debug, Default)]
pub struct RevisionTracker {
    revisions: HashMap<BarId, u64>,
}

impl RevisionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a text change and returns the ticket for its vocalization.
    ///
    /// Every earlier ticket for the same bar becomes stale.
    pub fn begin(&mut self, bar_id: BarId) -> VocalizationTicket {
        let revision = self.revisions.entry(bar_id).or_insert(0);
        *revision += 1;
        VocalizationTicket {
            bar_id,
            revision: *revision,
        }
    }

    pub fn is_current(&self, ticket: &VocalizationTicket) -> bool {
        self.revisions.get(&ticket.bar_id) == Some(&ticket.revision)
    }

    /// Makes every outstanding ticket for `bar_id` stale without issuing a new one.
    pub fn invalidate(&mut self, bar_id: BarId) {
        *self.revisions.entry(bar_id).or_insert(0) += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::RevisionTracker;
    use uuid::Uuid;

    #[test]
    fn newer_ticket_makes_older_one_stale() {
        let mut tracker = RevisionTracker::new();
        let bar = Uuid::new_v4();
        let first = tracker.begin(bar);
        let second = tracker.begin(bar);
        assert!(!tracker.is_current(&first));
        assert!(tracker.is_current(&second));
    }

    #[test]
    fn invalidated_bar_has_no_current_ticket() {
        let mut tracker = RevisionTracker::new();
        let bar = Uuid::new_v4();
        let ticket = tracker.begin(bar);
        tracker.invalidate(bar);
        assert!(!tracker.is_current(&ticket));
    }
}
