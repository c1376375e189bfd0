//! Per-subject completion tracking.
//!
//! A [`SubjectProgress`] mirrors one user's progress entry for one subject:
//! the set of completed topics, the derived set of completed units, and the
//! percentage. Unit completion is never set directly — it is re-derived from
//! topic completion on every mutation.

use std::collections::HashSet;

use uuid::Uuid;

use crate::percentage;

/// One user's progress within one subject. Created lazily at 0% the first
/// time the user interacts with the subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectProgress {
    pub subject_id: Uuid,
    pub completed_topics: HashSet<Uuid>,
    pub completed_units: HashSet<Uuid>,
    /// Derived, not authoritative; see [`SubjectProgress::recompute`].
    pub percentage: u8,
}

impl SubjectProgress {
    pub fn new(subject_id: Uuid) -> Self {
        Self {
            subject_id,
            completed_topics: HashSet::new(),
            completed_units: HashSet::new(),
            percentage: 0,
        }
    }

    /// Mark a topic complete. Set semantics: re-marking is a no-op, never an
    /// error. When every topic of `unit_topic_ids` is now complete, the unit
    /// joins the completed set. Returns whether the topic set changed.
    pub fn mark_topic_complete(
        &mut self,
        unit_id: Uuid,
        topic_id: Uuid,
        unit_topic_ids: &[Uuid],
    ) -> bool {
        let inserted = self.completed_topics.insert(topic_id);
        // A unit with no topics is never considered complete.
        if !unit_topic_ids.is_empty()
            && unit_topic_ids
                .iter()
                .all(|t| self.completed_topics.contains(t))
        {
            self.completed_units.insert(unit_id);
        }
        inserted
    }

    /// Unmark a topic. Removing any topic of a completed unit takes the unit
    /// out of the completed set too. Removing an absent topic is a no-op.
    /// Returns whether the topic set changed.
    pub fn unmark_topic_complete(&mut self, unit_id: Uuid, topic_id: Uuid) -> bool {
        let removed = self.completed_topics.remove(&topic_id);
        if removed {
            self.completed_units.remove(&unit_id);
        }
        removed
    }

    /// Recompute the percentage against the subject's current topic total.
    ///
    /// The total comes from the catalog at call time, not a cached value, so
    /// catalog growth retroactively changes percentages.
    pub fn recompute(&mut self, total_topics_in_subject: usize) {
        self.percentage = percentage(self.completed_topics.len(), total_topics_in_subject);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<Uuid> {
        (0..n).map(|_| Uuid::new_v4()).collect()
    }

    #[test]
    fn test_marking_every_topic_yields_100() {
        let subject = Uuid::new_v4();
        let unit = Uuid::new_v4();
        let topics = ids(4);
        let mut progress = SubjectProgress::new(subject);
        for t in &topics {
            progress.mark_topic_complete(unit, *t, &topics);
        }
        progress.recompute(topics.len());
        assert_eq!(progress.percentage, 100);

        progress.unmark_topic_complete(unit, topics[2]);
        progress.recompute(topics.len());
        assert!(progress.percentage < 100);
    }

    #[test]
    fn test_last_topic_completes_unit() {
        let unit = Uuid::new_v4();
        let topics = ids(3);
        let mut progress = SubjectProgress::new(Uuid::new_v4());
        progress.mark_topic_complete(unit, topics[0], &topics);
        progress.mark_topic_complete(unit, topics[1], &topics);
        assert!(!progress.completed_units.contains(&unit));

        progress.mark_topic_complete(unit, topics[2], &topics);
        assert!(progress.completed_units.contains(&unit));
    }

    #[test]
    fn test_unmarking_any_topic_removes_unit() {
        let unit = Uuid::new_v4();
        let topics = ids(3);
        let mut progress = SubjectProgress::new(Uuid::new_v4());
        for t in &topics {
            progress.mark_topic_complete(unit, *t, &topics);
        }
        assert!(progress.completed_units.contains(&unit));

        progress.unmark_topic_complete(unit, topics[0]);
        assert!(!progress.completed_units.contains(&unit));
        assert_eq!(progress.completed_topics.len(), 2);
    }

    #[test]
    fn test_re_marking_is_a_no_op() {
        let unit = Uuid::new_v4();
        let topics = ids(2);
        let mut progress = SubjectProgress::new(Uuid::new_v4());
        assert!(progress.mark_topic_complete(unit, topics[0], &topics));
        assert!(!progress.mark_topic_complete(unit, topics[0], &topics));
        assert_eq!(progress.completed_topics.len(), 1);
    }

    #[test]
    fn test_unmarking_absent_topic_is_a_no_op() {
        let unit = Uuid::new_v4();
        let mut progress = SubjectProgress::new(Uuid::new_v4());
        assert!(!progress.unmark_topic_complete(unit, Uuid::new_v4()));
    }

    #[test]
    fn test_lazy_entry_starts_at_zero() {
        let progress = SubjectProgress::new(Uuid::new_v4());
        assert_eq!(progress.percentage, 0);
        assert!(progress.completed_topics.is_empty());
        assert!(progress.completed_units.is_empty());
    }

    #[test]
    fn test_catalog_growth_lowers_percentage() {
        let unit = Uuid::new_v4();
        let topics = ids(2);
        let mut progress = SubjectProgress::new(Uuid::new_v4());
        for t in &topics {
            progress.mark_topic_complete(unit, *t, &topics);
        }
        progress.recompute(2);
        assert_eq!(progress.percentage, 100);
        // Two new topics were added to the subject since.
        progress.recompute(4);
        assert_eq!(progress.percentage, 50);
    }

    #[test]
    fn test_empty_unit_never_completes() {
        let unit = Uuid::new_v4();
        let mut progress = SubjectProgress::new(Uuid::new_v4());
        progress.mark_topic_complete(unit, Uuid::new_v4(), &[]);
        assert!(!progress.completed_units.contains(&unit));
    }
}
