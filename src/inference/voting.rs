//! Majority voting over per-tree labels.

/// Result of a majority vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteResult {
    /// The winning label, or `None` if no valid label was counted.
    pub leader: Option<i16>,
    /// Vote count of the leader (0 when `leader` is `None`).
    pub count: u16,
}

/// Tallies per-tree labels and picks the most frequent one.
///
/// The class cardinality is fixed at construction; it sizes the transient
/// tally buffer used by each [`vote`](Self::vote) call, so calls stay
/// independent and the voter can be shared across threads.
///
/// Ties are resolved in favor of the earliest tree whose label first reached
/// the leading count: the leader updates only on a strict count improvement,
/// never on an equal count. Draw detection (reporting a tie as such) is
/// deliberately not implemented; see [`ClassificationStatus::Draw`].
///
/// [`ClassificationStatus::Draw`]: super::ClassificationStatus::Draw
#[derive(Debug, Clone, Copy)]
pub struct MajorityVoter {
    num_classes: u16,
}

impl MajorityVoter {
    /// Create a voter for a classifier with `num_classes` classes.
    pub fn new(num_classes: u16) -> Self {
        Self { num_classes }
    }

    /// Class cardinality this voter tallies over.
    #[inline]
    pub fn num_classes(&self) -> u16 {
        self.num_classes
    }

    /// Tally `labels` in order and return the leader and its count.
    ///
    /// Negative labels (the pruned sentinel) and labels at or above
    /// `num_classes` are excluded from the tally.
    pub fn vote<I>(&self, labels: I) -> VoteResult
    where
        I: IntoIterator<Item = i16>,
    {
        let mut counts = vec![0u16; self.num_classes as usize];
        let mut leader = None;
        let mut max_count = 0u16;

        for label in labels {
            if label < 0 {
                continue;
            }
            let Some(count) = counts.get_mut(label as usize) else {
                continue;
            };
            *count += 1;
            if *count > max_count {
                max_count = *count;
                leader = Some(label);
            }
        }

        VoteResult {
            leader,
            count: max_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_majority() {
        let voter = MajorityVoter::new(3);
        let result = voter.vote([1, 1, 2]);

        assert_eq!(result.leader, Some(1));
        assert_eq!(result.count, 2);
    }

    #[test]
    fn tie_goes_to_first_label_at_leading_count() {
        let voter = MajorityVoter::new(3);
        let result = voter.vote([1, 2]);

        assert_eq!(result.leader, Some(1));
        assert_eq!(result.count, 1);
    }

    #[test]
    fn later_strict_improvement_takes_over() {
        let voter = MajorityVoter::new(3);
        // 2 ties at one vote, then overtakes with a second.
        let result = voter.vote([1, 2, 2]);

        assert_eq!(result.leader, Some(2));
        assert_eq!(result.count, 2);
    }

    #[test]
    fn negative_labels_never_tallied() {
        let voter = MajorityVoter::new(4);
        let result = voter.vote([-1, -1, 3]);

        assert_eq!(result.leader, Some(3));
        assert_eq!(result.count, 1);
    }

    #[test]
    fn labels_beyond_cardinality_excluded() {
        let voter = MajorityVoter::new(2);
        let result = voter.vote([5, 5, 1]);

        assert_eq!(result.leader, Some(1));
        assert_eq!(result.count, 1);
    }

    #[test]
    fn no_valid_labels_leaves_leader_unset() {
        let voter = MajorityVoter::new(3);

        let result = voter.vote(std::iter::empty());
        assert_eq!(result.leader, None);
        assert_eq!(result.count, 0);

        let result = voter.vote([-1, -2]);
        assert_eq!(result.leader, None);
        assert_eq!(result.count, 0);
    }

    #[test]
    fn zero_classes_counts_nothing() {
        let voter = MajorityVoter::new(0);
        let result = voter.vote([0, 1]);

        assert_eq!(result.leader, None);
        assert_eq!(result.count, 0);
    }
}
