use super::board::Board;
use std::fmt;

/// A board paired with the quality it scored under some measure.
#[derive(Debug, Clone)]
pub struct ScoredBoard {
    pub board: Board,
    pub quality: f64,
}

/// Decides which derived boards a parent keeps while it is being expanded.
///
/// During fleshing every placement of every candidate word on a parent yields
/// a child board. Rather than sending all of them to the next level, each
/// parent retains a handful according to its policy.
pub trait ChildRetentionPolicy: Send + Sync + fmt::Debug {
    /// Offers `candidate` to the children currently `held` by a parent.
    ///
    /// `held` is kept sorted best-first; the policy either inserts the
    /// candidate (possibly evicting another) or drops it.
    fn offer(&self, held: &mut Vec<ScoredBoard>, candidate: ScoredBoard);
}

/// Keeps the best `slots` children by quality.
///
/// A candidate displaces a held child only when it scores strictly higher.
/// The default of two slots is the best/second-best behavior the search
/// depends on for diversity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeepBest {
    slots: usize,
}

impl KeepBest {
    pub fn new(slots: usize) -> Self {
        Self { slots }
    }

    pub fn slots(&self) -> usize {
        self.slots
    }
}

impl Default for KeepBest {
    fn default() -> Self {
        Self::new(2)
    }
}

impl ChildRetentionPolicy for KeepBest {
    fn offer(&self, held: &mut Vec<ScoredBoard>, candidate: ScoredBoard) {
        if self.slots == 0 {
            return;
        }
        let position = held
            .iter()
            .position(|kept| candidate.quality > kept.quality)
            .unwrap_or(held.len());
        if position >= self.slots {
            return;
        }
        held.insert(position, candidate);
        held.truncate(self.slots);
    }
}

/// Scratch storage for the children a board retains while it is expanded.
///
/// Cloning a board never clones its retained children: a copy starts with
/// none.
#[derive(Debug, Default)]
pub(crate) struct RetainedChildren(pub(crate) Vec<ScoredBoard>);

impl Clone for RetainedChildren {
    fn clone(&self) -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::index::words::WordIndex;
    use std::sync::Arc;

    fn scored(quality: f64) -> ScoredBoard {
        ScoredBoard {
            board: Board::new(2, 2, Arc::new(WordIndex::default())),
            quality,
        }
    }

    fn qualities(held: &[ScoredBoard]) -> Vec<f64> {
        held.iter().map(|s| s.quality).collect()
    }

    #[test]
    fn keep_best_retains_only_the_top_two() {
        let policy = KeepBest::default();
        let mut held = Vec::new();
        for q in [3.0, 1.0, 5.0, 4.0, 2.0] {
            policy.offer(&mut held, scored(q));
        }
        assert_eq!(qualities(&held), vec![5.0, 4.0]);
    }

    #[test]
    fn ties_do_not_displace_held_children() {
        let policy = KeepBest::default();
        let mut held = Vec::new();
        policy.offer(&mut held, scored(2.0));
        policy.offer(&mut held, scored(2.0));
        policy.offer(&mut held, scored(2.0));
        assert_eq!(held.len(), 2);
        policy.offer(&mut held, scored(1.0));
        assert_eq!(qualities(&held), vec![2.0, 2.0]);
    }

    #[test]
    fn second_slot_is_filled_by_a_weaker_candidate() {
        let policy = KeepBest::default();
        let mut held = Vec::new();
        policy.offer(&mut held, scored(5.0));
        policy.offer(&mut held, scored(1.0));
        assert_eq!(qualities(&held), vec![5.0, 1.0]);
    }

    #[test]
    fn zero_slots_keeps_nothing() {
        let policy = KeepBest::new(0);
        let mut held = Vec::new();
        policy.offer(&mut held, scored(1.0));
        assert!(held.is_empty());
    }

    #[test]
    fn cloning_retained_children_yields_an_empty_set() {
        let children = RetainedChildren(vec![scored(1.0)]);
        assert!(children.clone().0.is_empty());
    }
}
