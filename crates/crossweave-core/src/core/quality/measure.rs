use crate::core::models::board::Board;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_MEASURE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a quality measure instance.
///
/// Boards memoize their quality together with the id of the measure that
/// produced it, so a value computed under one weighting is never reused under
/// another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeasureId(u64);

impl MeasureId {
    /// Allocates a fresh, process-unique id.
    pub fn next() -> Self {
        Self(NEXT_MEASURE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A scoring function over boards. Higher is better.
pub trait QualityMeasure: Send + Sync + fmt::Debug {
    /// Identity used to tag memoized quality values.
    fn id(&self) -> MeasureId;

    /// Computes the quality of `board`.
    fn evaluate(&self, board: &Board) -> f64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measure_ids_are_unique() {
        let a = MeasureId::next();
        let b = MeasureId::next();
        assert_ne!(a, b);
    }
}
