use crate::core::models::board::Board;
use crate::core::models::retention::ScoredBoard;
use crate::core::quality::measure::QualityMeasure;
use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Default)]
struct BeamState {
    /// Best first.
    entries: Vec<ScoredBoard>,
    /// Every signature offered over the beam's lifetime, accepted or not.
    seen: HashSet<String>,
}

/// A bounded, quality-sorted set of boards with exact-duplicate rejection.
///
/// All state sits behind one lock so boards can be offered from several
/// worker threads through a shared reference.
pub struct Beam {
    capacity: usize,
    measure: Arc<dyn QualityMeasure>,
    state: Mutex<BeamState>,
}

impl Beam {
    pub fn new(capacity: usize, measure: Arc<dyn QualityMeasure>) -> Self {
        Self {
            capacity,
            measure,
            state: Mutex::new(BeamState::default()),
        }
    }

    /// Builds a fresh beam from existing boards under a new measure and capacity.
    pub fn resort<I>(boards: I, measure: Arc<dyn QualityMeasure>, capacity: usize) -> Self
    where
        I: IntoIterator<Item = Board>,
    {
        let beam = Self::new(capacity, measure);
        for board in boards {
            beam.try_add(board);
        }
        beam
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn measure(&self) -> &Arc<dyn QualityMeasure> {
        &self.measure
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Offers a board to the beam and returns whether it was kept.
    ///
    /// A board whose signature this beam has already seen is rejected. Once
    /// the beam is full a board must score strictly above the current worst
    /// entry, which it then displaces.
    pub fn try_add(&self, mut board: Board) -> bool {
        if self.capacity == 0 {
            return false;
        }
        let signature = board.signature().to_string();
        if !self.lock().seen.insert(signature) {
            return false;
        }

        let quality = board.quality(self.measure.as_ref());

        let mut state = self.lock();
        if state.entries.len() >= self.capacity
            && state
                .entries
                .last()
                .is_some_and(|worst| quality <= worst.quality)
        {
            return false;
        }
        let position = state
            .entries
            .iter()
            .position(|entry| quality > entry.quality)
            .unwrap_or(state.entries.len());
        state.entries.insert(position, ScoredBoard { board, quality });
        state.entries.truncate(self.capacity);
        true
    }

    /// Quality of the best board held, if any.
    pub fn best_quality(&self) -> Option<f64> {
        self.lock().entries.first().map(|entry| entry.quality)
    }

    /// Consumes the beam, returning its boards best first.
    pub fn into_sorted(self) -> Vec<ScoredBoard> {
        self.state
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
    }

    /// Consumes the beam, returning only the boards, best first.
    pub fn into_boards(self) -> Vec<Board> {
        self.into_sorted().into_iter().map(|entry| entry.board).collect()
    }

    fn lock(&self) -> MutexGuard<'_, BeamState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for Beam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Beam")
            .field("capacity", &self.capacity)
            .field("len", &self.len())
            .field("measure", &self.measure)
            .finish()
    }
}
