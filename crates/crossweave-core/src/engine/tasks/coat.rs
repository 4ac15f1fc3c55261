use crate::core::index::dictionary::DictionaryIndex;
use crate::core::models::board::Board;
use crate::core::models::word::{Orientation, PlacedWord};
use crate::core::quality::measure::QualityMeasure;
use crate::core::quality::neediness::crossing_neediness;
use crate::engine::beam::Beam;
use crate::engine::config::CoatingConfig;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::tasks::neediness_queue::NeedinessQueue;
use std::sync::Arc;
use tracing::{debug, info, instrument, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A coat word chosen to cross a placed word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoatPlacement {
    pub word: String,
    pub row: usize,
    pub col: usize,
    pub orientation: Orientation,
}

/// Empty cells usable from `(row, col)` in one direction along `orientation`.
///
/// Walks away from the cell until the grid border, a hard edge or a filled
/// cell. When the walk ends at a filled cell the last empty cell is left as a
/// separator. Returns `None` if the neighboring cell is itself filled, since
/// any word through `(row, col)` would then run into it.
fn free_run(
    board: &Board,
    row: usize,
    col: usize,
    orientation: Orientation,
    forward: bool,
) -> Option<usize> {
    let (dr, dc) = orientation.step();
    let mut count = 0;
    let (mut r, mut c) = (row, col);
    loop {
        let next = if forward {
            Some((r + dr, c + dc))
        } else {
            r.checked_sub(dr).zip(c.checked_sub(dc))
        };
        let Some((nr, nc)) = next else {
            return Some(count);
        };
        let Some(cell) = board.get(nr, nc) else {
            return Some(count);
        };
        let boundary = if forward { (nr, nc) } else { (r, c) };
        if board.hard_edge(orientation, boundary.0, boundary.1) || !cell.is_empty() {
            return if count == 0 { None } else { Some(count - 1) };
        }
        count += 1;
        (r, c) = (nr, nc);
    }
}

/// Coat word lengths to try: the optimum, then longer up to `max`, then
/// shorter down to `min`.
pub fn length_order(optimum: usize, min: usize, max: usize) -> Vec<usize> {
    let mut lengths: Vec<usize> = (optimum.max(min)..=max).collect();
    lengths.extend((min..optimum.min(max + 1)).rev());
    lengths
}

/// Finds a dictionary word crossing `target` at one of its uncrossed letters.
///
/// Letters are tried in order along the word; the first valid coat word wins.
pub fn find_crossing(
    board: &Board,
    target: &PlacedWord,
    dictionary: &DictionaryIndex,
    config: &CoatingConfig,
) -> Option<CoatPlacement> {
    let orientation = target.orientation.perpendicular();
    let (dr, dc) = orientation.step();

    for (offset, row, col, letter) in target.cells() {
        if board.is_crossed(target, offset) {
            continue;
        }
        let Some(before) = free_run(board, row, col, orientation, false) else {
            continue;
        };
        let Some(after) = free_run(board, row, col, orientation, true) else {
            continue;
        };
        let room = (before + after + 1).min(dictionary.max_length());

        for length in length_order(config.optimum_length, config.min_length, room) {
            for candidate in dictionary.candidates(letter, length) {
                if candidate.offset > before || length - candidate.offset - 1 > after {
                    continue;
                }
                if board.contains_word(&candidate.word) {
                    continue;
                }
                let start_row = row - dr * candidate.offset;
                let start_col = col - dc * candidate.offset;
                if board.is_placeable(&candidate.word, start_row, start_col, orientation) {
                    trace!(
                        word = %target.text,
                        coat = %candidate.word,
                        offset,
                        "Found coat word."
                    );
                    return Some(CoatPlacement {
                        word: candidate.word.clone(),
                        row: start_row,
                        col: start_col,
                        orientation,
                    });
                }
            }
        }
    }
    None
}

/// Fills white space on one board, neediest puzzle word first.
///
/// Each success places a coat word and re-scores its target; a word for which
/// no crossing can be found is dropped from the queue and not retried.
pub fn coat_board(
    mut board: Board,
    dictionary: &DictionaryIndex,
    config: &CoatingConfig,
    virgin_factor: f64,
) -> Board {
    let mut queue = NeedinessQueue::new(&board, virgin_factor);
    let mut coated = 0usize;

    while let Some(entry) = queue.neediest() {
        let target = board.placed_words()[entry.word].clone();
        match find_crossing(&board, &target, dictionary, config) {
            Some(coat) => {
                board.place(&coat.word, coat.row, coat.col, coat.orientation, false);
                coated += 1;
                queue.rescore(entry.word, crossing_neediness(&board, &target, virgin_factor));
            }
            None => {
                queue.pop_neediest();
            }
        }
    }

    debug!(coat_words = coated, "Board coated.");
    board
}

/// Coats every board and ranks the results in a final beam.
///
/// Boards are coated on the rayon pool when `parallel` is set and the crate
/// is built with the `parallel` feature. Coating each board is independent
/// and results keep their input order, so both modes rank the same boards.
#[allow(clippy::too_many_arguments)]
#[instrument(skip_all, name = "coat_task")]
pub fn run(
    boards: Vec<Board>,
    dictionary: &DictionaryIndex,
    config: &CoatingConfig,
    virgin_factor: f64,
    measure: Arc<dyn QualityMeasure>,
    capacity: usize,
    parallel: bool,
    reporter: &ProgressReporter,
) -> Beam {
    reporter.report(Progress::TaskStart {
        total_steps: boards.len() as u64,
    });

    let coated = coat_all(boards, dictionary, config, virgin_factor, parallel, reporter);

    let beam = Beam::resort(coated, measure, capacity);
    reporter.report(Progress::TaskFinish);
    info!(
        boards = beam.len(),
        best_quality = ?beam.best_quality(),
        "Coating finished."
    );
    beam
}

#[cfg_attr(not(feature = "parallel"), allow(unused_variables))]
fn coat_all(
    boards: Vec<Board>,
    dictionary: &DictionaryIndex,
    config: &CoatingConfig,
    virgin_factor: f64,
    parallel: bool,
    reporter: &ProgressReporter,
) -> Vec<Board> {
    let coat_one = |board: Board| {
        let coated = coat_board(board, dictionary, config, virgin_factor);
        reporter.report(Progress::TaskIncrement);
        coated
    };

    #[cfg(feature = "parallel")]
    {
        if parallel {
            return boards.into_par_iter().map(coat_one).collect();
        }
    }

    boards.into_iter().map(coat_one).collect()
}
