use crate::core::models::board::Board;
use crate::core::models::retention::ChildRetentionPolicy;
use crate::core::models::word::Orientation;
use crate::core::quality::measure::QualityMeasure;
use crate::engine::beam::Beam;
use crate::engine::config::SearchConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, instrument, trace};

#[cfg(feature = "parallel")]
use crate::core::models::retention::ScoredBoard;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "parallel")]
use std::sync::{Mutex, PoisonError};

/// Number of longest pending words tried on each parent.
const CANDIDATE_WINDOW: usize = 4;
/// A window whose shortest word is within this many letters of the longest
/// is extended to every pending word of that shortest length.
const WINDOW_EXTENSION_SLACK: usize = 2;

/// Picks which pending words to try on a board, longest first.
///
/// Takes up to [`CANDIDATE_WINDOW`] words starting from the longest. When the
/// last word taken is within [`WINDOW_EXTENSION_SLACK`] letters of the
/// longest, every other word of that length is taken too. Single-letter words
/// are considered only once nothing longer is pending. Repeated words are
/// tried once.
pub fn candidate_words(pending: &[String]) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut longest_first: Vec<&str> = Vec::with_capacity(pending.len());
    for word in pending.iter().rev() {
        if seen.insert(word.as_str()) {
            longest_first.push(word);
        }
    }
    longest_first.sort_by(|a, b| b.len().cmp(&a.len()));

    if longest_first.iter().any(|w| w.len() > 1) {
        longest_first.retain(|w| w.len() > 1);
    }

    let Some(longest) = longest_first.first().map(|w| w.len()) else {
        return Vec::new();
    };
    let mut chosen = longest_first.len().min(CANDIDATE_WINDOW);
    if chosen == CANDIDATE_WINDOW {
        let last = longest_first[chosen - 1].len();
        if longest - last <= WINDOW_EXTENSION_SLACK {
            while chosen < longest_first.len() && longest_first[chosen].len() == last {
                chosen += 1;
            }
        }
    }
    longest_first.truncate(chosen);
    longest_first
}

/// Every `(row, col, orientation)` at which `word` can be placed on `board`.
fn placement_spots<'a>(
    board: &'a Board,
    word: &'a str,
) -> impl Iterator<Item = (usize, usize, Orientation)> + 'a {
    Orientation::ALL.into_iter().flat_map(move |orientation| {
        (0..board.rows()).flat_map(move |row| {
            (0..board.cols())
                .filter(move |&col| board.is_placeable(word, row, col, orientation))
                .map(move |col| (row, col, orientation))
        })
    })
}

/// A copy of `parent` with `word` placed at the given spot.
fn child_with(
    parent: &Board,
    word: &str,
    (row, col, orientation): (usize, usize, Orientation),
) -> Board {
    trace!(word, row, col, %orientation, "Trying placement.");
    let mut child = parent.clone();
    child.place(word, row, col, orientation, true);
    child
}

/// Grows seed boards one puzzle word per level until every word is placed.
///
/// Each level is a beam of at most `config.beam_width` boards. Every parent
/// keeps the children its retention policy accepts; the survivors of all
/// parents form the next level's beam and the previous level is discarded.
///
/// # Errors
///
/// Returns [`EngineError::Infeasible`] when a level ends with no boards.
#[instrument(skip_all, name = "flesh_task", fields(total_words = total_words))]
pub fn run(
    seeds: Vec<Board>,
    total_words: usize,
    config: &SearchConfig,
    measure: Arc<dyn QualityMeasure>,
    policy: &dyn ChildRetentionPolicy,
    reporter: &ProgressReporter,
) -> Result<Beam, EngineError> {
    let mut beam = Beam::resort(seeds, Arc::clone(&measure), config.beam_width);
    if beam.is_empty() {
        return Err(EngineError::Infeasible {
            level: 1,
            total_words,
        });
    }

    let levels = total_words.saturating_sub(1) as u64;
    reporter.report(Progress::TaskStart { total_steps: levels });

    for level in 1..total_words {
        let parents = beam.into_boards();
        let next = Beam::new(config.beam_width, Arc::clone(&measure));

        let offered = expand_level(parents, &next, measure.as_ref(), policy, config.parallel);

        debug!(
            level = level + 1,
            offered,
            kept = next.len(),
            "Fleshing level complete."
        );
        reporter.report(Progress::TaskIncrement);
        reporter.report(Progress::StatusUpdate {
            text: format!("{} of {} words placed", level + 1, total_words),
        });

        if next.is_empty() {
            reporter.report(Progress::TaskFinish);
            return Err(EngineError::Infeasible {
                level: level + 1,
                total_words,
            });
        }
        beam = next;
    }

    reporter.report(Progress::TaskFinish);
    info!(
        boards = beam.len(),
        best_quality = ?beam.best_quality(),
        "Fleshing finished."
    );
    Ok(beam)
}

/// Expands every parent and offers the retained children to `next`.
///
/// Returns the number of children offered.
#[cfg_attr(not(feature = "parallel"), allow(unused_variables))]
fn expand_level(
    parents: Vec<Board>,
    next: &Beam,
    measure: &dyn QualityMeasure,
    policy: &dyn ChildRetentionPolicy,
    parallel: bool,
) -> usize {
    #[cfg(feature = "parallel")]
    {
        if parallel {
            return expand_level_parallel(parents, next, measure, policy);
        }
    }

    let mut offered = 0;
    for mut parent in parents {
        let words: Vec<String> = candidate_words(parent.pending_words())
            .into_iter()
            .map(str::to_string)
            .collect();
        for word in &words {
            let spots: Vec<_> = placement_spots(&parent, word).collect();
            for spot in spots {
                let child = child_with(&parent, word, spot);
                parent.offer_child(child, measure, policy);
            }
        }
        for child in parent.take_children() {
            offered += 1;
            next.try_add(child.board);
        }
    }
    offered
}

/// Runs one task per (parent, candidate word) pair on the rayon pool.
///
/// Each parent's retained children sit behind their own lock; the merge into
/// `next` happens after all tasks finish, so only the per-parent slots are
/// contended. Results may differ from the sequential order of evaluation.
#[cfg(feature = "parallel")]
fn expand_level_parallel(
    parents: Vec<Board>,
    next: &Beam,
    measure: &dyn QualityMeasure,
    policy: &dyn ChildRetentionPolicy,
) -> usize {
    let slots: Vec<Mutex<Vec<ScoredBoard>>> =
        parents.iter().map(|_| Mutex::new(Vec::new())).collect();

    let tasks: Vec<(usize, &str)> = parents
        .iter()
        .enumerate()
        .flat_map(|(idx, parent)| {
            candidate_words(parent.pending_words())
                .into_iter()
                .map(move |word| (idx, word))
        })
        .collect();

    tasks.par_iter().for_each(|&(idx, word)| {
        let parent = &parents[idx];
        for spot in placement_spots(parent, word) {
            let mut child = child_with(parent, word, spot);
            let quality = child.quality(measure);
            let mut held = slots[idx].lock().unwrap_or_else(PoisonError::into_inner);
            policy.offer(
                &mut held,
                ScoredBoard {
                    board: child,
                    quality,
                },
            );
        }
    });

    let mut offered = 0;
    for slot in slots {
        for child in slot.into_inner().unwrap_or_else(PoisonError::into_inner) {
            offered += 1;
            next.try_add(child.board);
        }
    }
    offered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::index::words::WordIndex;
    use crate::core::models::retention::KeepBest;
    use crate::core::quality::usual::UsualQualityMeasure;
    use crate::engine::tasks::seed;

    fn strings(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn sequential(beam_width: usize) -> SearchConfig {
        SearchConfig {
            beam_width,
            num_solutions: 1,
            parallel: false,
        }
    }

    #[test]
    fn fewer_than_four_words_are_all_tried() {
        let pending = strings(&["AB", "CAT", "GOAT"]);
        assert_eq!(candidate_words(&pending), vec!["GOAT", "CAT", "AB"]);
    }

    #[test]
    fn window_stops_at_four_when_lengths_spread() {
        let pending = strings(&["AB", "CD", "EF", "CAT", "GOAT", "HORSE"]);
        // fourth word has 2 letters, 3 below the longest
        assert_eq!(candidate_words(&pending), vec!["HORSE", "GOAT", "CAT", "EF"]);
    }

    #[test]
    fn window_extends_across_the_fourth_words_length_group() {
        let pending = strings(&["ABC", "DEF", "GHI", "JKL", "MNOP"]);
        let chosen = candidate_words(&pending);
        assert_eq!(chosen.len(), 5);
        assert_eq!(chosen[0], "MNOP");
    }

    #[test]
    fn single_letter_words_wait_until_nothing_longer_remains() {
        let pending = strings(&["A", "I", "CAT"]);
        assert_eq!(candidate_words(&pending), vec!["CAT"]);
        let pending = strings(&["A", "I"]);
        assert_eq!(candidate_words(&pending).len(), 2);
    }

    #[test]
    fn repeated_pending_words_are_tried_once() {
        let pending = strings(&["CAT", "CAT"]);
        assert_eq!(candidate_words(&pending), vec!["CAT"]);
        assert!(candidate_words(&[]).is_empty());
    }

    fn scenario_words() -> Arc<WordIndex> {
        Arc::new(WordIndex::new(["CAT", "DOG", "CARD", "GOAT"]))
    }

    fn assert_complete(board: &Board, words: &WordIndex) {
        for word in board.placed_words() {
            for (_, row, col, letter) in word.cells() {
                assert_eq!(board.cell(row, col).letter, letter, "conflict in {word}");
            }
        }
        for word in words.words() {
            assert!(board.contains_word(word), "{word} missing");
        }
        assert!(board.pending_words().is_empty());
    }

    #[test]
    fn placement_spots_cover_every_valid_position() {
        let board = Board::new(1, 5, Arc::new(WordIndex::new(["CAT"])));
        let spots: Vec<_> = placement_spots(&board, "CAT").collect();
        assert_eq!(
            spots,
            vec![
                (0, 0, Orientation::Across),
                (0, 1, Orientation::Across),
                (0, 2, Orientation::Across),
            ]
        );
    }

    #[test]
    fn sequential_expansion_keeps_at_most_the_policy_slots_per_parent() {
        let words = scenario_words();
        let parents = seed::run(&words, 5, 5);
        let parent_count = parents.len();
        let measure = UsualQualityMeasure::default();
        let next = Beam::new(100, Arc::new(UsualQualityMeasure::default()));

        let offered = expand_level(parents, &next, &measure, &KeepBest::new(1), false);

        assert!(offered >= 1);
        assert!(offered <= parent_count);
        assert!(next.len() <= offered);
        for scored in next.into_sorted() {
            assert_eq!(scored.board.placed_words().len(), 2);
        }
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_fleshing_places_every_word_within_the_beam_width() {
        let words = scenario_words();
        let seeds = seed::run(&words, 5, 5);
        let measure: Arc<dyn QualityMeasure> = Arc::new(UsualQualityMeasure::default());
        let config = SearchConfig {
            beam_width: 6,
            num_solutions: 1,
            parallel: true,
        };

        let beam = run(
            seeds,
            words.len(),
            &config,
            measure,
            &KeepBest::default(),
            &ProgressReporter::new(),
        )
        .unwrap();

        assert!(!beam.is_empty());
        assert!(beam.len() <= 6);
        for scored in beam.into_sorted() {
            assert_complete(&scored.board, &words);
        }
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_level_respects_policy_slots_and_beam_capacity() {
        let words = scenario_words();
        let parents = seed::run(&words, 5, 5);
        let parent_count = parents.len();
        let measure = UsualQualityMeasure::default();
        let next = Beam::new(3, Arc::new(UsualQualityMeasure::default()));

        let offered = expand_level_parallel(parents, &next, &measure, &KeepBest::default());

        assert!(offered >= 1);
        assert!(offered <= 2 * parent_count);
        assert!(next.len() <= 3);
        for scored in next.into_sorted() {
            assert_eq!(scored.board.placed_words().len(), 2);
        }
    }

    #[test]
    fn fleshing_places_every_word() {
        let words = Arc::new(WordIndex::new(["CAT", "DOG", "CARD", "GOAT"]));
        let seeds = seed::run(&words, 5, 5);
        let measure: Arc<dyn QualityMeasure> = Arc::new(UsualQualityMeasure::default());

        let beam = run(
            seeds,
            words.len(),
            &sequential(10),
            measure,
            &KeepBest::default(),
            &ProgressReporter::new(),
        )
        .unwrap();

        assert!(!beam.is_empty());
        assert!(beam.len() <= 10);
        for scored in beam.into_sorted() {
            assert_eq!(scored.board.placed_words().len(), 4);
            assert_complete(&scored.board, &words);
        }
    }

    #[test]
    fn each_level_reports_its_word_count() {
        let words = Arc::new(WordIndex::new(["CAT", "DOG", "CARD"]));
        let seeds = seed::run(&words, 5, 5);
        let measure: Arc<dyn QualityMeasure> = Arc::new(UsualQualityMeasure::default());
        let statuses = std::sync::Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if let Progress::StatusUpdate { text } = event {
                statuses.lock().unwrap().push(text);
            }
        }));

        run(
            seeds,
            words.len(),
            &sequential(5),
            measure,
            &KeepBest::default(),
            &reporter,
        )
        .unwrap();
        drop(reporter);

        assert_eq!(
            statuses.into_inner().unwrap(),
            vec!["2 of 3 words placed", "3 of 3 words placed"]
        );
    }

    #[test]
    fn word_set_that_cannot_fit_is_infeasible() {
        // two 3-letter words on a 1x3 grid cannot both be placed
        let words = Arc::new(WordIndex::new(["CAT", "DOG"]));
        let seeds = seed::run(&words, 1, 3);
        let measure: Arc<dyn QualityMeasure> = Arc::new(UsualQualityMeasure::default());

        let result = run(
            seeds,
            words.len(),
            &sequential(5),
            measure,
            &KeepBest::default(),
            &ProgressReporter::new(),
        );
        assert!(matches!(
            result,
            Err(EngineError::Infeasible {
                level: 2,
                total_words: 2
            })
        ));
    }

    #[test]
    fn no_seeds_is_infeasible_at_the_first_level() {
        let measure: Arc<dyn QualityMeasure> = Arc::new(UsualQualityMeasure::default());
        let result = run(
            Vec::new(),
            3,
            &sequential(5),
            measure,
            &KeepBest::default(),
            &ProgressReporter::new(),
        );
        assert!(matches!(result, Err(EngineError::Infeasible { level: 1, .. })));
    }
}
