use crate::core::index::dictionary::DictionaryIndex;
use crate::core::index::words::WordIndex;
use crate::core::models::board::Board;
use crate::core::models::retention::{ChildRetentionPolicy, KeepBest, ScoredBoard};
use crate::core::quality::measure::QualityMeasure;
use crate::core::quality::usual::UsualQualityMeasure;
use crate::engine::beam::Beam;
use crate::engine::config::BuildConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::tasks;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// A finished board and the quality it was ranked by.
#[derive(Debug, Clone)]
pub struct Solution {
    pub board: Board,
    pub quality: f64,
}

impl From<ScoredBoard> for Solution {
    fn from(scored: ScoredBoard) -> Self {
        Self {
            board: scored.board,
            quality: scored.quality,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BuildResult {
    /// Finished boards, best first.
    pub solutions: Vec<Solution>,
}

impl BuildResult {
    pub fn best(&self) -> Option<&Solution> {
        self.solutions.first()
    }
}

/// Builds grids for `words` with the default two-best child retention.
///
/// See [`run_with_policy`].
#[instrument(skip_all, name = "build_workflow")]
pub fn run<S: AsRef<str>>(
    words: &[S],
    dictionary: Option<&DictionaryIndex>,
    config: &BuildConfig,
    reporter: &ProgressReporter,
) -> Result<BuildResult, EngineError> {
    run_with_policy(words, dictionary, config, &KeepBest::default(), reporter)
}

/// Builds grids for `words`, retaining children per `policy` while fleshing.
///
/// Stages: validation, seeding, fleshing, ranking down to
/// `config.search.num_solutions`, then coating when a dictionary is given.
///
/// # Errors
///
/// Fails before any search work if the word list is empty, a word is not
/// made of ASCII letters, or a word is longer than the larger grid dimension.
/// Fails with [`EngineError::Infeasible`] when fleshing runs out of boards.
pub fn run_with_policy<S: AsRef<str>>(
    words: &[S],
    dictionary: Option<&DictionaryIndex>,
    config: &BuildConfig,
    policy: &dyn ChildRetentionPolicy,
    reporter: &ProgressReporter,
) -> Result<BuildResult, EngineError> {
    // === Phase 0: Validation ===
    let words = validate_words(words, config)?;
    let index = Arc::new(WordIndex::new(&words));
    info!(
        words = index.len(),
        rows = config.rows,
        cols = config.cols,
        "Starting grid build."
    );

    let usual = Arc::new(UsualQualityMeasure::new(config.quality.clone()));
    let measure: Arc<dyn QualityMeasure> = usual.clone();

    // === Phase 1: Seeding ===
    reporter.report(Progress::PhaseStart { name: "Seeding" });
    let seeds = tasks::seed::run(&index, config.rows, config.cols);
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: Fleshing ===
    reporter.report(Progress::PhaseStart { name: "Fleshing" });
    let fleshed = tasks::flesh::run(
        seeds,
        index.len(),
        &config.search,
        Arc::clone(&measure),
        policy,
        reporter,
    )?;
    reporter.report(Progress::PhaseFinish);

    // === Phase 3: Ranking ===
    let ranked = Beam::resort(
        fleshed.into_boards(),
        Arc::clone(&measure),
        config.search.num_solutions,
    );
    let mut finished = ranked.into_sorted();
    for scored in &mut finished {
        scored.board.mark_puzzle_complete();
    }
    info!(kept = finished.len(), "Puzzle placement complete.");
    debug!(
        terms = ?usual.summed_breakdown(finished.iter().map(|s| &s.board)),
        "Quality terms summed over kept boards."
    );

    // === Phase 4: Coating (optional) ===
    if let Some(dictionary) = dictionary {
        finished = coat(finished, dictionary, config, reporter);
    } else {
        info!("No dictionary supplied; skipping coating.");
    }

    match finished.first() {
        Some(best) => reporter.report(Progress::Message(format!(
            "{} board(s) place every word; best quality {:.4}",
            finished.len(),
            best.quality
        ))),
        None => warn!("Build produced no boards."),
    }
    let result = BuildResult {
        solutions: finished.into_iter().map(Solution::from).collect(),
    };
    info!(
        "Build complete. Returning {} solution(s).",
        result.solutions.len()
    );
    Ok(result)
}

fn validate_words<S: AsRef<str>>(
    words: &[S],
    config: &BuildConfig,
) -> Result<Vec<String>, EngineError> {
    if words.is_empty() {
        return Err(EngineError::EmptyWordList);
    }
    let max = config.max_word_length();
    words
        .iter()
        .map(|raw| {
            let word = raw.as_ref().trim().to_uppercase();
            if word.is_empty() || !word.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(EngineError::InvalidWord {
                    word: raw.as_ref().to_string(),
                });
            }
            if word.len() > max {
                return Err(EngineError::WordTooLong {
                    length: word.len(),
                    word,
                    max,
                });
            }
            Ok(word)
        })
        .collect()
}

fn coat(
    finished: Vec<ScoredBoard>,
    dictionary: &DictionaryIndex,
    config: &BuildConfig,
    reporter: &ProgressReporter,
) -> Vec<ScoredBoard> {
    reporter.report(Progress::PhaseStart { name: "Coating" });
    let weights = config.coating_quality();
    let measure: Arc<dyn QualityMeasure> = Arc::new(UsualQualityMeasure::new(weights.clone()));
    let boards: Vec<Board> = finished.into_iter().map(|s| s.board).collect();
    let coated = tasks::coat::run(
        boards,
        dictionary,
        &config.coating,
        weights.virgin_factor,
        measure,
        config.search.num_solutions,
        config.search.parallel,
        reporter,
    );
    reporter.report(Progress::PhaseFinish);
    coated.into_sorted()
}
