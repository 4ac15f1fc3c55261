//! # Crossweave Core Library
//!
//! Builds dense crossword grids from a list of required words, then optionally
//! fills the remaining white space with words from a larger dictionary.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture.
//!
//! - **[`core`]: The Foundation.** Stateless grid models (`Board`, `Cell`,
//!   `PlacedWord`), the puzzle-word and dictionary indexes, pluggable quality
//!   measures, and plain-text I/O.
//!
//! - **[`engine`]: The Logic Core.** The heuristic search itself: a bounded,
//!   signature-deduplicated `Beam`, and the seeding, fleshing and coating
//!   tasks that grow boards one word at a time. Configuration, errors and
//!   progress reporting live here too.
//!
//! - **[`workflows`]: The Public API.** Validates inputs and sequences the
//!   engine's stages into a single call returning finished boards.
//!
//! ## Example
//!
//! ```no_run
//! use crossweave::engine::config::BuildConfigBuilder;
//! use crossweave::engine::progress::ProgressReporter;
//! use crossweave::workflows::build;
//!
//! let config = BuildConfigBuilder::new().rows(5).cols(5).build()?;
//! let result = build::run(&["CAT", "DOG", "CARD", "GOAT"], None, &config, &ProgressReporter::new())?;
//! if let Some(best) = result.best() {
//!     print!("{}", best.board);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod core;
pub mod engine;
pub mod workflows;
