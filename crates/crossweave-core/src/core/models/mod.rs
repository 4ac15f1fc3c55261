//! # Core Models Module
//!
//! The grid data structures the search operates on.
//!
//! ## Key Components
//!
//! - [`cell`] - One grid square: its letter and across/down occupancy
//! - [`word`] - Word orientation and the immutable placed-word record
//! - [`board`] - The grid, its placed-word ledger, hard edges and memoized values
//! - [`retention`] - Policies deciding which derived boards a parent keeps
//!
//! ## Usage
//!
//! ```ignore
//! use crossweave::core::index::words::WordIndex;
//! use crossweave::core::models::{board::Board, word::Orientation};
//!
//! let words = Arc::new(WordIndex::new(["CAT", "CARD"]));
//! let mut board = Board::new(5, 5, words);
//! if board.is_placeable("CAT", 0, 0, Orientation::Across) {
//!     board.place("CAT", 0, 0, Orientation::Across, true);
//! }
//! ```

pub mod board;
pub mod cell;
pub mod retention;
pub mod word;
