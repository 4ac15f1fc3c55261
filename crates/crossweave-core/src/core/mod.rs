//! # Core Module
//!
//! Stateless building blocks of the grid search.
//!
//! ## Architecture
//!
//! - **Grid Representation** ([`models`]) - Cells, placed words and boards
//! - **Lookup Structures** ([`index`]) - Puzzle-word and dictionary indexes
//! - **Scoring** ([`quality`]) - Pluggable quality measures and crossing neediness
//! - **Text I/O** ([`io`]) - Word-list reading and board writing

pub mod index;
pub mod io;
pub mod models;
pub mod quality;
