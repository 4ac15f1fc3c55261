//! # Engine Module
//!
//! The stateful search that turns a word list into finished grids.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Grid size, beam width, coating lengths and quality weights
//! - **Error Handling** ([`error`]) - Engine-specific error types
//! - **Progress Monitoring** ([`progress`]) - Phase and task events for front ends
//! - **Beam** ([`beam`]) - Bounded, deduplicated, quality-sorted board container
//! - **Tasks** ([`tasks`]) - Seeding, fleshing and coating stages
//!
//! Boards are never shared for mutation: every candidate placement is made on
//! its own copy of the parent, so the only synchronized state is a beam and
//! the per-parent child slots used by parallel expansion.

pub mod beam;
pub mod config;
pub mod error;
pub mod progress;
pub mod tasks;
