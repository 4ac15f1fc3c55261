//! # Workflows Module
//!
//! High-level entry points that run the complete grid search.
//!
//! ## Overview
//!
//! A workflow validates its inputs, sequences the engine's stages, reports
//! progress and returns finished boards ranked best first. It is the API
//! front ends are expected to call.
//!
//! - **Build Workflow** ([`build`]) - Seeding, fleshing, ranking and optional
//!   coating of a puzzle word list on a fixed-size grid.

pub mod build;
