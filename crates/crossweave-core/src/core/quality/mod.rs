//! Board quality scoring.
//!
//! - [`measure`] defines the pluggable [`measure::QualityMeasure`] trait.
//! - [`usual`] implements the standard weighted multi-term measure.
//! - [`neediness`] scores how urgently a placed word needs more crossings.

pub mod measure;
pub mod neediness;
pub mod usual;
