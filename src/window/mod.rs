//! Window and label construction.
//!
//! Slices a normalized [`crate::series::AlignedSeries`] into fixed-length
//! input windows and multi-horizon binary targets, one pair per anchor date.
//! This is the only stage that applies the explicit missing-data default
//! (absent or `NaN` feature values become 0.0, unresolvable labels become 0).

pub mod builder;

pub use builder::{WindowBuilder, WindowConfig};
