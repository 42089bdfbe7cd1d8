//! Per-entity time-series structures.
//!
//! - [`align`]: pivots flat records into an entity → date → values index and
//!   fixes the canonical entity/date orderings used by every later stage.
//! - [`normalize`]: per-(entity, field) min-max statistics and their
//!   application, kept separate from missing-data defaulting (that happens
//!   only at window-build time).

pub mod align;
pub mod normalize;

pub use align::AlignedSeries;
pub use normalize::{FieldStats, NormalizationScope, NormalizationStats};
