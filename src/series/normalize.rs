//! Per-entity min-max normalization.
//!
//! For each (entity, field) pair, statistics are the `{min, max}` over every
//! *present, finite* value; applying them maps values into `[0, 1]` via
//! `(v - min) / (max - min)`.
//!
//! Two policies are deliberate and explicit:
//!
//! - Degenerate `max == min` maps every value of that field to 0 rather than
//!   dividing by zero.
//! - Missing entries stay missing. Absent (entity, date) pairs remain absent
//!   and `NaN` cells remain `NaN`; defaulting to zero happens only in the
//!   window builder, so intermediate stages can still distinguish "missing"
//!   from "value is zero".

use crate::series::align::AlignedSeries;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Which date range normalization statistics are fitted on.
///
/// The reference behavior fits over the full series, which leaks test-range
/// information into training-time scaling; `TrainOnly` is the opt-in
/// leak-free alternative (fit on the leading train fraction of dates, apply
/// everywhere).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizationScope {
    /// Fit min/max over every date (reference-faithful default).
    FullSeries,
    /// Fit min/max over the training date range only.
    TrainOnly,
}

impl Default for NormalizationScope {
    fn default() -> Self {
        Self::FullSeries
    }
}

/// Min/max for one (entity, field) pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldStats {
    /// Smallest observed finite value.
    pub min: f64,
    /// Largest observed finite value.
    pub max: f64,
}

impl FieldStats {
    fn empty() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    fn observe(&mut self, value: f64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    fn is_empty(&self) -> bool {
        self.min > self.max
    }

    /// Map a value into `[0, 1]`. `NaN` passes through unchanged (still
    /// missing); a degenerate range maps to 0.
    pub fn normalize(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return value;
        }
        let range = self.max - self.min;
        if range == 0.0 {
            0.0
        } else {
            (value - self.min) / range
        }
    }

    /// Inverse of [`FieldStats::normalize`] for non-degenerate ranges.
    pub fn denormalize(&self, value: f64) -> f64 {
        value * (self.max - self.min) + self.min
    }
}

/// Per-entity, per-field normalization statistics.
#[derive(Debug, Clone)]
pub struct NormalizationStats {
    /// entity → per-field stats (aligned to the series field ordering).
    stats: AHashMap<String, Vec<FieldStats>>,
    num_fields: usize,
}

impl NormalizationStats {
    /// Fit statistics over the full series.
    pub fn fit(series: &AlignedSeries) -> Self {
        Self::fit_range(series, 0..series.num_dates())
    }

    /// Fit statistics over a contiguous range of the canonical date ordering.
    ///
    /// Used for leak-free normalization: fit on the training date range,
    /// apply to everything.
    pub fn fit_range(series: &AlignedSeries, date_range: Range<usize>) -> Self {
        let num_fields = series.fields().len();
        let mut stats: AHashMap<String, Vec<FieldStats>> = series
            .entities()
            .iter()
            .map(|e| (e.clone(), vec![FieldStats::empty(); num_fields]))
            .collect();

        for (entity, entity_stats) in stats.iter_mut() {
            for date in &series.dates()[date_range.clone()] {
                let Some(values) = series.values(entity, date) else {
                    continue;
                };
                for (field_idx, &value) in values.iter().enumerate() {
                    if value.is_finite() {
                        entity_stats[field_idx].observe(value);
                    }
                }
            }
        }

        // Fields with no observations collapse to a degenerate zero range so
        // normalize() yields 0 for any stray value.
        for entity_stats in stats.values_mut() {
            for field_stats in entity_stats.iter_mut() {
                if field_stats.is_empty() {
                    *field_stats = FieldStats { min: 0.0, max: 0.0 };
                }
            }
        }

        Self { stats, num_fields }
    }

    /// Statistics for one (entity, field) pair.
    pub fn get(&self, entity: &str, field_idx: usize) -> Option<&FieldStats> {
        self.stats.get(entity).and_then(|s| s.get(field_idx))
    }

    /// Apply the statistics, producing a new series with values in `[0, 1]`.
    ///
    /// Orderings are preserved; absent entries stay absent and `NaN` stays
    /// `NaN`.
    pub fn apply(&self, series: &AlignedSeries) -> AlignedSeries {
        let mut data: AHashMap<String, AHashMap<String, Vec<f64>>> = AHashMap::new();

        for (entity, date, values) in series.iter_cells() {
            let normalized: Vec<f64> = match self.stats.get(entity) {
                Some(entity_stats) => values
                    .iter()
                    .zip(entity_stats.iter())
                    .map(|(&v, s)| s.normalize(v))
                    .collect(),
                None => values.to_vec(),
            };
            data.entry(entity.to_string())
                .or_default()
                .insert(date.to_string(), normalized);
        }

        series.with_data(data)
    }

    /// Number of fields per entity.
    pub fn num_fields(&self) -> usize {
        self.num_fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::table::{parse_table, TableFormat};

    fn series_from(text: &str) -> AlignedSeries {
        let table = parse_table(text, &TableFormat::default()).unwrap();
        AlignedSeries::from_records(&table)
    }

    #[test]
    fn test_fit_min_max_per_entity() {
        let series = series_from(
            "Date,Symbol,Close\n\
             2020-01-02,AAPL,100.0\n\
             2020-01-03,AAPL,110.0\n\
             2020-01-04,AAPL,120.0\n\
             2020-01-02,MSFT,50.0\n\
             2020-01-03,MSFT,40.0\n",
        );
        let stats = NormalizationStats::fit(&series);

        let aapl = stats.get("AAPL", 0).unwrap();
        assert_eq!(aapl.min, 100.0);
        assert_eq!(aapl.max, 120.0);

        let msft = stats.get("MSFT", 0).unwrap();
        assert_eq!(msft.min, 40.0);
        assert_eq!(msft.max, 50.0);
    }

    #[test]
    fn test_apply_scales_to_unit_interval() {
        let series = series_from(
            "Date,Symbol,Close\n\
             2020-01-02,AAPL,100.0\n\
             2020-01-03,AAPL,110.0\n\
             2020-01-04,AAPL,120.0\n",
        );
        let stats = NormalizationStats::fit(&series);
        let normalized = stats.apply(&series);

        assert_eq!(normalized.value("AAPL", "2020-01-02", 0), Some(0.0));
        assert_eq!(normalized.value("AAPL", "2020-01-03", 0), Some(0.5));
        assert_eq!(normalized.value("AAPL", "2020-01-04", 0), Some(1.0));
    }

    #[test]
    fn test_degenerate_range_maps_to_zero() {
        let series = series_from(
            "Date,Symbol,Close\n\
             2020-01-02,AAPL,42.0\n\
             2020-01-03,AAPL,42.0\n",
        );
        let stats = NormalizationStats::fit(&series);
        let normalized = stats.apply(&series);

        // max == min: every value becomes 0, never NaN.
        assert_eq!(normalized.value("AAPL", "2020-01-02", 0), Some(0.0));
        assert_eq!(normalized.value("AAPL", "2020-01-03", 0), Some(0.0));
    }

    #[test]
    fn test_missing_stays_missing() {
        let series = series_from(
            "Date,Symbol,Open,Close\n\
             2020-01-02,AAPL,1.0,100.0\n\
             2020-01-03,AAPL,bad,110.0\n\
             2020-01-04,MSFT,2.0,50.0\n",
        );
        let stats = NormalizationStats::fit(&series);
        let normalized = stats.apply(&series);

        // NaN cell survives normalization as NaN.
        assert_eq!(normalized.value("AAPL", "2020-01-03", 0), None);
        // Absent pair stays absent.
        assert!(normalized.values("AAPL", "2020-01-04").is_none());
    }

    #[test]
    fn test_denormalize_round_trip() {
        let series = series_from(
            "Date,Symbol,Open,Close\n\
             2020-01-02,AAPL,10.0,100.0\n\
             2020-01-03,AAPL,20.0,150.0\n\
             2020-01-04,AAPL,15.0,125.0\n",
        );
        let stats = NormalizationStats::fit(&series);
        let normalized = stats.apply(&series);

        for date in series.dates() {
            for field_idx in 0..series.fields().len() {
                let original = series.value("AAPL", date, field_idx).unwrap();
                let scaled = normalized.value("AAPL", date, field_idx).unwrap();
                let restored = stats.get("AAPL", field_idx).unwrap().denormalize(scaled);
                assert!(
                    (restored - original).abs() < 1e-9,
                    "round trip failed: {original} -> {scaled} -> {restored}"
                );
            }
        }
    }

    #[test]
    fn test_fit_range_excludes_later_dates() {
        let series = series_from(
            "Date,Symbol,Close\n\
             2020-01-02,AAPL,100.0\n\
             2020-01-03,AAPL,110.0\n\
             2020-01-04,AAPL,200.0\n",
        );
        // Fit on the first two dates only: the 200.0 outlier is unseen.
        let stats = NormalizationStats::fit_range(&series, 0..2);
        let field = stats.get("AAPL", 0).unwrap();
        assert_eq!(field.max, 110.0);

        // Applying still covers all dates; out-of-range values exceed 1.
        let normalized = stats.apply(&series);
        let v = normalized.value("AAPL", "2020-01-04", 0).unwrap();
        assert!(v > 1.0);
    }
}
