//! Series alignment: pivoting flat records into per-entity time series.
//!
//! The pivot is a single O(n) pass over the record list. It also fixes the
//! two canonical orderings every downstream structure must index
//! consistently:
//!
//! - `entities`: distinct entity identifiers in first-seen order
//! - `dates`: distinct date strings sorted ascending (lexicographic, which is
//!   chronological for ISO dates)
//!
//! A (entity, date) pair with no record is simply absent from the index.
//! Consumers must treat absence as *missing*, never as zero; zero-filling is
//! an explicit policy applied only by the window builder.

use crate::ingest::table::RecordTable;
use ahash::{AHashMap, AHashSet};

/// Per-entity series indexed by date, plus the canonical orderings.
#[derive(Debug, Clone)]
pub struct AlignedSeries {
    entities: Vec<String>,
    dates: Vec<String>,
    fields: Vec<String>,

    /// entity → date → values (aligned to `fields`). A `NaN` value is a
    /// present-but-unparseable cell and is also treated as missing.
    data: AHashMap<String, AHashMap<String, Vec<f64>>>,
}

impl AlignedSeries {
    /// Pivot a record table into an aligned series in one pass.
    ///
    /// If two records share the same (entity, date) key, the later record
    /// replaces the earlier one.
    pub fn from_records(table: &RecordTable) -> Self {
        let mut entities = Vec::new();
        let mut seen = AHashSet::new();
        let mut date_set = AHashSet::new();
        let mut data: AHashMap<String, AHashMap<String, Vec<f64>>> = AHashMap::new();

        for record in &table.records {
            if seen.insert(record.entity.clone()) {
                entities.push(record.entity.clone());
            }
            date_set.insert(record.date.clone());

            data.entry(record.entity.clone())
                .or_default()
                .insert(record.date.clone(), record.values.clone());
        }

        let mut dates: Vec<String> = date_set.into_iter().collect();
        dates.sort_unstable();

        Self {
            entities,
            dates,
            fields: table.fields.clone(),
            data,
        }
    }

    /// Rebuild a series with identical orderings but new per-date values.
    pub(crate) fn with_data(
        &self,
        data: AHashMap<String, AHashMap<String, Vec<f64>>>,
    ) -> Self {
        Self {
            entities: self.entities.clone(),
            dates: self.dates.clone(),
            fields: self.fields.clone(),
            data,
        }
    }

    /// Canonical entity ordering (first-seen).
    pub fn entities(&self) -> &[String] {
        &self.entities
    }

    /// Canonical date ordering (sorted ascending, de-duplicated).
    pub fn dates(&self) -> &[String] {
        &self.dates
    }

    /// Value field names, in header order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Number of distinct entities.
    pub fn num_entities(&self) -> usize {
        self.entities.len()
    }

    /// Number of distinct dates.
    pub fn num_dates(&self) -> usize {
        self.dates.len()
    }

    /// Index of a field by name.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f == name)
    }

    /// Raw value vector for an (entity, date) pair, if a record exists.
    pub fn values(&self, entity: &str, date: &str) -> Option<&[f64]> {
        self.data
            .get(entity)
            .and_then(|by_date| by_date.get(date))
            .map(Vec::as_slice)
    }

    /// Single field value, with the missing-data policy folded in: `None`
    /// when the (entity, date) pair is absent *or* the cell is `NaN`.
    pub fn value(&self, entity: &str, date: &str, field_idx: usize) -> Option<f64> {
        self.values(entity, date)
            .and_then(|v| v.get(field_idx).copied())
            .filter(|v| v.is_finite())
    }

    /// Iterate over (entity, date, values) triples in unspecified order.
    pub(crate) fn iter_cells(
        &self,
    ) -> impl Iterator<Item = (&str, &str, &[f64])> {
        self.data.iter().flat_map(|(entity, by_date)| {
            by_date
                .iter()
                .map(move |(date, values)| (entity.as_str(), date.as_str(), values.as_slice()))
        })
    }
}
