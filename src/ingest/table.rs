//! Headered time-series CSV ingestion.
//!
//! The first line names the columns; it must include an entity identifier
//! column and a date column. Every other column is treated as a numeric value
//! field. Data rows are matched positionally to the header: a cell that fails
//! to parse as a number becomes `NaN` and flows through later stages as
//! "missing" rather than failing the row.

use crate::error::{DatasetError, Result};
use serde::{Deserialize, Serialize};

/// Column naming for the time-series format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableFormat {
    /// Header name of the entity identifier column.
    pub entity_column: String,

    /// Header name of the date column.
    pub date_column: String,

    /// Field delimiter.
    pub delimiter: char,
}

impl Default for TableFormat {
    fn default() -> Self {
        Self {
            entity_column: "Symbol".to_string(),
            date_column: "Date".to_string(),
            delimiter: ',',
        }
    }
}

impl TableFormat {
    /// Check the format parameters.
    ///
    /// # Errors
    ///
    /// [`DatasetError::InvalidParameter`] if either required column name is
    /// empty or the two names collide.
    pub fn validate(&self) -> Result<()> {
        if self.entity_column.is_empty() {
            return Err(DatasetError::invalid_parameter(
                "entity_column",
                "must not be empty",
            ));
        }
        if self.date_column.is_empty() {
            return Err(DatasetError::invalid_parameter(
                "date_column",
                "must not be empty",
            ));
        }
        if self.entity_column == self.date_column {
            return Err(DatasetError::invalid_parameter(
                "date_column",
                "must differ from entity_column",
            ));
        }
        Ok(())
    }
}

/// One observation: a (date, entity) key plus its numeric value fields.
///
/// `values` is aligned to the field-name list of the owning [`RecordTable`];
/// `NaN` marks a cell that failed to parse (or was absent from a short row).
#[derive(Debug, Clone)]
pub struct Record {
    /// Date string, compared lexicographically (ISO dates sort
    /// chronologically).
    pub date: String,

    /// Entity identifier (e.g. a stock symbol).
    pub entity: String,

    /// Numeric value fields aligned to [`RecordTable::fields`].
    pub values: Vec<f64>,
}

/// Parsed table: value field names plus records in input order.
#[derive(Debug, Clone)]
pub struct RecordTable {
    /// Names of the numeric value columns, in header order.
    pub fields: Vec<String>,

    /// Records in original row order.
    pub records: Vec<Record>,
}

/// Parse headered time-series text into a [`RecordTable`].
///
/// Rows with an empty entity or date cell are dropped (they cannot be keyed);
/// everything else survives, with unparseable numeric cells mapped to `NaN`.
///
/// # Errors
///
/// - [`DatasetError::Parse`] if the header is missing or lacks the entity or
///   date column.
/// - [`DatasetError::EmptyDataset`] if no data rows survive.
pub fn parse_table(text: &str, format: &TableFormat) -> Result<RecordTable> {
    let mut lines = text.lines().enumerate();

    let (header_line_no, header) = lines
        .by_ref()
        .find(|(_, l)| !l.trim().is_empty())
        .ok_or_else(|| DatasetError::Parse {
            line: 1,
            reason: "input is empty, expected a header row".to_string(),
        })?;

    let columns: Vec<String> = header
        .split(format.delimiter)
        .map(|c| c.trim().to_string())
        .collect();

    let entity_idx = find_column(&columns, &format.entity_column, header_line_no)?;
    let date_idx = find_column(&columns, &format.date_column, header_line_no)?;

    // Every remaining column is a numeric value field.
    let value_columns: Vec<(usize, String)> = columns
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != entity_idx && *i != date_idx)
        .map(|(i, name)| (i, name.clone()))
        .collect();

    let fields: Vec<String> = value_columns.iter().map(|(_, n)| n.clone()).collect();

    let mut records = Vec::new();
    let mut dropped = 0usize;

    for (_, line) in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let cells: Vec<&str> = line.split(format.delimiter).map(str::trim).collect();

        let entity = cells.get(entity_idx).copied().unwrap_or("");
        let date = cells.get(date_idx).copied().unwrap_or("");
        if entity.is_empty() || date.is_empty() {
            dropped += 1;
            continue;
        }

        let values: Vec<f64> = value_columns
            .iter()
            .map(|(idx, _)| {
                cells
                    .get(*idx)
                    .and_then(|c| c.parse::<f64>().ok())
                    .unwrap_or(f64::NAN)
            })
            .collect();

        records.push(Record {
            date: date.to_string(),
            entity: entity.to_string(),
            values,
        });
    }

    if dropped > 0 {
        log::debug!(
            "table ingestion dropped {} unkeyed row(s), kept {}",
            dropped,
            records.len()
        );
    }

    if records.is_empty() {
        return Err(DatasetError::EmptyDataset { parsed: 0, dropped });
    }

    Ok(RecordTable { fields, records })
}

fn find_column(columns: &[String], name: &str, header_line_no: usize) -> Result<usize> {
    columns
        .iter()
        .position(|c| c == name)
        .ok_or_else(|| DatasetError::Parse {
            line: header_line_no + 1,
            reason: format!("header is missing required column `{name}`"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_table() {
        let text = "Date,Symbol,Open,Close\n\
                    2020-01-02,AAPL,296.24,300.35\n\
                    2020-01-02,MSFT,158.78,160.62\n";
        let table = parse_table(text, &TableFormat::default()).unwrap();

        assert_eq!(table.fields, vec!["Open", "Close"]);
        assert_eq!(table.records.len(), 2);
        assert_eq!(table.records[0].entity, "AAPL");
        assert_eq!(table.records[0].date, "2020-01-02");
        assert_eq!(table.records[0].values, vec![296.24, 300.35]);
    }

    #[test]
    fn test_column_order_matched_by_name() {
        // Same columns, different order: matched by header name, not position.
        let text = "Close,Symbol,Date,Open\n\
                    300.35,AAPL,2020-01-02,296.24\n";
        let table = parse_table(text, &TableFormat::default()).unwrap();

        assert_eq!(table.fields, vec!["Close", "Open"]);
        assert_eq!(table.records[0].entity, "AAPL");
        assert_eq!(table.records[0].values, vec![300.35, 296.24]);
    }

    #[test]
    fn test_malformed_numeric_becomes_nan() {
        let text = "Date,Symbol,Open,Close\n\
                    2020-01-02,AAPL,n/a,300.35\n";
        let table = parse_table(text, &TableFormat::default()).unwrap();

        assert!(table.records[0].values[0].is_nan());
        assert_eq!(table.records[0].values[1], 300.35);
    }

    #[test]
    fn test_short_row_pads_with_nan() {
        let text = "Date,Symbol,Open,Close\n\
                    2020-01-02,AAPL,296.24\n";
        let table = parse_table(text, &TableFormat::default()).unwrap();

        assert_eq!(table.records[0].values[0], 296.24);
        assert!(table.records[0].values[1].is_nan());
    }

    #[test]
    fn test_unkeyed_rows_dropped() {
        let text = "Date,Symbol,Open,Close\n\
                    2020-01-02,,296.24,300.35\n\
                    ,AAPL,296.24,300.35\n\
                    2020-01-03,AAPL,297.15,298.40\n";
        let table = parse_table(text, &TableFormat::default()).unwrap();

        assert_eq!(table.records.len(), 1);
        assert_eq!(table.records[0].date, "2020-01-03");
    }

    #[test]
    fn test_missing_required_column() {
        let text = "Date,Ticker,Open,Close\n2020-01-02,AAPL,1,2\n";
        let err = parse_table(text, &TableFormat::default()).unwrap_err();
        match err {
            DatasetError::Parse { reason, .. } => assert!(reason.contains("Symbol")),
            other => panic!("expected Parse, got {other:?}"),
        }
    }

    #[test]
    fn test_header_only_is_empty_dataset() {
        let text = "Date,Symbol,Open,Close\n";
        assert!(matches!(
            parse_table(text, &TableFormat::default()),
            Err(DatasetError::EmptyDataset { .. })
        ));
    }

    #[test]
    fn test_well_formed_rows_survive_interleaved_malformed() {
        let text = "Date,Symbol,Open,Close\n\
                    2020-01-02,AAPL,1.0,2.0\n\
                    ,,,\n\
                    2020-01-03,AAPL,3.0,4.0\n\
                    2020-01-04,,5.0,6.0\n\
                    2020-01-05,AAPL,7.0,8.0\n";
        let table = parse_table(text, &TableFormat::default()).unwrap();

        let dates: Vec<&str> = table.records.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["2020-01-02", "2020-01-03", "2020-01-05"]);
    }
}
