//! Tabular ingestion: delimited text into typed records.
//!
//! Two line-oriented formats are supported:
//!
//! - **Digit data** ([`digits`]): headerless rows of `label,p0,...,p783`.
//!   Rows that do not match the exact field count are silently dropped.
//! - **Time series** ([`table`]): a header row naming columns, followed by
//!   data rows matched positionally to the header. Malformed numeric cells
//!   become `NaN` and are treated as missing by later stages.
//!
//! Both parsers are pure: they consume already-read text and perform no I/O.
//! Blank lines are ignored. Fields are split on the raw delimiter with no
//! quoting or escaping support — a delimiter inside a field is not supported
//! (known limitation of the format, not of the parser).

pub mod digits;
pub mod table;

pub use digits::{parse_digit_lines, DigitFormat, DigitRecord};
pub use table::{parse_table, Record, RecordTable, TableFormat};
