//! Columnar-to-row reshaping.
//!
//! The provider sends struct-of-arrays blocks (`{time: [..], var: [..]}`);
//! callers iterate rows. Each series block is converted in one pass with the
//! output sized up front, and column names are allocated once per block and
//! shared by every row.

use crate::forecast::payload::{RawCurrentBlock, RawSeriesBlock};
use crate::types::cadence::Cadence;
use crate::types::record::TimeRecord;
use std::sync::Arc;

/// Daily variables the provider reports in Unix seconds; scaled like the time axis.
pub const UNIX_TIMESTAMP_FIELDS: [&str; 2] = ["sunrise", "sunset"];

const MILLIS_PER_SECOND: f64 = 1000.0;

/// Converts a Unix timestamp in seconds to milliseconds.
pub fn seconds_to_millis(seconds: f64) -> i64 {
    (seconds * MILLIS_PER_SECOND).round() as i64
}

fn is_timestamp_field(cadence: Cadence, name: &str) -> bool {
    cadence == Cadence::Daily && UNIX_TIMESTAMP_FIELDS.contains(&name)
}

/// Turns an hourly or daily block into one record per time-axis entry.
///
/// Every record carries every column of the block, in block order. A column
/// shorter than the time axis yields `None` at the missing positions rather
/// than dropping the field.
pub fn transform_series(block: &RawSeriesBlock, cadence: Cadence) -> Vec<TimeRecord> {
    let names: Arc<[String]> = block.columns.iter().map(|c| c.name.clone()).collect();
    let scaled: Vec<bool> = block
        .columns
        .iter()
        .map(|c| is_timestamp_field(cadence, &c.name))
        .collect();

    let mut records = Vec::with_capacity(block.time.len());
    for (i, &seconds) in block.time.iter().enumerate() {
        let mut values = Vec::with_capacity(block.columns.len());
        for (column, &scale) in block.columns.iter().zip(&scaled) {
            let value = column.values.get(i).copied().flatten();
            values.push(if scale {
                value.map(|v| v * MILLIS_PER_SECOND)
            } else {
                value
            });
        }
        records.push(TimeRecord::new(
            seconds_to_millis(seconds),
            Arc::clone(&names),
            values,
        ));
    }
    records
}

/// Turns the current-conditions block into a single record.
///
/// `interval` is dropped and no value is rescaled.
pub fn transform_current(block: &RawCurrentBlock) -> TimeRecord {
    let names: Arc<[String]> = block.values.iter().map(|(name, _)| name.clone()).collect();
    let values = block.values.iter().map(|&(_, v)| Some(v)).collect();
    TimeRecord::new(seconds_to_millis(block.time), names, values)
}
