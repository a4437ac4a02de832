//! The listing cleaning pipeline.
//!
//! [`clean_table`] applies the rules in a fixed order:
//!
//! 1. header normalization
//! 2. `price` → `price_gbp`
//! 3. host flags → `<flag>_bin`
//! 4. `host_since` reparse and `host_tenure_days`
//! 5. `amenities` → `amenity_count`
//! 6. numeric coercion of the count/score columns
//! 7. price range filter
//!
//! Each step is skipped when its source column is missing. [`clean`] wraps the
//! pipeline with the table reader and writer.

use std::path::Path;

use chrono::{Local, NaiveDate};
use log::{debug, info};

use crate::{
    columns::normalize_headers,
    derive::{
        self, AMENITIES_COLUMN, FLAG_COLUMNS, HOST_SINCE_COLUMN, NUMERIC_COLUMNS, PRICE_COLUMN,
    },
    error::DataAccessResult,
    filter::PRICE_RANGE,
    io_utils,
    table::Table,
};

/// Outcome of a cleaning run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanSummary {
    pub rows_read: usize,
    pub rows_written: usize,
    /// Rows removed by the price range filter.
    pub rows_filtered: usize,
    /// Per source column, non-null cells that failed to parse.
    pub null_fallbacks: Vec<(String, usize)>,
}

impl CleanSummary {
    pub fn total_fallbacks(&self) -> usize {
        self.null_fallbacks.iter().map(|(_, count)| count).sum()
    }

    fn record(&mut self, column: &str, outcome: Option<usize>) {
        match outcome {
            Some(fallbacks) => {
                debug!("Cleaned column '{column}' ({fallbacks} unparseable cell(s))");
                if fallbacks > 0 {
                    self.null_fallbacks.push((column.to_string(), fallbacks));
                }
            }
            None => debug!("Column '{column}' not present; skipping"),
        }
    }
}

/// Cleans the listings at `input` and writes them to `output`, using today's
/// local date for tenure.
pub fn clean(input: &Path, output: &Path) -> DataAccessResult<CleanSummary> {
    clean_as_of(input, output, Local::now().date_naive())
}

/// Same as [`clean`] with an explicit reference date.
pub fn clean_as_of(input: &Path, output: &Path, today: NaiveDate) -> DataAccessResult<CleanSummary> {
    info!(
        "Cleaning listings '{}' -> '{}'",
        input.display(),
        output.display()
    );
    let mut table = io_utils::read_table(input)?;
    let summary = clean_table(&mut table, today);
    io_utils::write_table(&table, output, false)?;

    for (column, count) in &summary.null_fallbacks {
        info!("{count} value(s) in '{column}' could not be parsed and were left empty");
    }
    info!(
        "Wrote {} of {} row(s) to {:?} ({} outside price range)",
        summary.rows_written, summary.rows_read, output, summary.rows_filtered
    );
    Ok(summary)
}

/// Runs every cleaning step over `table` in place.
pub fn clean_table(table: &mut Table, today: NaiveDate) -> CleanSummary {
    let mut summary = CleanSummary {
        rows_read: table.row_count(),
        ..CleanSummary::default()
    };

    normalize_headers(table);
    debug!("Normalized headers: {:?}", table.headers());

    summary.record(PRICE_COLUMN, derive::apply_price(table));
    for column in FLAG_COLUMNS {
        summary.record(column, derive::apply_flag(table, column));
    }
    summary.record(HOST_SINCE_COLUMN, derive::apply_host_since(table, today));
    summary.record(AMENITIES_COLUMN, derive::apply_amenities(table));
    for column in NUMERIC_COLUMNS {
        summary.record(column, derive::apply_numeric(table, column));
    }

    if let Some(dropped) = PRICE_RANGE.apply(table) {
        debug!(
            "Price filter [{}, {}] removed {dropped} row(s)",
            PRICE_RANGE.min, PRICE_RANGE.max
        );
        summary.rows_filtered = dropped;
    }
    summary.rows_written = table.row_count();
    summary
}
