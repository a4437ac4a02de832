//! Per-field cleaning rules.
//!
//! Each rule has a cell-level function (`clean_price`, `booleanize`, ...) and a
//! table-level `apply_*` wrapper. The wrappers return `None` when the source
//! column is absent, otherwise the number of non-null source cells that failed
//! to parse and fell back to null or the default.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::{
    data::{Cell, Value, parse_float, parse_naive_date, parse_number, stringify, unify_numeric},
    table::Table,
};

pub const PRICE_COLUMN: &str = "price";
pub const PRICE_GBP_COLUMN: &str = "price_gbp";
pub const FLAG_COLUMNS: &[&str] = &["host_is_superhost", "instant_bookable"];
pub const HOST_SINCE_COLUMN: &str = "host_since";
pub const TENURE_COLUMN: &str = "host_tenure_days";
pub const AMENITIES_COLUMN: &str = "amenities";
pub const AMENITY_COUNT_COLUMN: &str = "amenity_count";
pub const NUMERIC_COLUMNS: &[&str] = &[
    "minimum_nights",
    "availability_365",
    "number_of_reviews",
    "review_scores_rating",
];

/// Recognised boolean tokens, matched against the lowercased cell text.
pub const BOOLEAN_TOKENS: &[(&str, i64)] = &[
    ("t", 1),
    ("true", 1),
    ("y", 1),
    ("yes", 1),
    ("f", 0),
    ("false", 0),
    ("n", 0),
    ("no", 0),
];

static PRICE_NOISE: OnceLock<Regex> = OnceLock::new();

fn price_noise() -> &'static Regex {
    PRICE_NOISE.get_or_init(|| Regex::new("[£$, ]").expect("price noise pattern is valid"))
}

/// Strips currency symbols, thousands separators and spaces, then parses the
/// remainder as a float.
pub fn clean_price(raw: &str) -> Option<f64> {
    let stripped = price_noise().replace_all(raw, "");
    parse_float(&stripped)
}

/// Maps a flag token to 1 or 0. Unrecognised tokens map to 0.
pub fn booleanize(raw: &str) -> i64 {
    lookup_boolean(raw).unwrap_or(0)
}

fn lookup_boolean(raw: &str) -> Option<i64> {
    let lowered = raw.to_lowercase();
    BOOLEAN_TOKENS
        .iter()
        .find(|(token, _)| *token == lowered)
        .map(|(_, bit)| *bit)
}

pub fn amenity_count(cell: &Cell) -> i64 {
    match cell {
        None => 0,
        Some(value) => value.as_display().matches(',').count() as i64 + 1,
    }
}

pub fn tenure_days(since: Option<NaiveDate>, today: NaiveDate) -> Option<i64> {
    since.map(|date| (today - date).num_days())
}

fn cell_date(cell: &Cell) -> Option<NaiveDate> {
    match cell {
        Some(Value::Date(date)) => Some(*date),
        Some(other) => parse_naive_date(&other.as_display()),
        None => None,
    }
}

fn cell_number(cell: &Cell) -> Cell {
    match cell {
        Some(Value::Integer(i)) => Some(Value::Integer(*i)),
        Some(Value::Float(f)) => Some(Value::Float(*f)),
        Some(other) => parse_number(&other.as_display()),
        None => None,
    }
}

fn count_fallbacks(source: &[Cell], derived: &[Cell]) -> usize {
    source
        .iter()
        .zip(derived)
        .filter(|(src, out)| src.is_some() && out.is_none())
        .count()
}

pub fn apply_price(table: &mut Table) -> Option<usize> {
    let source = table.column(PRICE_COLUMN)?;
    let cells = source
        .cells
        .iter()
        .map(|cell| clean_price(&stringify(cell)).map(Value::Float))
        .collect::<Vec<_>>();
    let fallbacks = count_fallbacks(&source.cells, &cells);
    table.set_column(PRICE_GBP_COLUMN, cells);
    Some(fallbacks)
}

/// Adds `<column>_bin` for `column`.
pub fn apply_flag(table: &mut Table, column: &str) -> Option<usize> {
    let source = table.column(column)?;
    let mut fallbacks = 0usize;
    let cells = source
        .cells
        .iter()
        .map(|cell| {
            let bit = lookup_boolean(&stringify(cell));
            if bit.is_none() && cell.is_some() {
                fallbacks += 1;
            }
            Some(Value::Integer(bit.unwrap_or(0)))
        })
        .collect::<Vec<_>>();
    table.set_column(&format!("{column}_bin"), cells);
    Some(fallbacks)
}

/// Reparses `host_since` as a date in place and adds `host_tenure_days`.
pub fn apply_host_since(table: &mut Table, today: NaiveDate) -> Option<usize> {
    let source = table.column(HOST_SINCE_COLUMN)?;
    let dates = source.cells.iter().map(cell_date).collect::<Vec<_>>();
    let date_cells = dates
        .iter()
        .map(|date| date.map(Value::Date))
        .collect::<Vec<_>>();
    let fallbacks = count_fallbacks(&source.cells, &date_cells);

    let mut tenure = dates
        .iter()
        .map(|date| tenure_days(*date, today).map(Value::Integer))
        .collect::<Vec<_>>();
    unify_numeric(&mut tenure);

    table.set_column(HOST_SINCE_COLUMN, date_cells);
    table.set_column(TENURE_COLUMN, tenure);
    Some(fallbacks)
}

pub fn apply_amenities(table: &mut Table) -> Option<usize> {
    let source = table.column(AMENITIES_COLUMN)?;
    let cells = source
        .cells
        .iter()
        .map(|cell| Some(Value::Integer(amenity_count(cell))))
        .collect::<Vec<_>>();
    table.set_column(AMENITY_COUNT_COLUMN, cells);
    Some(0)
}

/// Coerces `column` to numbers in place.
pub fn apply_numeric(table: &mut Table, column: &str) -> Option<usize> {
    let source = table.column(column)?;
    let mut cells = source.cells.iter().map(cell_number).collect::<Vec<_>>();
    let fallbacks = count_fallbacks(&source.cells, &cells);
    unify_numeric(&mut cells);
    table.set_column(column, cells);
    Some(fallbacks)
}
