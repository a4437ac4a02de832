use chrono::{NaiveDate, NaiveDateTime};

/// Tokens that load as a missing cell, whatever column they appear in.
pub const NULL_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Ambiguous day/month forms are read month-first.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%m-%d-%Y",
    "%d-%m-%Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
];

/// A single non-null cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Integer(i64),
    Float(f64),
    Date(NaiveDate),
}

/// A cell that may be absent.
pub type Cell = Option<Value>;

impl Value {
    pub fn as_display(&self) -> String {
        match self {
            Value::Text(s) => s.clone(),
            Value::Integer(i) => i.to_string(),
            Value::Float(f) => format_float(*f),
            Value::Date(d) => d.format("%Y-%m-%d").to_string(),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::Text(_) | Value::Date(_) => None,
        }
    }

    /// Promotes integers to floats; other variants are returned unchanged.
    pub fn into_float(self) -> Value {
        match self {
            Value::Integer(i) => Value::Float(i as f64),
            other => other,
        }
    }
}

/// Renders a float the way the cleaned output expects: integral values keep a
/// trailing `.0`.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else if value.is_infinite() {
        if value > 0.0 { "inf".into() } else { "-inf".into() }
    } else {
        format!("{value:?}")
    }
}

pub fn is_null_token(raw: &str) -> bool {
    NULL_TOKENS.contains(&raw)
}

/// Converts a raw field into a cell, mapping null tokens to `None`.
pub fn cell_from_raw(raw: String) -> Cell {
    if is_null_token(&raw) {
        None
    } else {
        Some(Value::Text(raw))
    }
}

/// Renders a cell for the stringly-typed rules. Missing cells render as `nan`,
/// so they never match a recognised token.
pub fn stringify(cell: &Cell) -> String {
    match cell {
        Some(value) => value.as_display(),
        None => "nan".to_string(),
    }
}

pub fn parse_naive_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
                .map(|dt| dt.date())
        })
}

pub fn parse_float(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|f| !f.is_nan())
}

/// Parses a numeric cell, keeping integer form when the text is an integer.
pub fn parse_number(value: &str) -> Option<Value> {
    let trimmed = value.trim();
    if let Ok(parsed) = trimmed.parse::<i64>() {
        return Some(Value::Integer(parsed));
    }
    parse_float(trimmed).map(Value::Float)
}

/// Applies the column-wide numeric rendering rule: if any cell is null or a
/// float, every integer in the column is promoted to a float.
pub fn unify_numeric(cells: &mut [Cell]) {
    let all_integers = cells
        .iter()
        .all(|cell| matches!(cell, Some(Value::Integer(_))));
    if all_integers {
        return;
    }
    for cell in cells.iter_mut() {
        if let Some(value) = cell.take() {
            *cell = Some(value.into_float());
        }
    }
}
