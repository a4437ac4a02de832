//! Header normalization.
//!
//! Every later rule looks columns up by their normalized name, so
//! [`normalize_headers`] must run before anything else touches the table.

use std::borrow::Cow;

use crate::table::Table;

/// Trims, lowercases, and replaces spaces and `/` with `_`.
pub fn normalize_column_name(name: &str) -> Cow<'_, str> {
    let trimmed = name.trim();
    let normalized = trimmed
        .to_lowercase()
        .chars()
        .map(|ch| match ch {
            ' ' | '/' => '_',
            other => other,
        })
        .collect::<String>();
    if normalized == trimmed {
        Cow::Borrowed(trimmed)
    } else {
        Cow::Owned(normalized)
    }
}

pub fn normalize_headers(table: &mut Table) {
    table.rename_columns(|name| normalize_column_name(name).into_owned());
}
