//! In-memory listing table.
//!
//! The table is stored column-wise so rules can look a column up by name,
//! rewrite it, or append a derived one without touching the others. Row order
//! is only ever changed by [`Table::retain_rows`], which preserves the
//! relative order of surviving rows.

use std::collections::HashSet;

use crate::data::{Cell, cell_from_raw};

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub cells: Vec<Cell>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<Cell>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    row_count: usize,
    row_ids: Vec<usize>,
}

impl Table {
    /// Builds a table from raw header and row text. Null tokens become `None`;
    /// rows shorter than the header are padded with nulls.
    pub fn from_raw(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let headers = dedupe_headers(headers);
        let row_count = rows.len();
        let mut columns = headers
            .into_iter()
            .map(|name| Column::new(name, Vec::with_capacity(row_count)))
            .collect::<Vec<_>>();
        for row in rows {
            let mut fields = row.into_iter();
            for column in columns.iter_mut() {
                column.cells.push(fields.next().and_then(cell_from_raw));
            }
        }
        Self {
            columns,
            row_count,
            row_ids: (0..row_count).collect(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Zero-based positions of the surviving rows in the loaded input.
    pub fn row_ids(&self) -> &[usize] {
        &self.row_ids
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn headers(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Index of the first column called `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.column_index(name).map(|idx| &self.columns[idx])
    }

    /// Replaces the first column called `name`, or appends a new one.
    ///
    /// Panics if `cells` does not hold one entry per row.
    pub fn set_column(&mut self, name: &str, cells: Vec<Cell>) {
        assert_eq!(
            cells.len(),
            self.row_count,
            "column '{name}' has {} cells for {} rows",
            cells.len(),
            self.row_count
        );
        match self.column_index(name) {
            Some(idx) => self.columns[idx].cells = cells,
            None => self.columns.push(Column::new(name, cells)),
        }
    }

    pub fn rename_columns<F>(&mut self, mut rename: F)
    where
        F: FnMut(&str) -> String,
    {
        for column in self.columns.iter_mut() {
            column.name = rename(&column.name);
        }
    }

    /// Keeps the rows whose mask entry is `true`, in their original order.
    pub fn retain_rows(&mut self, mask: &[bool]) {
        assert_eq!(mask.len(), self.row_count, "row mask length mismatch");
        for column in self.columns.iter_mut() {
            let mut keep = mask.iter();
            column.cells.retain(|_| keep.next().copied().unwrap_or(false));
        }
        let mut keep = mask.iter();
        self.row_ids
            .retain(|_| keep.next().copied().unwrap_or(false));
        self.row_count = self.row_ids.len();
    }

    /// Renders row `idx` as output fields; null cells render as empty strings.
    pub fn render_row(&self, idx: usize) -> Vec<String> {
        self.columns
            .iter()
            .map(|column| {
                column
                    .cells
                    .get(idx)
                    .and_then(|cell| cell.as_ref())
                    .map(|value| value.as_display())
                    .unwrap_or_default()
            })
            .collect()
    }
}

/// Suffixes repeated header names with `.1`, `.2`, ... so every loaded column
/// is addressable.
pub fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(headers.len());
    let mut result = Vec::with_capacity(headers.len());
    for header in headers {
        let mut candidate = header.clone();
        let mut suffix = 1usize;
        while seen.contains(&candidate) {
            candidate = format!("{header}.{suffix}");
            suffix += 1;
        }
        seen.insert(candidate.clone());
        result.push(candidate);
    }
    result
}
