//! Table I/O for the cleaner.
//!
//! - **Reading**: [`read_table`] loads a comma-delimited UTF-8 file with a
//!   header row into a [`Table`], ignoring a leading byte-order mark.
//! - **Writing**: [`write_table`] serializes a [`Table`], creating any missing
//!   parent directories first, optionally prefixed with a row-index column.
//! - **Directories**: [`ensure_dir`] is the idempotent `mkdir -p` used by the
//!   writer.

use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Read, Write},
    path::{Path, PathBuf},
};

use csv::QuoteStyle;
use encoding_rs::UTF_8;
use log::debug;

use crate::{
    error::{DataAccessError, DataAccessResult},
    table::Table,
};

pub const DEFAULT_DELIMITER: u8 = b',';

pub fn open_csv_reader<R>(reader: R, delimiter: u8) -> csv::Reader<R>
where
    R: Read,
{
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(true)
        .delimiter(delimiter)
        .double_quote(true)
        .flexible(true);
    builder.from_reader(reader)
}

pub fn open_csv_writer<W>(writer: W, delimiter: u8) -> csv::Writer<W>
where
    W: Write,
{
    let mut builder = csv::WriterBuilder::new();
    builder
        .delimiter(delimiter)
        .quote_style(QuoteStyle::Necessary)
        .double_quote(true);
    builder.from_writer(writer)
}

fn decode_record(record: &csv::ByteRecord) -> Option<Vec<String>> {
    record
        .iter()
        .map(|field| {
            UTF_8
                .decode_without_bom_handling_and_without_replacement(field)
                .map(|text| text.into_owned())
        })
        .collect()
}

fn decode_headers(record: &csv::ByteRecord) -> Option<Vec<String>> {
    let mut headers = decode_record(record)?;
    if let Some(first) = headers.first_mut() {
        let stripped = first.strip_prefix('\u{feff}').map(str::to_string);
        if let Some(stripped) = stripped {
            *first = stripped;
        }
    }
    Some(headers)
}

/// Loads the table at `path`. Fails if the file is missing, unreadable, has no
/// header row, or contains a row wider than its header.
pub fn read_table(path: &Path) -> DataAccessResult<Table> {
    if !path.exists() {
        return Err(DataAccessError::MissingInput {
            path: path.to_path_buf(),
        });
    }
    let file = File::open(path).map_err(|source| DataAccessError::OpenInput {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = open_csv_reader(BufReader::new(file), DEFAULT_DELIMITER);

    let header_record = reader
        .byte_headers()
        .map_err(|source| DataAccessError::ReadRow {
            path: path.to_path_buf(),
            row: 1,
            source,
        })?
        .clone();
    if header_record.is_empty() {
        return Err(DataAccessError::EmptyInput {
            path: path.to_path_buf(),
        });
    }
    let headers = decode_headers(&header_record).ok_or_else(|| DataAccessError::Decode {
        path: path.to_path_buf(),
        row: 1,
    })?;

    let mut rows = Vec::new();
    for (idx, record) in reader.byte_records().enumerate() {
        let row_number = idx + 2;
        let record = record.map_err(|source| DataAccessError::ReadRow {
            path: path.to_path_buf(),
            row: row_number,
            source,
        })?;
        if record.len() > headers.len() {
            return Err(DataAccessError::MalformedTable {
                path: path.to_path_buf(),
                reason: format!(
                    "expected {} field(s) in row {row_number}, saw {}",
                    headers.len(),
                    record.len()
                ),
            });
        }
        let decoded = decode_record(&record).ok_or_else(|| DataAccessError::Decode {
            path: path.to_path_buf(),
            row: row_number,
        })?;
        rows.push(decoded);
    }
    debug!(
        "Loaded {} row(s) x {} column(s) from {:?}",
        rows.len(),
        headers.len(),
        path
    );
    Ok(Table::from_raw(headers, rows))
}

/// Writes `table` to `path`, creating parent directories as needed. When
/// `include_row_index` is set, the first column holds each row's position in
/// the loaded input under an empty header.
pub fn write_table(table: &Table, path: &Path, include_row_index: bool) -> DataAccessResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }
    let file = File::create(path).map_err(|source| DataAccessError::CreateOutput {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = open_csv_writer(BufWriter::new(file), DEFAULT_DELIMITER);
    let write_err = |source| DataAccessError::WriteOutput {
        path: path.to_path_buf(),
        source,
    };

    let mut headers = table.headers();
    if include_row_index {
        headers.insert(0, String::new());
    }
    writer.write_record(&headers).map_err(write_err)?;

    for (idx, row_id) in table.row_ids().iter().enumerate() {
        let mut fields = table.render_row(idx);
        if include_row_index {
            fields.insert(0, row_id.to_string());
        }
        writer.write_record(&fields).map_err(write_err)?;
    }
    writer
        .flush()
        .map_err(|source| DataAccessError::FlushOutput {
            path: path.to_path_buf(),
            source,
        })?;
    debug!("Wrote {} row(s) to {:?}", table.row_count(), path);
    Ok(())
}

/// Creates `path` and any missing ancestors; succeeds if it already exists.
pub fn ensure_dir(path: &Path) -> DataAccessResult<PathBuf> {
    fs::create_dir_all(path).map_err(|source| DataAccessError::CreateDir {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn read_table_strips_bom_and_pads_short_rows() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("bom.csv");
        fs::write(&path, "\u{feff}id,name\n1,Alice\n2\n").expect("write input");

        let table = read_table(&path).expect("read table");
        assert_eq!(table.headers(), vec!["id".to_string(), "name".to_string()]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.render_row(1), vec!["2".to_string(), String::new()]);
    }

    #[test]
    fn read_table_rejects_wide_rows() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("wide.csv");
        fs::write(&path, "a,b\n1,2,3\n").expect("write input");

        let err = read_table(&path).expect_err("wide row should fail");
        assert!(matches!(err, DataAccessError::MalformedTable { .. }));
    }

    #[test]
    fn read_table_reports_missing_and_empty_inputs() {
        let dir = tempdir().expect("temp dir");
        let missing = dir.path().join("absent.csv");
        assert!(matches!(
            read_table(&missing),
            Err(DataAccessError::MissingInput { .. })
        ));

        let empty = dir.path().join("empty.csv");
        fs::write(&empty, "").expect("write input");
        assert!(matches!(
            read_table(&empty),
            Err(DataAccessError::EmptyInput { .. })
        ));
    }

    #[test]
    fn write_table_creates_parents_and_optional_index() {
        let dir = tempdir().expect("temp dir");
        let input = dir.path().join("in.csv");
        fs::write(&input, "id,note\n1,\"a, b\"\n2,NA\n").expect("write input");
        let table = read_table(&input).expect("read table");

        let output = dir.path().join("nested").join("deeper").join("out.csv");
        write_table(&table, &output, false).expect("write table");
        let contents = fs::read_to_string(&output).expect("read output");
        assert_eq!(contents, "id,note\n1,\"a, b\"\n2,\n");

        write_table(&table, &output, true).expect("write indexed table");
        let contents = fs::read_to_string(&output).expect("read output");
        assert_eq!(contents, ",id,note\n0,1,\"a, b\"\n1,2,\n");
    }

    #[test]
    fn ensure_dir_is_idempotent() {
        let dir = tempdir().expect("temp dir");
        let target = dir.path().join("a").join("b");
        assert_eq!(ensure_dir(&target).expect("first"), target);
        assert_eq!(ensure_dir(&target).expect("second"), target);
        assert!(target.is_dir());
    }
}
