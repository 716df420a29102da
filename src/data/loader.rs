use std::fs::File;
use std::io;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use super::model::{Observable, ObservableSet, ObservableTable, SweepKind, SweepTable};
use crate::error::DataLoadError;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a header-less delimited numeric table exactly as stored.
///
/// Every row must have the column count of the first row. A trailing
/// delimiter at the end of a row is tolerated. Blank lines are skipped.
pub fn load_table(path: &Path, delimiter: u8) -> Result<ObservableTable, DataLoadError> {
    log::debug!("Loading table {}", path.display());

    let file = File::open(path).map_err(|e| io_error(path, e))?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(file);

    let mut rows: Vec<Vec<f64>> = Vec::new();
    let mut record = StringRecord::new();
    loop {
        let more = reader
            .read_record(&mut record)
            .map_err(|e| csv_error(path, e))?;
        if !more {
            break;
        }
        let line = record.position().map_or(0, |p| p.line());
        let Some(row) = parse_record(path, line, &record)? else {
            continue;
        };
        if let Some(first) = rows.first() {
            if row.len() != first.len() {
                return Err(DataLoadError::RaggedRow {
                    path: path.to_path_buf(),
                    line,
                    expected: first.len(),
                    found: row.len(),
                });
            }
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(DataLoadError::Empty(path.to_path_buf()));
    }

    let table = ObservableTable::from_rows(path, &rows);
    log::info!(
        "Loaded {} ({:?})",
        path.display(),
        table.shape()
    );
    Ok(table)
}

/// Load a file holding one vector, written either one value per line or as
/// a single line of values. The result always has exactly one column.
pub fn load_vector(path: &Path, delimiter: u8) -> Result<ObservableTable, DataLoadError> {
    load_table(path, delimiter)?
        .into_column_vector()
        .map_err(|table| DataLoadError::NotAVector {
            path: path.to_path_buf(),
            rows: table.rows(),
            columns: table.column_count(),
        })
}

/// Load the per-observable vector files found in `dir`.
///
/// Lengths are not compared here; see [`ObservableSet::check_lengths`].
pub fn load_vectors(
    dir: &Path,
    kind: SweepKind,
    observables: &[Observable],
    delimiter: u8,
) -> Result<ObservableSet, DataLoadError> {
    let mut set = ObservableSet::new(kind);
    for &observable in observables {
        let Some(file_name) = observable.vector_file() else {
            log::warn!("{observable:?} has no vector file, skipping");
            continue;
        };
        let vector = load_vector(&dir.join(file_name), delimiter)?;
        set.insert(observable, vector);
    }
    Ok(set)
}

/// Load a matrix-per-sweep file and check it carries every column `kind`
/// requires. Extra trailing columns are allowed.
pub fn load_sweep(
    path: &Path,
    delimiter: u8,
    kind: SweepKind,
) -> Result<SweepTable, DataLoadError> {
    let table = load_table(path, delimiter)?;
    let required = kind.required_columns();
    if table.column_count() < required {
        return Err(DataLoadError::MissingColumns {
            path: path.to_path_buf(),
            kind,
            required,
            found: table.column_count(),
        });
    }
    Ok(SweepTable::new_unchecked(kind, table))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse one record. Returns `None` for a blank line.
fn parse_record(
    path: &Path,
    line: u64,
    record: &StringRecord,
) -> Result<Option<Vec<f64>>, DataLoadError> {
    let mut fields: Vec<&str> = record.iter().collect();
    // "1;2;3;" – the stream writer upstream ends rows with the delimiter.
    if fields.len() > 1 && fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }
    if fields.iter().all(|f| f.is_empty()) {
        return Ok(None);
    }

    fields
        .iter()
        .enumerate()
        .map(|(column, text)| {
            text.parse::<f64>().map_err(|_| DataLoadError::Parse {
                path: path.to_path_buf(),
                line,
                column,
                text: text.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

fn io_error(path: &Path, source: io::Error) -> DataLoadError {
    if source.kind() == io::ErrorKind::NotFound {
        DataLoadError::Missing(path.to_path_buf())
    } else {
        DataLoadError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

fn csv_error(path: &Path, err: csv::Error) -> DataLoadError {
    let line = err.position().map_or(0, |p| p.line());
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => io_error(path, source),
        _ => DataLoadError::Malformed {
            path: path.to_path_buf(),
            line,
            message,
        },
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;

    use tempfile::TempDir;

    use super::*;
    use crate::data::model::TableShape;

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut f = File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_rectangular_table() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "t.csv", "1;2;3\n4;5;6\n");
        let table = load_table(&path, b';').unwrap();
        assert_eq!(table.shape(), TableShape::Matrix { rows: 2, columns: 3 });
        assert_eq!(table.column(2), Some(&[3.0, 6.0][..]));
        assert_eq!(table.source(), path.as_path());
    }

    #[test]
    fn tolerates_trailing_delimiter_and_whitespace() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "t.csv", " 1.5 ; -2e-3;\n3;4;\n");
        let table = load_table(&path, b';').unwrap();
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.column(1), Some(&[-2e-3, 4.0][..]));
    }

    #[test]
    fn skips_blank_lines() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "t.csv", "1;2\n\n3;4\n\n");
        let table = load_table(&path, b';').unwrap();
        assert_eq!(table.rows(), 2);
    }

    #[test]
    fn missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_table(&dir.path().join("nope.csv"), b';').unwrap_err();
        assert!(matches!(err, DataLoadError::Missing(_)));
    }

    #[test]
    fn empty_file() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "empty.csv", "");
        assert!(matches!(
            load_table(&path, b';').unwrap_err(),
            DataLoadError::Empty(_)
        ));
        let path = write(&dir, "blank.csv", "\n\n");
        assert!(matches!(
            load_table(&path, b';').unwrap_err(),
            DataLoadError::Empty(_)
        ));
    }

    #[test]
    fn ragged_row_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "t.csv", "1;2;3\n4;5\n");
        match load_table(&path, b';').unwrap_err() {
            DataLoadError::RaggedRow {
                line,
                expected,
                found,
                ..
            } => {
                assert_eq!(line, 2);
                assert_eq!(expected, 3);
                assert_eq!(found, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_numeric_cell_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "t.csv", "1;2\n3;abc\n");
        match load_table(&path, b';').unwrap_err() {
            DataLoadError::Parse { column, text, .. } => {
                assert_eq!(column, 1);
                assert_eq!(text, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn invalid_utf8_is_malformed_not_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("t.csv");
        std::fs::write(&path, b"1;\xff\n").unwrap();
        let err = load_table(&path, b';').unwrap_err();
        assert!(matches!(err, DataLoadError::Malformed { .. }), "{err:?}");
        assert!(err.to_string().contains("malformed input"));
    }

    #[test]
    fn respects_delimiter() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "t.csv", "1,2\n3,4\n");
        assert_eq!(load_table(&path, b',').unwrap().column_count(), 2);
        // Read with the wrong delimiter, "1,2" is one unparsable cell.
        assert!(load_table(&path, b';').is_err());
    }

    #[test]
    fn vector_from_one_value_per_line() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "E.csv", "1\n2\n3\n");
        let v = load_vector(&path, b';').unwrap();
        assert_eq!(v.column(0), Some(&[1.0, 2.0, 3.0][..]));
    }

    #[test]
    fn vector_from_single_line() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "E.csv", "1;2;3;\n");
        let v = load_vector(&path, b';').unwrap();
        assert_eq!(v.column_count(), 1);
        assert_eq!(v.column(0), Some(&[1.0, 2.0, 3.0][..]));
    }

    #[test]
    fn matrix_is_not_a_vector() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "E.csv", "1;2\n3;4\n");
        assert!(matches!(
            load_vector(&path, b';').unwrap_err(),
            DataLoadError::NotAVector {
                rows: 2,
                columns: 2,
                ..
            }
        ));
    }

    #[test]
    fn load_vectors_reads_named_files() {
        let dir = TempDir::new().unwrap();
        write(&dir, "T.csv", "1;2;3\n");
        write(&dir, "E.csv", "-2;-1.8;-1.5\n");
        let set = load_vectors(
            dir.path(),
            SweepKind::Temperature,
            &[Observable::Control, Observable::Energy],
            b';',
        )
        .unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(Observable::Energy).unwrap().rows(), 3);
    }

    #[test]
    fn load_vectors_fails_on_missing_file() {
        let dir = TempDir::new().unwrap();
        write(&dir, "T.csv", "1;2;3\n");
        let err = load_vectors(
            dir.path(),
            SweepKind::Temperature,
            &[Observable::Control, Observable::EnergySq],
            b';',
        )
        .unwrap_err();
        assert!(matches!(err, DataLoadError::Missing(p) if p.ends_with("E_sq.csv")));
    }

    #[test]
    fn sweep_column_contract_is_checked() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "magn_data.csv", "0;1;2;3;4\n");
        assert!(load_sweep(&path, b';', SweepKind::MagneticField).is_ok());
        match load_sweep(&path, b';', SweepKind::Temperature).unwrap_err() {
            DataLoadError::MissingColumns {
                required, found, ..
            } => {
                assert_eq!(required, 8);
                assert_eq!(found, 5);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
