use std::path::Path;

use log::info;

use crate::Result;
use crate::error::Error;
use crate::table::{Table, cell_text};

/// Write the table as comma-separated text: one header row of column
/// names, one line per row, no index column. Any existing file at the
/// path is replaced in full.
pub fn write(table: &Table, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(into_error)?;
    // an empty fetch has no columns; leave the file empty rather than
    // emit a zero-field record
    if !table.columns().is_empty() {
        writer.write_record(table.columns()).map_err(into_error)?;
        for row in table.rows() {
            writer
                .write_record(row.iter().map(cell_text))
                .map_err(into_error)?;
        }
    }
    writer.flush()?;
    info!("wrote {} rows to {}", table.rows().len(), path.display());
    Ok(())
}

fn into_error(err: csv::Error) -> Error {
    match err.into_kind() {
        csv::ErrorKind::Io(io) => Error::Filesystem(io),
        other => Error::Write(format!("csv encoding failed: {other:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;

    fn sample() -> Table {
        Table::from_json(&json!([
            {"id": 1, "team": "Alabama", "note": "rolls, tide"},
            {"id": 2, "team": "Georgia", "note": null}
        ]))
        .unwrap()
    }

    #[test]
    fn header_then_rows_no_index_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("teams.csv");
        write(&sample(), &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("ID,TEAM,NOTE"));
        assert_eq!(lines.next(), Some(r#"1,Alabama,"rolls, tide""#));
        assert_eq!(lines.next(), Some("2,Georgia,"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn existing_file_is_replaced_in_full() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("teams.csv");
        fs::write(&path, "stale content that is much longer than the real output\n".repeat(50))
            .unwrap();

        write(&sample(), &path).unwrap();
        let first = fs::read(&path).unwrap();
        write(&sample(), &path).unwrap();
        let second = fs::read(&path).unwrap();

        assert_eq!(first, second);
        assert!(!String::from_utf8_lossy(&first).contains("stale"));
    }

    #[test]
    fn unwritable_path_is_a_filesystem_error() {
        let result = write(&sample(), Path::new("/no/such/directory/teams.csv"));
        assert!(matches!(result, Err(Error::Filesystem(_))));
    }
}
