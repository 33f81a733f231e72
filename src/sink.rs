use std::fs::{File, OpenOptions};
use std::path::Path;

use anyhow::{Context, Result};

use crate::extract::SignatureRecord;

pub const HEADER: [&str; 4] = ["Name", "City", "Comment", "Date"];

/// Create (or truncate) the output file and write the header row.
pub fn initialize(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(HEADER)?;
    writer.flush()?;
    Ok(())
}

/// Append one CSV row per record. The file is closed again before returning.
pub fn append(path: &Path, records: &[SignatureRecord]) -> Result<()> {
    let file = OpenOptions::new()
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open {} for appending", path.display()))?;
    let mut writer = csv::Writer::from_writer(file);
    for record in records {
        writer.write_record(record.as_row())?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_back(path: &Path) -> Vec<Vec<String>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(path)
            .unwrap();
        reader
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect()
    }

    fn record(name: &str, comment: &str) -> SignatureRecord {
        SignatureRecord {
            name: name.into(),
            city: "Trnava".into(),
            comment: comment.into(),
            date: "05.03.2024".into(),
        }
    }

    #[test]
    fn initialize_truncates_and_writes_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        std::fs::write(&path, "stale,data\n").unwrap();

        initialize(&path).unwrap();
        assert_eq!(read_back(&path), vec![vec!["Name", "City", "Comment", "Date"]]);
    }

    #[test]
    fn append_accumulates_across_calls() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        initialize(&path).unwrap();

        append(&path, &[record("Ivan", "áno")]).unwrap();
        append(&path, &[SignatureRecord::anonymous(), record("Eva", "tiež")]).unwrap();

        let rows = read_back(&path);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[1], vec!["Ivan", "Trnava", "áno", "05.03.2024"]);
        assert_eq!(rows[2], vec!["", "", "", ""]);
        assert_eq!(rows[3][0], "Eva");
    }

    #[test]
    fn free_text_is_quoted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        initialize(&path).unwrap();

        let comment = "jeden, dva\n\"tri\"";
        append(&path, &[record("Ján", comment)]).unwrap();

        let rows = read_back(&path);
        assert_eq!(rows[1][2], comment);
    }

    #[test]
    fn append_without_initialize_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.csv");
        assert!(append(&path, &[record("X", "y")]).is_err());
    }
}
