//! Flat-file record store
//!
//! One store wraps one line-oriented text file. Handles are opened for the
//! duration of a single call and dropped before it returns.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::error::{Result, StoreError};

/// Separator between the fields of one record
pub const FIELD_SEPARATOR: char = ';';

#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Create the file with `default_contents` if it is missing
    ///
    /// Returns `true` when the file was created by this call.
    pub fn ensure_created(&self, default_contents: &str) -> Result<bool> {
        if self.exists() {
            return Ok(false);
        }

        fs::write(&self.path, default_contents).map_err(|e| StoreError::io(&self.path, e))?;
        tracing::debug!(path = %self.path.display(), "created record store");
        Ok(true)
    }

    /// Read the whole file split on newlines, blank entries included
    pub fn read_all_lines(&self) -> Result<Vec<String>> {
        let content =
            fs::read_to_string(&self.path).map_err(|e| StoreError::io(&self.path, e))?;

        Ok(content
            .split('\n')
            .map(|line| line.trim_end_matches('\r').to_string())
            .collect())
    }

    /// Non-blank lines paired with their 1-based line number
    pub fn records(&self) -> Result<Vec<(usize, String)>> {
        let records: Vec<_> = self
            .read_all_lines()?
            .into_iter()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| (i + 1, line))
            .collect();

        tracing::debug!(path = %self.path.display(), count = records.len(), "read records");
        Ok(records)
    }

    /// Append one record on its own line
    ///
    /// The content is always preceded by a newline, so a file without a
    /// trailing newline still gets the record on a fresh line. The blank line
    /// this leaves at the top of an initially empty file is skipped on read.
    pub fn append_line(&self, content: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| StoreError::io(&self.path, e))?;

        write!(file, "\n{}", content).map_err(|e| StoreError::io(&self.path, e))?;
        tracing::debug!(path = %self.path.display(), "appended record");
        Ok(())
    }

    /// Replace the whole file with `lines`
    ///
    /// The new content is written to a temporary file next to the target and
    /// renamed over it, so a failed write leaves the old table intact.
    pub fn overwrite_all<S: AsRef<str>>(&self, lines: &[S]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let joined = lines
            .iter()
            .map(|line| line.as_ref())
            .collect::<Vec<_>>()
            .join("\n");

        let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| StoreError::io(&dir, e))?;
        tmp.write_all(joined.as_bytes())
            .map_err(|e| StoreError::io(tmp.path(), e))?;
        tmp.as_file()
            .sync_all()
            .map_err(|e| StoreError::io(tmp.path(), e))?;
        tmp.persist(&self.path)
            .map_err(|e| StoreError::io(&self.path, e.error))?;

        tracing::debug!(
            path = %self.path.display(),
            count = lines.len(),
            "rewrote record store"
        );
        Ok(())
    }

    /// Split a record into exactly `expected` fields
    pub fn split_fields<'a>(
        &self,
        line_no: usize,
        line: &'a str,
        expected: usize,
    ) -> Result<Vec<&'a str>> {
        let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
        if fields.len() != expected {
            return Err(self.malformed(
                line_no,
                format!("expected {} fields, found {}", expected, fields.len()),
            ));
        }
        Ok(fields)
    }

    pub(crate) fn malformed(&self, line: usize, reason: impl Into<String>) -> StoreError {
        StoreError::MalformedRecord {
            path: self.path.clone(),
            line,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir, name: &str) -> RecordStore {
        RecordStore::new(dir.path().join(name))
    }

    #[test]
    fn test_ensure_created_seeds_missing_file() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir, "user.txt");
        assert!(!store.exists());

        assert!(store.ensure_created("admin;password").unwrap());
        assert!(store.exists());
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "admin;password");
    }

    #[test]
    fn test_ensure_created_keeps_existing_file() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir, "user.txt");
        fs::write(store.path(), "bob;pw").unwrap();

        assert!(!store.ensure_created("admin;password").unwrap());
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "bob;pw");
    }

    #[test]
    fn test_append_line_starts_new_line() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir, "user.txt");
        store.ensure_created("admin;password").unwrap();

        store.append_line("bob;pw1").unwrap();

        assert_eq!(
            store.read_all_lines().unwrap(),
            vec!["admin;password", "bob;pw1"]
        );
    }

    #[test]
    fn test_records_skip_blank_lines() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir, "tasks.txt");
        store.ensure_created("").unwrap();
        store.append_line("a").unwrap();
        store.append_line("b").unwrap();

        let records = store.records().unwrap();
        assert_eq!(records, vec![(2, "a".to_string()), (3, "b".to_string())]);
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir, "missing.txt");

        let err = store.read_all_lines().unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }

    #[test]
    fn test_overwrite_all_replaces_content() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir, "tasks.txt");
        fs::write(store.path(), "old\nlines\nhere").unwrap();

        store.overwrite_all(&["one", "two"]).unwrap();

        assert_eq!(fs::read_to_string(store.path()).unwrap(), "one\ntwo");
        // No temporary files left behind
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_split_fields_rejects_wrong_count() {
        let store = RecordStore::new("user.txt");

        assert_eq!(store.split_fields(1, "a;b", 2).unwrap(), vec!["a", "b"]);

        let err = store.split_fields(7, "a;b;c", 2).unwrap_err();
        match err {
            StoreError::MalformedRecord { line, reason, .. } => {
                assert_eq!(line, 7);
                assert!(reason.contains("expected 2 fields, found 3"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
