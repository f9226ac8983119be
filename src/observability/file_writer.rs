//! Append-only trace file that rotates by size.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// Size at which the trace file is rotated (10 MiB).
pub const MAX_TRACE_FILE_BYTES: u64 = 10 * 1024 * 1024;

/// Rotated trace files kept next to the live one.
pub const MAX_TRACE_BACKUPS: usize = 3;

/// Line-oriented writer over a single trace file.
///
/// Before each write the live file is checked; once it is larger than the
/// size limit it is renamed to `<stem>.json.<n>` and a fresh file is started.
/// Only the newest backups are kept. The file handle is opened lazily so
/// constructing a writer never touches the disk.
pub struct RotatingFileWriter {
    path: PathBuf,
    max_bytes: u64,
    max_backups: usize,
    file: Mutex<Option<File>>,
}

impl RotatingFileWriter {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self::with_limits(path, MAX_TRACE_FILE_BYTES, MAX_TRACE_BACKUPS)
    }

    #[must_use]
    pub const fn with_limits(path: PathBuf, max_bytes: u64, max_backups: usize) -> Self {
        Self {
            path,
            max_bytes,
            max_backups,
            file: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `line` plus a newline and flushes.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be rotated, opened or written, or if the
    /// internal lock was poisoned.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("trace writer lock poisoned: {e}")))?;

        if self.needs_rotation() {
            *guard = None;
            self.rotate()?;
        }

        let file = match guard.take() {
            Some(file) => file,
            None => OpenOptions::new().create(true).append(true).open(&self.path)?,
        };
        let file = guard.insert(file);

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn needs_rotation(&self) -> bool {
        fs::metadata(&self.path).is_ok_and(|m| m.len() > self.max_bytes)
    }

    fn rotate(&self) -> io::Result<()> {
        let mut stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos());

        // Two rotations within one clock tick must not overwrite each other.
        let mut backup = self.backup_path(stamp);
        while backup.exists() {
            stamp += 1;
            backup = self.backup_path(stamp);
        }

        if self.path.exists() {
            fs::rename(&self.path, &backup)?;
        }
        self.prune_backups()
    }

    fn backup_path(&self, stamp: u128) -> PathBuf {
        self.path.with_extension(format!("json.{stamp}"))
    }

    /// Deletes all but the newest `max_backups` rotated files.
    fn prune_backups(&self) -> io::Result<()> {
        let dir = self
            .path
            .parent()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "trace file has no parent directory"))?;
        let prefix = self
            .path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(|stem| format!("{stem}.json."))
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "trace file name is not valid UTF-8"))?;

        let mut backups: Vec<(u128, PathBuf)> = fs::read_dir(dir)?
            .filter_map(std::result::Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name().into_string().ok()?;
                let stamp = name.strip_prefix(&prefix)?.parse::<u128>().ok()?;
                Some((stamp, entry.path()))
            })
            .collect();

        backups.sort_by(|a, b| b.0.cmp(&a.0));

        for (_, stale) in backups.iter().skip(self.max_backups) {
            let _ = fs::remove_file(stale);
        }
        Ok(())
    }
}

impl std::fmt::Debug for RotatingFileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFileWriter")
            .field("path", &self.path)
            .field("max_bytes", &self.max_bytes)
            .field("max_backups", &self.max_backups)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backups_in(dir: &Path) -> usize {
        fs::read_dir(dir)
            .unwrap()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_name().to_string_lossy().starts_with("traces.json."))
            .count()
    }

    #[test]
    fn appends_lines_and_creates_file_lazily() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("traces.json");
        let writer = RotatingFileWriter::new(path.clone());
        assert!(!path.exists());

        writer.write_line("{\"a\":1}").unwrap();
        writer.write_line("{\"b\":2}").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "{\"a\":1}\n{\"b\":2}\n");
        assert_eq!(backups_in(dir.path()), 0);
    }

    #[test]
    fn rotates_past_the_limit_and_keeps_newest_backups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("traces.json");
        let writer = RotatingFileWriter::with_limits(path.clone(), 16, 2);

        for i in 0..8 {
            writer.write_line(&format!("{{\"line\":{i:08}}}")).unwrap();
        }

        assert_eq!(backups_in(dir.path()), 2);
        assert_eq!(fs::read_to_string(&path).unwrap(), "{\"line\":00000007}\n");
    }

    #[test]
    fn ignores_unrelated_files_when_pruning() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("traces.json.notes"), "keep me").unwrap();
        let path = dir.path().join("traces.json");
        let writer = RotatingFileWriter::with_limits(path, 1, 0);

        writer.write_line("first").unwrap();
        writer.write_line("second").unwrap();

        assert!(dir.path().join("traces.json.notes").exists());
    }
}
