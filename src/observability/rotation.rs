//! Size-capped append-only file.
//!
//! Before each append the current file is checked against the size cap. An
//! oversized file is renamed to `<name>.<unix-seconds>` and only the newest
//! backups are kept.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_BACKUP_FILES: usize = 3;

pub struct RotatingFile {
    path: PathBuf,
    max_bytes: u64,
    max_backups: usize,
    handle: Option<File>,
}

impl RotatingFile {
    pub const fn new(path: PathBuf) -> Self {
        Self::with_limits(path, MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES)
    }

    pub const fn with_limits(path: PathBuf, max_bytes: u64, max_backups: usize) -> Self {
        Self {
            path,
            max_bytes,
            max_backups,
            handle: None,
        }
    }

    /// Appends `line` plus a newline, rotating first if the file is over the cap.
    ///
    /// The file is opened lazily and flushed after every line.
    pub fn append_line(&mut self, line: &str) -> io::Result<()> {
        if fs::metadata(&self.path).is_ok_and(|m| m.len() > self.max_bytes) {
            self.handle = None;
            self.rotate()?;
        }

        if self.handle.is_none() {
            self.handle = Some(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&self.path)?,
            );
        }

        if let Some(file) = self.handle.as_mut() {
            writeln!(file, "{line}")?;
            file.flush()?;
        }
        Ok(())
    }

    fn rotate(&self) -> io::Result<()> {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();

        let mut backup = self.path.clone().into_os_string();
        backup.push(format!(".{stamp}"));
        let mut backup = PathBuf::from(backup);
        // Several rotations inside one second would otherwise collide.
        let mut suffix = 1;
        while backup.exists() {
            let mut next = self.path.clone().into_os_string();
            next.push(format!(".{stamp}-{suffix}"));
            backup = PathBuf::from(next);
            suffix += 1;
        }

        fs::rename(&self.path, &backup)?;
        self.prune_backups()
    }

    fn prune_backups(&self) -> io::Result<()> {
        let (Some(dir), Some(name)) = (
            self.path.parent(),
            self.path.file_name().and_then(|n| n.to_str()),
        ) else {
            return Ok(());
        };
        let dir = if dir.as_os_str().is_empty() { Path::new(".") } else { dir };
        let prefix = format!("{name}.");

        let mut backups: Vec<(SystemTime, PathBuf)> = fs::read_dir(dir)?
            .filter_map(Result::ok)
            .filter(|entry| {
                entry
                    .file_name()
                    .to_str()
                    .is_some_and(|n| n.starts_with(&prefix))
            })
            .map(|entry| {
                let modified = entry
                    .metadata()
                    .and_then(|m| m.modified())
                    .unwrap_or(UNIX_EPOCH);
                (modified, entry.path())
            })
            .collect();

        backups.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| b.1.cmp(&a.1)));
        for (_, stale) in backups.into_iter().skip(self.max_backups) {
            let _ = fs::remove_file(stale);
        }
        Ok(())
    }
}

impl std::fmt::Debug for RotatingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFile")
            .field("path", &self.path)
            .field("max_bytes", &self.max_bytes)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backups_of(dir: &Path) -> Vec<String> {
        fs::read_dir(dir)
            .unwrap()
            .filter_map(|e| e.ok()?.file_name().into_string().ok())
            .filter(|n| n.starts_with("otlp.json."))
            .collect()
    }

    #[test]
    fn appends_lines_without_rotating_under_cap() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("otlp.json");
        let mut file = RotatingFile::new(path.clone());

        file.append_line("{\"a\":1}").unwrap();
        file.append_line("{\"b\":2}").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "{\"a\":1}\n{\"b\":2}\n");
        assert!(backups_of(dir.path()).is_empty());
    }

    #[test]
    fn oversized_file_is_moved_aside() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("otlp.json");
        let mut file = RotatingFile::with_limits(path.clone(), 4, 3);

        file.append_line("first line").unwrap();
        file.append_line("second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second\n");
        assert_eq!(backups_of(dir.path()).len(), 1);
    }

    #[test]
    fn old_backups_are_pruned() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("otlp.json");
        let mut file = RotatingFile::with_limits(path, 1, 2);

        for i in 0..5 {
            file.append_line(&format!("line {i}")).unwrap();
        }

        assert_eq!(backups_of(dir.path()).len(), 2);
    }
}
