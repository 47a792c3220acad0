//! Previously entered lines, one per line in a plain text file.
//!
//! The log holds at most `capacity` entries, oldest first. `index` walks through them for
//! recall and rests one past the newest entry when nothing is being recalled.

use std::fs;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::buffer::Direction;

#[derive(Clone, Debug, Default)]
pub struct HistoryLog {
    entries: Vec<String>,
    capacity: usize,
    index: usize,
    path: Option<PathBuf>,
}

impl HistoryLog {
    /// An in-memory log, oldest entry first. Entries beyond `capacity` are dropped.
    pub fn from_entries<I, S>(entries: I, capacity: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries: Vec<String> = entries.into_iter().take(capacity).map(Into::into).collect();
        HistoryLog {
            index: entries.len(),
            entries,
            capacity,
            path: None,
        }
    }

    /// Read up to `capacity` lines from `path`. A missing file is an empty log that will
    /// be created on save.
    pub fn load(path: &Path, capacity: usize) -> io::Result<Self> {
        let mut entries = Vec::new();
        match fs::File::open(path) {
            Ok(file) => {
                for line in BufReader::new(file).lines() {
                    if entries.len() >= capacity {
                        break;
                    }
                    entries.push(line?);
                }
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(err),
        }
        tracing::debug!(path = %path.display(), entries = entries.len(), "loaded history");
        let mut log = Self::from_entries(entries, capacity);
        log.path = Some(path.to_path_buf());
        Ok(log)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Step to an older (`Backward`) or newer (`Forward`) entry. Stops at both ends;
    /// returns `None` only while resting past the newest entry.
    pub fn navigate(&mut self, dir: Direction) -> Option<&str> {
        match dir {
            Direction::Backward => {
                if self.index > 0 {
                    self.index -= 1;
                }
            }
            Direction::Forward => {
                if self.index + 1 < self.entries.len() {
                    self.index += 1;
                }
            }
        }
        self.entries.get(self.index).map(String::as_str)
    }

    /// Lines the file holds after `text` is committed: the old entries, minus the oldest
    /// one when full, plus `text` unless it repeats the newest entry.
    pub fn appended<'a>(&'a self, text: &'a str) -> Vec<&'a str> {
        let Some(last) = self.entries.last() else {
            return vec![text];
        };
        let differs = last != text;
        let skip = usize::from(differs && self.entries.len() >= self.capacity);
        let mut out: Vec<&str> = self.entries.iter().skip(skip).map(String::as_str).collect();
        if differs {
            out.push(text);
        }
        out
    }

    /// Rewrite the history file with `text` committed. Does nothing for an in-memory log.
    pub fn save(&self, text: &str) -> io::Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let mut file = io::BufWriter::new(fs::File::create(path)?);
        for line in self.appended(text) {
            writeln!(file, "{line}")?;
        }
        file.flush()?;
        tracing::debug!(path = %path.display(), "saved history");
        Ok(())
    }
}
