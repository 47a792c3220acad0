//! Linear undo/redo over whole-text snapshots.
//!
//! Snapshots are kept oldest first behind a sentinel slot at index 0. `current` points at
//! the snapshot the next undo starts from; moving toward index 0 walks back in time.

use crate::buffer::EditBuffer;

#[derive(Clone, Debug)]
pub struct UndoLog {
    entries: Vec<Option<String>>,
    current: Option<usize>,
}

impl Default for UndoLog {
    fn default() -> Self {
        UndoLog {
            entries: vec![None],
            current: None,
        }
    }
}

impl UndoLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded snapshots, the sentinel excluded.
    pub fn len(&self) -> usize {
        self.entries.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot the buffer. Anything newer than `current` is dropped first, and a text
    /// equal to the newest snapshot is not stored twice. `editing` marks a snapshot taken
    /// right before an edit; only those move `current`.
    pub fn record(&mut self, text: &str, editing: bool) {
        if let Some(cur) = self.current {
            if cur + 1 < self.entries.len() {
                self.entries.truncate(cur + 1);
            }
        }

        let newest = self.entries.last().and_then(|e| e.as_deref());
        if newest != Some(text) {
            self.entries.push(Some(text.to_string()));
            if editing {
                self.current = Some(self.entries.len() - 1);
            }
        }
    }

    /// Step back one snapshot and copy it into the buffer. Returns `false` when there is
    /// nothing older.
    pub fn undo(&mut self, buffer: &mut EditBuffer) -> bool {
        let Some(mut cur) = self.current else {
            return false;
        };
        let Some(text) = self.entries[cur].as_deref() else {
            return false;
        };
        if text == buffer.text() {
            cur -= 1;
            self.current = Some(cur);
        }
        let Some(text) = self.entries[cur].as_deref() else {
            return false;
        };
        buffer.set_text(text);
        self.current = Some(cur - 1);
        true
    }

    /// Step forward one snapshot and copy it into the buffer. Returns `false` when there
    /// is nothing newer.
    pub fn redo(&mut self, buffer: &mut EditBuffer) -> bool {
        let Some(mut cur) = self.current else {
            return false;
        };
        if cur + 1 < self.entries.len() {
            cur += 1;
        }
        if cur + 1 < self.entries.len() && self.entries[cur].as_deref() == Some(buffer.text()) {
            cur += 1;
        }
        self.current = Some(cur);
        match self.entries[cur].as_deref() {
            Some(text) if text != buffer.text() => {
                buffer.set_text(text);
                true
            }
            _ => false,
        }
    }
}
