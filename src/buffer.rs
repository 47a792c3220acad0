//! The editable input line.
//!
//! Offsets are byte offsets into UTF-8 text and always sit on a code point boundary.
//! The buffer has a fixed capacity in bytes; an edit that would exceed it is refused
//! as a whole.

pub const DEFAULT_CAPACITY: usize = 1024;

/// Characters that separate words.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Delimiters(String);

impl Delimiters {
    pub fn new(set: &str) -> Self {
        Delimiters(set.to_string())
    }

    pub fn contains(&self, c: char) -> bool {
        self.0.contains(c)
    }
}

impl Default for Delimiters {
    fn default() -> Self {
        Delimiters::new(crate::config::DEFAULT_WORD_DELIMITERS)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Backward,
    Forward,
}

/// Offset of the neighbouring code point boundary from `pos` in `dir`. Clamped to
/// `0..=text.len()`.
pub fn next_rune(text: &str, pos: usize, dir: Direction) -> usize {
    let bytes = text.as_bytes();
    match dir {
        Direction::Forward => {
            if pos >= bytes.len() {
                return bytes.len();
            }
            let mut n = pos + 1;
            while n < bytes.len() && is_continuation(bytes[n]) {
                n += 1;
            }
            n
        }
        Direction::Backward => {
            if pos == 0 {
                return 0;
            }
            let mut n = pos - 1;
            while n > 0 && is_continuation(bytes[n]) {
                n -= 1;
            }
            n
        }
    }
}

fn is_continuation(b: u8) -> bool {
    b & 0xc0 == 0x80
}

/// Move from `pos` across the run of characters that are delimiters (`delim`) or word
/// characters (`!delim`), stopping at the first character of the other kind.
pub fn skip_run(text: &str, pos: usize, dir: Direction, delims: &Delimiters, delim: bool) -> usize {
    let mut pos = pos;
    loop {
        let next = match dir {
            Direction::Backward => text[..pos].chars().next_back(),
            Direction::Forward => text[pos..].chars().next(),
        };
        match next {
            Some(c) if delims.contains(c) == delim => match dir {
                Direction::Backward => pos -= c.len_utf8(),
                Direction::Forward => pos += c.len_utf8(),
            },
            _ => return pos,
        }
    }
}

/// Start of the previous word (`Backward`) or end of the next one (`Forward`): skip a
/// run of delimiters, then a run of word characters.
pub fn word_edge(text: &str, pos: usize, dir: Direction, delims: &Delimiters) -> usize {
    let pos = skip_run(text, pos.min(text.len()), dir, delims, true);
    skip_run(text, pos, dir, delims, false)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditBuffer {
    text: String,
    capacity: usize,
    pub cursor: usize,
    pub select: usize,
    /// Where the path token of an ongoing file completion starts.
    pub file_anchor: Option<usize>,
}

impl Default for EditBuffer {
    fn default() -> Self {
        EditBuffer::with_capacity(DEFAULT_CAPACITY)
    }
}

impl EditBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        EditBuffer {
            text: String::with_capacity(capacity),
            capacity,
            cursor: 0,
            select: 0,
            file_anchor: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn has_selection(&self) -> bool {
        self.cursor != self.select
    }

    /// `(min, max)` of cursor and anchor.
    pub fn selection_range(&self) -> (usize, usize) {
        (self.cursor.min(self.select), self.cursor.max(self.select))
    }

    pub fn selected_text(&self) -> Option<&str> {
        if !self.has_selection() {
            return None;
        }
        let (lo, hi) = self.selection_range();
        Some(&self.text[lo..hi])
    }

    /// The shared edit primitive: a positive `count` inserts the first `count` bytes of
    /// `s` at the cursor, a negative one removes `-count` bytes before it. Cursor and
    /// anchor end up collapsed after the edit. Returns `false` and leaves the buffer
    /// untouched when the edit would overflow the capacity or split a code point.
    pub fn splice(&mut self, s: &str, count: isize) -> bool {
        if count >= 0 {
            let n = count as usize;
            if n > s.len() || !s.is_char_boundary(n) {
                return false;
            }
            if self.text.len() + n > self.capacity {
                return false;
            }
            self.text.insert_str(self.cursor, &s[..n]);
            self.cursor += n;
        } else {
            let n = count.unsigned_abs();
            if n > self.cursor || !self.text.is_char_boundary(self.cursor - n) {
                return false;
            }
            let start = self.cursor - n;
            self.text.replace_range(start..self.cursor, "");
            self.cursor = start;
        }
        self.select = self.cursor;
        true
    }

    pub fn insert(&mut self, s: &str) -> bool {
        self.splice(s, s.len() as isize)
    }

    /// Remove `n` bytes before the cursor.
    pub fn delete_back(&mut self, n: usize) -> bool {
        self.splice("", -(n as isize))
    }

    /// Remove the selected range, if any.
    pub fn delete_selection(&mut self) -> bool {
        if !self.has_selection() {
            return false;
        }
        let (lo, hi) = self.selection_range();
        self.text.replace_range(lo..hi, "");
        self.cursor = lo;
        self.select = lo;
        true
    }

    /// Drop everything from the cursor to the end.
    pub fn truncate_at_cursor(&mut self) {
        self.text.truncate(self.cursor);
        self.select = self.cursor;
    }

    /// Replace the whole text and park the cursor at the end. Refused when `s` does not
    /// fit.
    pub fn set_text(&mut self, s: &str) -> bool {
        if s.len() > self.capacity {
            return false;
        }
        self.text.clear();
        self.text.push_str(s);
        self.cursor = self.text.len();
        self.select = self.cursor;
        true
    }

    /// Step the cursor one code point; returns `false` at either end.
    pub fn move_char(&mut self, dir: Direction) -> bool {
        let at_edge = match dir {
            Direction::Backward => self.cursor == 0,
            Direction::Forward => self.cursor >= self.text.len(),
        };
        if at_edge {
            return false;
        }
        self.cursor = next_rune(&self.text, self.cursor, dir);
        true
    }

    pub fn move_word(&mut self, dir: Direction, delims: &Delimiters) {
        self.cursor = word_edge(&self.text, self.cursor, dir, delims);
    }

    pub fn move_line(&mut self, dir: Direction) {
        self.cursor = match dir {
            Direction::Backward => 0,
            Direction::Forward => self.text.len(),
        };
    }

    /// Delete the word before the cursor together with the delimiters that follow it.
    pub fn delete_word(&mut self, delims: &Delimiters) {
        let start = word_edge(&self.text, self.cursor, Direction::Backward, delims);
        let n = self.cursor - start;
        if n > 0 {
            self.delete_back(n);
        }
    }
}
