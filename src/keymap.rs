// Key to operation lookup. Named keys have fixed bindings; Ctrl+letter and Ctrl+Shift+letter
// come from a remappable table string.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Prompt operations. The first [`BINDABLE`] variants, in this order, are the slots of the
/// ctrl-letter table string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Ctrl {
    Paste,
    Copy,
    Enter,
    Prev,
    Next,
    PgUp,
    PgDown,
    Up,
    Down,
    Bol,
    Eol,
    Left,
    Right,
    WLeft,
    WRight,
    DelBol,
    DelEol,
    DelLeft,
    DelRight,
    DelWord,
    SelBol,
    SelEol,
    SelLeft,
    SelRight,
    SelWLeft,
    SelWRight,
    Undo,
    Redo,
    Cancel,
    Nothing,
    Insert,
}

pub const BINDABLE: [Ctrl; 29] = [
    Ctrl::Paste,
    Ctrl::Copy,
    Ctrl::Enter,
    Ctrl::Prev,
    Ctrl::Next,
    Ctrl::PgUp,
    Ctrl::PgDown,
    Ctrl::Up,
    Ctrl::Down,
    Ctrl::Bol,
    Ctrl::Eol,
    Ctrl::Left,
    Ctrl::Right,
    Ctrl::WLeft,
    Ctrl::WRight,
    Ctrl::DelBol,
    Ctrl::DelEol,
    Ctrl::DelLeft,
    Ctrl::DelRight,
    Ctrl::DelWord,
    Ctrl::SelBol,
    Ctrl::SelEol,
    Ctrl::SelLeft,
    Ctrl::SelRight,
    Ctrl::SelWLeft,
    Ctrl::SelWRight,
    Ctrl::Undo,
    Ctrl::Redo,
    Ctrl::Cancel,
];

impl Ctrl {
    /// Operations that change the text as typed by the user.
    pub fn is_editing(self) -> bool {
        matches!(
            self,
            Ctrl::DelBol | Ctrl::DelEol | Ctrl::DelLeft | Ctrl::DelRight | Ctrl::DelWord | Ctrl::Insert
        )
    }

    pub fn is_undo(self) -> bool {
        matches!(self, Ctrl::Undo | Ctrl::Redo)
    }

    pub fn is_motion(self) -> bool {
        matches!(
            self,
            Ctrl::Bol | Ctrl::Eol | Ctrl::Left | Ctrl::Right | Ctrl::WLeft | Ctrl::WRight
        )
    }

    pub fn is_selection(self) -> bool {
        matches!(
            self,
            Ctrl::SelBol | Ctrl::SelEol | Ctrl::SelLeft | Ctrl::SelRight | Ctrl::SelWLeft | Ctrl::SelWRight
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Keymap {
    lower: [Option<Ctrl>; 26],
    upper: [Option<Ctrl>; 26],
}

impl Default for Keymap {
    fn default() -> Self {
        Keymap::from_table(crate::config::DEFAULT_CTRL_KEYS)
    }
}

impl Keymap {
    /// Slot `i` of `table` binds its letter to `BINDABLE[i]`: lowercase for Ctrl,
    /// uppercase for Ctrl+Shift. Anything that is not an ASCII letter leaves the slot
    /// unbound; characters past the last slot are ignored.
    pub fn from_table(table: &str) -> Self {
        let mut map = Keymap {
            lower: [None; 26],
            upper: [None; 26],
        };
        for (ch, op) in table.chars().zip(BINDABLE) {
            if ch.is_ascii_lowercase() {
                map.lower[(ch as u8 - b'a') as usize] = Some(op);
            } else if ch.is_ascii_uppercase() {
                map.upper[(ch as u8 - b'A') as usize] = Some(op);
            }
        }
        map
    }

    /// Operation bound to Ctrl+`letter` (Ctrl+Shift when `shift`).
    pub fn ctrl_letter(&self, letter: char, shift: bool) -> Option<Ctrl> {
        if !letter.is_ascii_alphabetic() {
            return None;
        }
        let idx = (letter.to_ascii_lowercase() as u8 - b'a') as usize;
        if shift || letter.is_ascii_uppercase() {
            self.upper[idx]
        } else {
            self.lower[idx]
        }
    }

    pub fn operation(&self, key: &KeyEvent) -> Ctrl {
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => Ctrl::Cancel,
            KeyCode::Enter => Ctrl::Enter,
            KeyCode::BackTab => Ctrl::Prev,
            KeyCode::Tab if shift => Ctrl::Prev,
            KeyCode::Tab => Ctrl::Next,
            KeyCode::PageUp => Ctrl::PgUp,
            KeyCode::PageDown => Ctrl::PgDown,
            KeyCode::Backspace => Ctrl::DelLeft,
            KeyCode::Delete => Ctrl::DelRight,
            KeyCode::Up => Ctrl::Up,
            KeyCode::Down => Ctrl::Down,
            KeyCode::Home if shift => Ctrl::SelBol,
            KeyCode::Home => Ctrl::Bol,
            KeyCode::End if shift => Ctrl::SelEol,
            KeyCode::End => Ctrl::Eol,
            KeyCode::Left => match (shift, ctrl) {
                (true, true) => Ctrl::SelWLeft,
                (true, false) => Ctrl::SelLeft,
                (false, true) => Ctrl::WLeft,
                (false, false) => Ctrl::Left,
            },
            KeyCode::Right => match (shift, ctrl) {
                (true, true) => Ctrl::SelWRight,
                (true, false) => Ctrl::SelRight,
                (false, true) => Ctrl::WRight,
                (false, false) => Ctrl::Right,
            },
            KeyCode::Char(c) if ctrl => self.ctrl_letter(c, shift).unwrap_or(Ctrl::Nothing),
            KeyCode::Char(_) => Ctrl::Insert,
            _ => Ctrl::Nothing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, mods: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, mods)
    }

    #[test]
    fn default_table_binds_emacs_letters() {
        let k = Keymap::default();
        assert_eq!(k.ctrl_letter('v', false), Some(Ctrl::Paste));
        assert_eq!(k.ctrl_letter('c', false), Some(Ctrl::Copy));
        assert_eq!(k.ctrl_letter('m', false), Some(Ctrl::Enter));
        assert_eq!(k.ctrl_letter('p', false), Some(Ctrl::Prev));
        assert_eq!(k.ctrl_letter('n', false), Some(Ctrl::Next));
        assert_eq!(k.ctrl_letter('a', false), Some(Ctrl::Bol));
        assert_eq!(k.ctrl_letter('e', false), Some(Ctrl::Eol));
        assert_eq!(k.ctrl_letter('u', false), Some(Ctrl::DelBol));
        assert_eq!(k.ctrl_letter('k', false), Some(Ctrl::DelEol));
        assert_eq!(k.ctrl_letter('w', false), Some(Ctrl::DelWord));
        assert_eq!(k.ctrl_letter('a', true), Some(Ctrl::SelBol));
        assert_eq!(k.ctrl_letter('F', false), Some(Ctrl::SelRight));
        assert_eq!(k.ctrl_letter('z', false), Some(Ctrl::Undo));
        assert_eq!(k.ctrl_letter('z', true), Some(Ctrl::Redo));
        assert_eq!(k.ctrl_letter('q', false), None);
        assert_eq!(k.ctrl_letter('1', false), None);
    }

    #[test]
    fn remapped_table() {
        // bind Ctrl+q to Cancel only
        let table = format!("{}q", ":".repeat(28));
        let k = Keymap::from_table(&table);
        assert_eq!(k.ctrl_letter('q', false), Some(Ctrl::Cancel));
        assert_eq!(k.ctrl_letter('v', false), None);
        let ev = key(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert_eq!(k.operation(&ev), Ctrl::Cancel);
    }

    #[test]
    fn named_keys() {
        let k = Keymap::default();
        let none = KeyModifiers::NONE;
        assert_eq!(k.operation(&key(KeyCode::Esc, none)), Ctrl::Cancel);
        assert_eq!(k.operation(&key(KeyCode::Enter, none)), Ctrl::Enter);
        assert_eq!(k.operation(&key(KeyCode::Tab, none)), Ctrl::Next);
        assert_eq!(k.operation(&key(KeyCode::BackTab, KeyModifiers::SHIFT)), Ctrl::Prev);
        assert_eq!(k.operation(&key(KeyCode::Backspace, none)), Ctrl::DelLeft);
        assert_eq!(k.operation(&key(KeyCode::Home, KeyModifiers::SHIFT)), Ctrl::SelBol);
        assert_eq!(k.operation(&key(KeyCode::End, none)), Ctrl::Eol);
        assert_eq!(
            k.operation(&key(KeyCode::Left, KeyModifiers::SHIFT | KeyModifiers::CONTROL)),
            Ctrl::SelWLeft
        );
        assert_eq!(k.operation(&key(KeyCode::Right, KeyModifiers::CONTROL)), Ctrl::WRight);
        assert_eq!(k.operation(&key(KeyCode::Char('x'), none)), Ctrl::Insert);
        assert_eq!(k.operation(&key(KeyCode::Char('X'), KeyModifiers::SHIFT)), Ctrl::Insert);
        assert_eq!(k.operation(&key(KeyCode::Char('q'), KeyModifiers::CONTROL)), Ctrl::Nothing);
        assert_eq!(k.operation(&key(KeyCode::F(1), none)), Ctrl::Nothing);
    }

    #[test]
    fn classification() {
        assert!(Ctrl::Insert.is_editing());
        assert!(Ctrl::DelWord.is_editing());
        assert!(!Ctrl::Paste.is_editing());
        assert!(Ctrl::Redo.is_undo());
        assert!(Ctrl::WLeft.is_motion());
        assert!(!Ctrl::SelWLeft.is_motion());
        assert!(Ctrl::SelWLeft.is_selection());
        assert_eq!(BINDABLE.len(), crate::config::DEFAULT_CTRL_KEYS.len());
    }
}
