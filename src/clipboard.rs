// Clipboard and primary selection.
//
// Terminals accept clipboard writes through OSC 52 but offer no portable way to read the
// system clipboard back, so pastes are served from what this process copied last. Text
// pasted from the outside arrives as a bracketed paste event instead.

use std::io::Write;

use crossterm::clipboard::CopyToClipboard;
use crossterm::execute;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    Clipboard,
    Primary,
}

pub trait Clipboard {
    fn set(&mut self, which: Selection, text: &str);
    fn get(&mut self, which: Selection) -> Option<String>;
}

pub struct TerminalClipboard<W: Write> {
    out: W,
    clipboard: Option<String>,
    primary: Option<String>,
}

impl<W: Write> TerminalClipboard<W> {
    pub fn new(out: W) -> Self {
        TerminalClipboard {
            out,
            clipboard: None,
            primary: None,
        }
    }
}

impl<W: Write> Clipboard for TerminalClipboard<W> {
    fn set(&mut self, which: Selection, text: &str) {
        let res = match which {
            Selection::Clipboard => {
                self.clipboard = Some(text.to_string());
                execute!(self.out, CopyToClipboard::to_clipboard_from(text))
            }
            Selection::Primary => {
                self.primary = Some(text.to_string());
                execute!(self.out, CopyToClipboard::to_primary_from(text))
            }
        };
        if let Err(err) = res {
            tracing::debug!(?which, %err, "clipboard write failed");
        }
    }

    fn get(&mut self, which: Selection) -> Option<String> {
        match which {
            Selection::Clipboard => self.clipboard.clone(),
            Selection::Primary => self.primary.clone(),
        }
    }
}
