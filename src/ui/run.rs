// Terminal host: raw mode on stderr, crossterm events in, frames out. Stdout is kept for
// the selected line.

use std::io::{self, Stderr, Write};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind,
};
use crossterm::style::Print;
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};

use crate::buffer::Direction;
use crate::clipboard::{Clipboard, TerminalClipboard};
use crate::error::StartupError;
use crate::keymap::{Ctrl, Keymap};
use crate::ui::model::{Effect, Model};
use crate::ui::render::{cursor_column, render_full, render_input};
use crate::ui::{Msg, Outcome};

/// Raw mode plus the alternate screen for as long as it lives.
struct Screen {
    out: Stderr,
}

impl Screen {
    fn enter() -> Result<Self, StartupError> {
        terminal::enable_raw_mode().map_err(StartupError::Terminal)?;
        let mut screen = Screen { out: io::stderr() };
        execute!(
            screen.out,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste
        )
        .map_err(StartupError::Terminal)?;
        Ok(screen)
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = execute!(
            self.out,
            DisableBracketedPaste,
            DisableMouseCapture,
            LeaveAlternateScreen,
            Show
        );
        let _ = terminal::disable_raw_mode();
    }
}

/// Run the prompt until the user picks a line (`Some`) or cancels (`None`).
pub fn run(mut model: Model, keymap: &Keymap) -> Result<Option<String>, StartupError> {
    let mut screen = Screen::enter()?;
    let mut clipboard = TerminalClipboard::new(io::stderr());
    let start = Instant::now();

    let (width, height) = terminal::size().map_err(StartupError::Terminal)?;
    model.update(Msg::WindowSize {
        width: width as usize,
        height: height as usize,
    });
    draw(&mut screen.out, &model, &Outcome::DrawPrompt).map_err(StartupError::Terminal)?;

    loop {
        let ev = event::read().map_err(StartupError::Terminal)?;
        let Some(msg) = translate(&ev, keymap, start.elapsed()) else {
            continue;
        };
        tracing::trace!(?msg, "event");
        let mut outcome = model.update(msg);

        for effect in model.take_effects() {
            match effect {
                Effect::Copy(which, text) => clipboard.set(which, &text),
                Effect::RequestPaste(which) => {
                    let Some(text) = clipboard.get(which) else {
                        continue;
                    };
                    let pasted = model.update(Msg::Paste(text));
                    outcome = stronger(outcome, pasted);
                    // a paste may select text of its own
                    for late in model.take_effects() {
                        if let Effect::Copy(which, text) = late {
                            clipboard.set(which, &text);
                        }
                    }
                }
            }
        }

        match outcome {
            Outcome::Exit(line) => {
                tracing::debug!(selected = line.is_some(), "prompt closed");
                return Ok(line);
            }
            Outcome::Nop => {}
            other => draw(&mut screen.out, &model, &other).map_err(StartupError::Terminal)?,
        }
    }
}

fn stronger(a: Outcome, b: Outcome) -> Outcome {
    match (a, b) {
        (exit @ Outcome::Exit(_), _) | (_, exit @ Outcome::Exit(_)) => exit,
        (Outcome::DrawPrompt, _) | (_, Outcome::DrawPrompt) => Outcome::DrawPrompt,
        (Outcome::Nop, b) => b,
        (a, _) => a,
    }
}

/// Map a terminal event to a prompt message. Key releases and unbound keys give `None`.
pub fn translate(ev: &Event, keymap: &Keymap, elapsed: Duration) -> Option<Msg> {
    match ev {
        Event::Key(key) if key.kind != KeyEventKind::Release => match keymap.operation(key) {
            Ctrl::Insert => match key.code {
                KeyCode::Char(c) => Some(Msg::Rune(c)),
                _ => None,
            },
            Ctrl::Nothing => None,
            op => Some(Msg::Op(op)),
        },
        Event::Mouse(me) => {
            let column = me.column as usize;
            let row = me.row as usize;
            match me.kind {
                MouseEventKind::Down(MouseButton::Left) => Some(Msg::Press {
                    column,
                    row,
                    time_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
                }),
                MouseEventKind::Down(MouseButton::Middle) => Some(Msg::MiddleClick),
                MouseEventKind::Drag(MouseButton::Left) => Some(Msg::Drag { column, row }),
                MouseEventKind::Up(MouseButton::Left) => Some(Msg::Release),
                MouseEventKind::Moved => Some(Msg::Hover { column, row }),
                MouseEventKind::ScrollDown => Some(Msg::Scroll(Direction::Forward)),
                MouseEventKind::ScrollUp => Some(Msg::Scroll(Direction::Backward)),
                _ => None,
            }
        }
        Event::Paste(text) => Some(Msg::Paste(text.clone())),
        Event::Resize(width, height) => Some(Msg::WindowSize {
            width: *width as usize,
            height: *height as usize,
        }),
        _ => None,
    }
}

/// Write a frame. `DrawInput` only repaints the input row; anything else repaints the
/// whole prompt and clears what is left below it.
pub fn draw<W: Write>(out: &mut W, m: &Model, outcome: &Outcome) -> io::Result<()> {
    queue!(out, Hide)?;
    if *outcome == Outcome::DrawInput {
        queue!(out, MoveTo(0, 0), Print(render_input(m)))?;
    } else {
        let frame = render_full(m);
        let mut rows = 0;
        for (row, line) in frame.lines().enumerate() {
            queue!(out, MoveTo(0, row as u16), Print(line))?;
            rows += 1;
        }
        if rows < m.screen_height {
            queue!(out, MoveTo(0, rows as u16), Clear(ClearType::FromCursorDown))?;
        }
    }
    queue!(out, MoveTo(cursor_column(m) as u16, 0), Show)?;
    out.flush()
}
