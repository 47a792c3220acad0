// UI module root: state in `model`, transitions in `update`, drawing in `render`, the
// terminal loop in `run`.

pub mod model;
pub mod render;
pub mod run;
pub mod update;

pub use model::{Completion, Effect, Model, Source, initial_model};
pub use render::render_full;
pub use run::run;
pub use update::handle_update;

use crate::buffer::Direction;
use crate::keymap::Ctrl;

/// Input to the state machine. Mouse positions are terminal cells relative to the top
/// left corner of the prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Msg {
    WindowSize { width: usize, height: usize },
    Op(Ctrl),
    Rune(char),
    Paste(String),
    Press { column: usize, row: usize, time_ms: u64 },
    Drag { column: usize, row: usize },
    Release,
    Hover { column: usize, row: usize },
    MiddleClick,
    Scroll(Direction),
}

/// What the host has to do after an update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Nop,
    DrawInput,
    DrawPrompt,
    /// End the program, printing the line if there is one.
    Exit(Option<String>),
}
