use std::path::PathBuf;

use thiserror::Error;

/// Conditions that stop the program before the prompt is ever shown.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("improper indentation detected at line {line}: {text:?}")]
    Indentation { line: usize, text: String },

    #[error("cannot parse config file {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot allocate color {name}: {value:?}")]
    Color { name: &'static str, value: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("cannot set up terminal: {0}")]
    Terminal(#[source] std::io::Error),
}
