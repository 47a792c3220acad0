// Command-line options. `-h` names the history file, so clap's short help flag is turned
// off and only `--help` remains.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Default, Clone)]
#[command(
    name = "tprompt",
    version,
    about = "Read completion items from stdin and prompt for a line of input",
    disable_help_flag = true
)]
pub struct Cli {
    /// Keep completing the same list after an argument leaf
    #[arg(short = 'a')]
    pub keep_args: bool,

    /// Match and show item descriptions instead of item text
    #[arg(short = 'd')]
    pub descriptions: bool,

    /// Complete file names when no item matches
    #[arg(short = 'f')]
    pub files: bool,

    /// Read and append input history to FILE
    #[arg(short = 'h', value_name = "FILE")]
    pub history: Option<PathBuf>,

    /// Match case-insensitively
    #[arg(short = 'i')]
    pub ignore_case: bool,

    /// Hide the typed text and keep it out of history
    #[arg(short = 'p')]
    pub password: bool,

    /// Exit after the first enter or escape
    #[arg(short = 's')]
    pub single_shot: bool,

    /// Load configuration from FILE
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write logs to FILE instead of stderr
    #[arg(long = "log", value_name = "FILE")]
    pub log: Option<PathBuf>,

    /// Increase logging verbosity (repeat for more detail)
    #[arg(short = 'v', action = ArgAction::Count)]
    pub verbose: u8,

    /// Print help
    #[arg(long = "help", action = ArgAction::Help)]
    pub help: Option<bool>,

    /// Text shown before the input field
    pub prompt: Option<String>,
}
