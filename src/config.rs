// Tunables, layered: built-in defaults, then the JSON config file, then TPROMPT_* environment
// variables, then the command line. `Session` holds the per-run flags the core reads.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::buffer::Delimiters;
use crate::cli::Cli;
use crate::error::StartupError;
use crate::matcher::CaseMode;

pub const DEFAULT_WORD_DELIMITERS: &str = " .,/:;\\<>'[]{}()&$?!";
pub const DEFAULT_CTRL_KEYS: &str = "vcmpn::::aebf::ukhdwAEBF::zZ:";
pub const DEFAULT_NUMBER_ITEMS: usize = 8;
pub const DEFAULT_HISTORY_SIZE: usize = 15;

pub const ENV_HISTFILE: &str = "TPROMPT_HISTFILE";
pub const ENV_HISTSIZE: &str = "TPROMPT_HISTSIZE";
pub const ENV_CTRL: &str = "TPROMPT_CTRL";
pub const ENV_WORDDELIMITERS: &str = "TPROMPT_WORDDELIMITERS";

/// `#RRGGBB` strings; parsed when the palette is built.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Colors {
    pub background: String,
    pub foreground: String,
    pub description: String,
    pub hover_background: String,
    pub hover_foreground: String,
    pub hover_description: String,
    pub sel_background: String,
    pub sel_foreground: String,
    pub sel_description: String,
    pub separator: String,
}

impl Default for Colors {
    fn default() -> Self {
        Colors {
            background: "#000000".into(),
            foreground: "#FFFFFF".into(),
            description: "#555753".into(),
            hover_background: "#121212".into(),
            hover_foreground: "#FFFFFF".into(),
            hover_description: "#555753".into(),
            sel_background: "#3465A4".into(),
            sel_foreground: "#FFFFFF".into(),
            sel_description: "#C5C8C6".into(),
            separator: "#555753".into(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub word_delimiters: String,
    pub ctrl_keys: String,
    pub colors: Colors,
    pub number_items: usize,
    pub history_file: Option<PathBuf>,
    pub history_size: usize,
    pub indent: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            word_delimiters: DEFAULT_WORD_DELIMITERS.to_string(),
            ctrl_keys: DEFAULT_CTRL_KEYS.to_string(),
            colors: Colors::default(),
            number_items: DEFAULT_NUMBER_ITEMS,
            history_file: None,
            history_size: DEFAULT_HISTORY_SIZE,
            indent: false,
        }
    }
}

impl Config {
    /// `$XDG_CONFIG_HOME/tprompt/config.json` or the platform equivalent.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("tprompt").join("config.json"))
    }

    /// Load the config file. An explicit path has to exist; the default location is
    /// only read when present.
    pub fn load(explicit: Option<&Path>) -> Result<Config, StartupError> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Some(p) if p.is_file() => p,
                _ => return Ok(Config::default()),
            },
        };
        let raw = fs::read_to_string(&path)?;
        let cfg = Self::from_json(&path, &raw)?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(cfg)
    }

    pub fn from_json(path: &Path, raw: &str) -> Result<Config, StartupError> {
        serde_json::from_str(raw).map_err(|source| StartupError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Overlay environment variables looked up through `var`.
    pub fn apply_env<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(file) = var(ENV_HISTFILE).filter(|s| !s.is_empty()) {
            self.history_file = Some(PathBuf::from(file));
        }
        if let Some(size) = var(ENV_HISTSIZE) {
            match size.trim().parse::<usize>() {
                Ok(n) => self.history_size = n,
                Err(_) => tracing::warn!(value = %size, "ignoring invalid {ENV_HISTSIZE}"),
            }
        }
        if let Some(keys) = var(ENV_CTRL) {
            self.ctrl_keys = keys;
        }
        if let Some(delims) = var(ENV_WORDDELIMITERS) {
            self.word_delimiters = delims;
        }
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(file) = &cli.history {
            self.history_file = Some(file.clone());
        }
    }

    /// Defaults, file, environment and command line, in that order.
    pub fn resolve(cli: &Cli) -> Result<Config, StartupError> {
        let mut cfg = Self::load(cli.config.as_deref())?;
        cfg.apply_env(|name| std::env::var(name).ok());
        cfg.apply_cli(cli);
        Ok(cfg)
    }
}

/// Flags fixed for the lifetime of one prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub delimiters: Delimiters,
    pub case: CaseMode,
    pub descriptions: bool,
    pub keep_args: bool,
    pub file_completion: bool,
    pub password: bool,
    pub single_shot: bool,
    /// Rows in the dropdown window.
    pub number_items: usize,
    pub indent: bool,
    pub prompt: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Session {
            delimiters: Delimiters::default(),
            case: CaseMode::Sensitive,
            descriptions: false,
            keep_args: false,
            file_completion: false,
            password: false,
            single_shot: false,
            number_items: DEFAULT_NUMBER_ITEMS,
            indent: false,
            prompt: None,
        }
    }
}

impl Session {
    pub fn new(cfg: &Config, cli: &Cli) -> Self {
        Session {
            delimiters: Delimiters::new(&cfg.word_delimiters),
            case: if cli.ignore_case {
                CaseMode::Insensitive
            } else {
                CaseMode::Sensitive
            },
            descriptions: cli.descriptions,
            keep_args: cli.keep_args,
            file_completion: cli.files,
            password: cli.password,
            single_shot: cli.single_shot,
            number_items: cfg.number_items.max(1),
            indent: cfg.indent,
            prompt: cli.prompt.clone(),
        }
    }
}
