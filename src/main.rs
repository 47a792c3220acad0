// Entry point: read the item tree from stdin, run the prompt on the terminal, print the
// chosen line to stdout.

use std::io::{self, Write};
use std::process;

use clap::Parser;
use tprompt::cli::Cli;
use tprompt::config::{Config, Session};
use tprompt::error::StartupError;
use tprompt::history::HistoryLog;
use tprompt::item::read_items;
use tprompt::keymap::Keymap;
use tprompt::logging;
use tprompt::ui::render::styles::Palette;
use tprompt::ui::{initial_model, run};

fn main() {
    let cli = Cli::parse();
    if let Err(e) = try_main(&cli) {
        eprintln!("tprompt: {e}");
        process::exit(1);
    }
}

fn try_main(cli: &Cli) -> Result<(), StartupError> {
    logging::init(cli.verbose, cli.log.as_deref())?;

    let cfg = Config::resolve(cli)?;
    let palette = Palette::from_colors(&cfg.colors)?;
    let session = Session::new(&cfg, cli);
    let keymap = Keymap::from_table(&cfg.ctrl_keys);

    let tree = read_items(io::stdin().lock())?;
    tracing::debug!(items = tree.len(), "read completion items");

    let history = match &cfg.history_file {
        Some(path) => HistoryLog::load(path, cfg.history_size).unwrap_or_else(|err| {
            tracing::warn!(path = %path.display(), %err, "history disabled");
            HistoryLog::default()
        }),
        None => HistoryLog::default(),
    };
    let password = session.password;

    let mut model = initial_model(session, tree, history.clone());
    model.palette = palette;
    let Some(line) = run(model, &keymap)? else {
        return Ok(());
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{line}")?;
    stdout.flush()?;

    if !password {
        if let Err(err) = history.save(&line) {
            tracing::warn!(%err, "cannot write history");
        }
    }
    Ok(())
}
