//! Shopping list TUI
//!
//! Keys: type to edit the draft, Enter = add, Tab = switch focus,
//! j/k = move, d = delete, Esc = quit

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use ratatui::Terminal;
use shopping_list::{logging, terminal, App, Config, ConfigError};
use shopping_list_core::{
    process_raw_event, reducer, replay_reader, seed_list, spawn_event_poller, DispatchError,
    EventKind, IdGenerator, LoggingMiddleware, RawEvent, ReplayError, ShoppingAction,
    ShoppingController, ShoppingList, Store, UuidGenerator,
};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Shopping list - add and remove items from a terminal
#[derive(Parser, Debug)]
#[command(name = "shopping-list", version)]
#[command(about = "A shopping list TUI built on a unidirectional store")]
struct Cli {
    /// Config file (defaults to the platform config dir)
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Start from an empty list instead of the seed item
    #[arg(long, global = true)]
    seed_empty: bool,

    #[command(subcommand)]
    command: Option<Cmd>,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Apply intents from a JSON Lines file and print the resulting list
    Replay {
        /// Intent file, or `-` for stdin
        file: PathBuf,
    },
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Replay failed: {0}")]
    Replay(#[from] ReplayError),

    #[error("Failed to encode list: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config = Config::load(cli.config.as_deref())?;
    logging::init_tracing(config.log_filter.as_deref());

    let initial = if cli.seed_empty {
        ShoppingList::new()
    } else {
        seed_list()
    };

    match cli.command {
        Some(Cmd::Replay { file }) => replay_file(initial, &file),
        None => run_tui(initial, config).await,
    }
}

fn replay_file(initial: ShoppingList, file: &Path) -> Result<(), AppError> {
    let report = if file.as_os_str() == "-" {
        replay_reader(initial, io::stdin().lock())?
    } else {
        replay_reader(initial, BufReader::new(File::open(file)?))?
    };

    println!("{}", serde_json::to_string_pretty(&report.items)?);
    Ok(())
}

async fn run_tui(initial: ShoppingList, config: Config) -> Result<(), AppError> {
    let mut tui = terminal::init()?;
    let result = run_app(&mut tui, initial, config).await;
    terminal::restore(&mut tui)?;
    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    initial: ShoppingList,
    config: Config,
) -> Result<(), AppError> {
    // Intents from the controller; this loop is the only writer
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<ShoppingAction>();
    let mut store = Store::with_middleware(initial, reducer, LoggingMiddleware::new());

    let controller = ShoppingController::new(&store, action_tx, UuidGenerator);
    let mut app = App::new(controller, config.keybindings, config.placeholder);

    // Event poller
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<RawEvent>();
    let cancel_token = CancellationToken::new();
    let _handle = spawn_event_poller(
        event_tx,
        Duration::from_millis(10),
        Duration::from_millis(16),
        cancel_token.clone(),
    );

    info!(items = store.state().len(), "Shopping list started");
    let mut should_render = true;

    let result = loop {
        if should_render {
            if let Err(e) = terminal.draw(|frame| app.render(frame)) {
                break Err(e.into());
            }
            should_render = false;
        }

        tokio::select! {
            Some(raw_event) = event_rx.recv() => {
                let event = process_raw_event(raw_event);
                if matches!(event, EventKind::Resize(..)) {
                    should_render = true;
                }
                match apply_event(&mut app, &event) {
                    Ok(redraw) => should_render |= redraw,
                    Err(e) => break Err(e.into()),
                }
                if app.should_quit() {
                    break Ok(());
                }
            }

            Some(action) = action_rx.recv() => {
                store.dispatch(action);
                should_render |= app.sync();
            }

            else => break Ok(()),
        }
    };

    cancel_token.cancel();
    info!(items = store.state().len(), "Shopping list closed");
    result
}

/// Run every UI action an event produces; `true` if any needs a redraw
fn apply_event<G: IdGenerator>(
    app: &mut App<G>,
    event: &EventKind,
) -> Result<bool, DispatchError> {
    let mut redraw = false;
    for action in app.handle_event(event) {
        redraw |= app.update(action)?;
    }
    Ok(redraw)
}
