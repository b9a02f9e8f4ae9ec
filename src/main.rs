use anyhow::{Context, Result};
use clap::Parser;
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use tonearm::app::cli::{self, Args, Command};
use tonearm::app::events::AppEvent;
use tonearm::config::{AppConfig, ConfigStore, FileConfigStore, UserConfig};
use tonearm::library;
use tonearm::notifications::DEFAULT_LIFETIME;
use tonearm::player::NullOutput;
use tonearm::{Action, Store};

const TICK_RATE: Duration = Duration::from_millis(250);

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    human_panic::setup_panic!();
    let args = Args::parse();

    if args.generate_config {
        println!("{}", toml::to_string_pretty(&UserConfig::default())?);
        return Ok(());
    }

    let _log_guard = tonearm::logging::init(&AppConfig::get_log_dir())?;

    let config_path = args.config.unwrap_or_else(AppConfig::get_config_path);
    let config = FileConfigStore::load(&config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;

    let tracks = match args.library.or_else(|| config.get().library_file.clone()) {
        Some(path) => library::load_library(&path)?,
        None => Vec::new(),
    };

    let mut store = Store::with_entropy(NullOutput::default(), config);
    store.subscribe(|state| {
        debug!(
            status = ?state.status,
            queue = state.queue.len(),
            cursor = ?state.queue.cursor(),
            "state changed"
        );
    });
    store.dispatch(Action::RefreshLibrary { tracks })?;
    println!(
        "{} tracks loaded, config at {}. Type `help` for commands.",
        store.state().tracks.library.all.len(),
        store.config().path().display()
    );

    let (tx, mut rx) = mpsc::channel(100);

    // 1. Input Task
    let tx_input = tx.clone();
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if tx_input.send(AppEvent::Input(line)).await.is_err() {
                return;
            }
        }
        let _ = tx_input.send(AppEvent::Quit).await;
    });

    // 2. Tick Task (toast expiry)
    let tx_tick = tx.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(TICK_RATE);
        loop {
            interval.tick().await;
            if tx_tick.send(AppEvent::Tick).await.is_err() {
                break;
            }
        }
    });
    drop(tx);

    while let Some(event) = rx.recv().await {
        match event {
            AppEvent::Tick => store.tick(Instant::now())?,
            AppEvent::Quit => break,
            AppEvent::Input(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                match cli::parse_command(&line) {
                    Ok(Command::Quit) => break,
                    Ok(Command::Help) => println!("{}", cli::HELP),
                    Ok(Command::Show) => {
                        println!("{}", serde_json::to_string_pretty(&store.snapshot())?)
                    }
                    Ok(Command::Toast { kind, content }) => {
                        store.notify(kind, content, DEFAULT_LIFETIME)?;
                    }
                    Ok(Command::Enqueue { ids, next }) => {
                        let tracks = store.state().tracks.resolve(&ids);
                        if tracks.len() != ids.len() {
                            warn!(requested = ids.len(), found = tracks.len(), "unknown track ids");
                        }
                        let action = if next {
                            Action::QueueAddNext { tracks }
                        } else {
                            Action::QueueAdd { tracks }
                        };
                        store.dispatch(action)?;
                    }
                    Ok(Command::Dispatch(action)) => {
                        if let Err(e) = store.dispatch(action) {
                            eprintln!("{:#}", anyhow::Error::from(e));
                        }
                    }
                    Err(e) => eprintln!("{e}"),
                }
                print_status(&store);
            }
        }
    }

    Ok(())
}

fn print_status<C: ConfigStore>(store: &Store<NullOutput, C>) {
    let state = store.state();
    let current = state
        .queue
        .current()
        .map(|t| t.display_title())
        .unwrap_or_else(|| "-".to_string());
    println!(
        "[{:?}] {} ({}/{}) shuffle={} repeat={:?} toasts={}",
        state.status,
        current,
        state.queue.cursor().map_or(0, |c| c + 1),
        state.queue.len(),
        state.shuffle,
        state.repeat,
        state.notifications.len(),
    );
}
