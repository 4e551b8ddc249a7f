// crates/flow-terminal/src/main.rs

mod app;
mod components;
mod network;
mod types;
mod ui;

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use std::{io, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use flow_core::{admits, format_contract, format_premium, Action, DashboardState, OptionsFlow};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::network::FeedBridge;
use crate::types::{ClientConfig, ViewSetting};

const DEFAULT_LOG_FILE: &str = "options-flow.log";

#[derive(Parser)]
#[clap(name = "options-flow")]
#[clap(about = "Live and historical options flow in the terminal")]
struct Cli {
    /// TOML config file
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Paged query endpoint (overrides config and FLOW_QUERY_URL)
    #[clap(long)]
    query_url: Option<String>,

    /// Live stream endpoint (overrides config and FLOW_STREAM_URL)
    #[clap(long)]
    stream_url: Option<String>,

    /// Initial column set
    #[clap(long, value_enum)]
    view: Option<ViewSetting>,

    /// Start with the live stream paused
    #[clap(long)]
    paused: bool,

    /// Run without a terminal UI, logging the flow to stderr
    #[clap(long)]
    headless: bool,

    /// Headless run time in seconds (0 = until Ctrl-C)
    #[clap(long, default_value_t = 0)]
    duration: u64,

    /// Write logs to this file in UI mode
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// Enable debug logging
    #[clap(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli)?;
    let config = resolve_config(&cli)?;

    let mut state = DashboardState::new();
    state.view_mode = config.view.into();
    state.live = config.start_live;

    if cli.headless {
        return run_headless(&config, state, cli.duration).await;
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = match FeedBridge::new(&config.feed) {
        Ok(bridge) => run_app(&mut terminal, App::new(state), bridge).await,
        Err(err) => Err(err.into()),
    };

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

/// Defaults, then the config file, then `FLOW_*` variables, then flags.
fn resolve_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = match &cli.config {
        Some(path) => ClientConfig::load(path)?,
        None => ClientConfig::default(),
    };
    config.feed = config.feed.with_env()?;

    if let Some(url) = &cli.query_url {
        config.feed.query_url = url.clone();
    }
    if let Some(url) = &cli.stream_url {
        config.feed.stream_url = url.clone();
    }
    if let Some(view) = cli.view {
        config.view = view;
    }
    if cli.paused {
        config.start_live = false;
    }
    Ok(config)
}

/// Headless logs go to stderr. In UI mode logging is off unless a log
/// file is given or `--debug` is set.
fn init_logging(cli: &Cli) -> Result<()> {
    let default_level = if cli.debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if cli.headless {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
        return Ok(());
    }

    let path = match (&cli.log_file, cli.debug) {
        (Some(path), _) => path.clone(),
        (None, true) => PathBuf::from(DEFAULT_LOG_FILE),
        (None, false) => return Ok(()),
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    mut bridge: FeedBridge,
) -> Result<()> {
    bridge.apply(app.state.initial_effects());

    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let effects = app.handle_key(key);
                    bridge.apply(effects);
                }
            }
        }

        while let Some(action) = bridge.try_next() {
            let effects = app.apply(action);
            bridge.apply(effects);
        }

        if app.should_quit {
            break;
        }
    }

    bridge.shutdown();
    Ok(())
}

async fn run_headless(config: &ClientConfig, mut state: DashboardState, duration_secs: u64) -> Result<()> {
    info!(
        query_url = %config.feed.query_url,
        stream_url = %config.feed.stream_url,
        live = state.live,
        duration_secs,
        "running headless"
    );

    let mut bridge = FeedBridge::new(&config.feed)?;
    bridge.apply(state.initial_effects());

    let deadline = async {
        if duration_secs == 0 {
            std::future::pending::<()>().await
        } else {
            tokio::time::sleep(Duration::from_secs(duration_secs)).await
        }
    };
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted");
                break;
            }
            _ = &mut deadline => {
                info!("duration elapsed");
                break;
            }
            action = bridge.next() => {
                let Some(action) = action else {
                    warn!("feed closed");
                    break;
                };
                log_action(&state, &action);
                let effects = state.update(action);
                bridge.apply(effects);
            }
        }
    }

    bridge.shutdown();
    info!(records = state.records.len(), total_rows = state.total_rows, "headless run finished");
    Ok(())
}

/// Log what an action is about to put on screen.
fn log_action(state: &DashboardState, action: &Action) {
    match action {
        Action::PageLoaded { seq, page, rows } if *seq == state.latest_seq() => {
            info!(page, rows = rows.len(), "page loaded");
            rows.iter().for_each(log_record);
        }
        Action::PageFailed { seq, reason } if *seq == state.latest_seq() => {
            warn!(seq, %reason, "page failed");
        }
        Action::StreamRecord(record)
            if state.live && state.page == 0 && admits(record, &state.filters, &state.ticker_text) =>
        {
            log_record(record);
        }
        Action::StreamOpened => info!("stream connected"),
        Action::StreamClosed => warn!("stream disconnected"),
        _ => {}
    }
}

fn log_record(record: &OptionsFlow) {
    info!(
        time = %record.time,
        contract = %format_contract(record),
        premium = %format_premium(record.totalpremium),
        price = record.price,
        size = record.size,
        kind = %record.is_sweep,
        "flow"
    );
}
