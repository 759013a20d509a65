// src/main.rs
mod app;
mod config;
mod error;
mod input;
mod models;
mod network;
mod pagination;
mod selection;
mod theme;
mod ui;
mod utils;

use std::{fs, io, sync::Mutex, time::Duration};

use anyhow::Context;
use arboard::Clipboard;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tokio::runtime::Runtime;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::config::{Settings, get_user_config_path, seed_user_config};
use crate::input::{Command, handle_key};
use crate::models::FetchEvent;
use crate::network::{ArtworksClient, spawn_fetch};
use crate::pagination::{FetchRequest, parse_page_size};
use crate::theme::Theme;

#[derive(Parser, Debug)]
#[command(
    name = "artic-table",
    version,
    about = "Browse the Art Institute of Chicago artworks as a selectable table"
)]
struct Cli {
    /// Rows per page (overrides config)
    #[arg(long, value_parser = parse_page_size_arg)]
    page_size: Option<usize>,

    /// Base URL of the API, e.g. https://api.artic.edu/api/v1
    #[arg(long)]
    api_url: Option<String>,

    /// Do not select leading rows when the page size is changed
    #[arg(long)]
    no_preselect: bool,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<String>,
}

impl Cli {
    fn apply(self, settings: &mut Settings) {
        if let Some(n) = self.page_size {
            settings.page_size = n;
        }
        if let Some(url) = self.api_url {
            settings.api_base_url = url;
        }
        if self.no_preselect {
            settings.preselect_on_resize = false;
        }
        if let Some(path) = self.log_file {
            settings.log_file = Some(path);
        }
    }
}

fn parse_page_size_arg(value: &str) -> Result<usize, String> {
    parse_page_size(value).map_err(|e| e.to_string())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut settings = Settings::new().context("failed to load configuration")?;
    cli.apply(&mut settings);
    init_logging(&settings)?;
    info!(api = %settings.api_base_url, page_size = settings.page_size, "starting");

    // Seed the user config with the defaults on first run.
    if let Some(path) = get_user_config_path() {
        match seed_user_config(&path) {
            Ok(true) => info!(path = %path.display(), "created user config"),
            Ok(false) => {}
            Err(e) => warn!(path = %path.display(), error = %e, "could not create user config"),
        }
    }

    let rt = Runtime::new()?;
    let client = ArtworksClient::new(
        &settings.api_base_url,
        Duration::from_secs(settings.request_timeout_secs),
    )?;
    let (tx, rx) = mpsc::unbounded_channel();
    let mut app = App::new(settings.page_size, settings.preselect_on_resize);

    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app, &rt, &client, tx, rx);

    terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    info!(selected = app.selection.len(), "exiting");
    result
}

fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rt: &Runtime,
    client: &ArtworksClient,
    tx: UnboundedSender<FetchEvent>,
    mut rx: UnboundedReceiver<FetchEvent>,
) -> anyhow::Result<()> {
    let theme = Theme::default();
    let initial = app.initial_request();
    start_fetch(app, rt, client, &tx, initial);

    loop {
        while let Ok(event) = rx.try_recv() {
            app.apply(event);
        }

        terminal.draw(|f| ui::render(f, app, &theme))?;

        if event::poll(Duration::from_millis(200))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match handle_key(key, app) {
                    Command::None => {}
                    Command::Fetch(request) => start_fetch(app, rt, client, &tx, request),
                    Command::Copy(text) => copy_to_clipboard(&text),
                    Command::Quit => break,
                }
            }
        }
    }
    Ok(())
}

fn start_fetch(
    app: &mut App,
    rt: &Runtime,
    client: &ArtworksClient,
    tx: &UnboundedSender<FetchEvent>,
    request: FetchRequest,
) {
    app.mark_requested(request);
    spawn_fetch(rt.handle(), client.clone(), request, tx.clone());
}

fn copy_to_clipboard(text: &str) {
    match Clipboard::new().and_then(|mut cb| cb.set_text(text.to_string())) {
        Ok(()) => info!(bytes = text.len(), "copied selection to clipboard"),
        Err(e) => warn!(error = %e, "clipboard unavailable"),
    }
}

/// The terminal belongs to the table, so logs go to a file or nowhere.
fn init_logging(settings: &Settings) -> anyhow::Result<()> {
    let Some(path) = settings.expanded_log_file() else {
        return Ok(());
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("could not create log directory {}", parent.display()))?;
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("could not open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
