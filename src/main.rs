use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

use envwatch::config::{Overrides, Settings};
use envwatch::{
    events, ui, App, Dashboard, FeedPoller, JsonRenderer, PollerHandle, Renderer, TextRenderer,
};
use envwatch_adapters::thingspeak::ThingSpeakAdapter;
use envwatch_types::RiskEngine;

#[derive(Parser, Debug)]
#[command(name = "envwatch")]
#[command(about = "Environmental sensor dashboard with hazard risk assessment")]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// ThingSpeak channel id
    #[arg(long)]
    channel: Option<u64>,

    /// Read API key for the channel
    #[arg(long)]
    api_key: Option<String>,

    /// Poll interval in seconds
    #[arg(short, long)]
    interval: Option<u64>,

    /// API endpoint (e.g. "https://api.thingspeak.com")
    #[arg(long)]
    endpoint: Option<String>,

    /// Write logs to this file while the dashboard runs
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Fetch one record, print it and exit
    #[arg(long)]
    once: bool,

    /// Print the one-shot report as JSON
    #[arg(long, requires = "once")]
    json: bool,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            channel_id: self.channel,
            read_api_key: self.api_key.clone(),
            endpoint: self.endpoint.clone(),
            interval_secs: self.interval,
            log_file: self.log_file.clone(),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let settings = Settings::load(args.config.as_deref(), &args.overrides())?;

    // Non-interactive mode logs to stderr; the dashboard owns the terminal
    if args.once {
        init_tracing(LogTarget::Stderr)?;
        return run_once(&settings, args.json);
    }

    match settings.log_file {
        Some(ref path) => init_tracing(LogTarget::File(path))?,
        None => init_tracing(LogTarget::Discard)?,
    }
    run_tui(&settings)
}

enum LogTarget<'a> {
    Stderr,
    File(&'a Path),
    Discard,
}

fn init_tracing(target: LogTarget<'_>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("envwatch=info,envwatch_adapters=info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match target {
        LogTarget::Stderr => builder.with_writer(io::stderr).init(),
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init()
        }
        LogTarget::Discard => builder.with_writer(io::sink).init(),
    }
    Ok(())
}

fn build_adapter(settings: &Settings) -> Result<ThingSpeakAdapter> {
    let adapter = ThingSpeakAdapter::builder()
        .endpoint(&settings.feed.endpoint)
        .channel_id(settings.feed.channel_id)
        .read_api_key(&settings.feed.read_api_key)
        .timeout(settings.fetch_timeout())
        .build()?;
    Ok(adapter)
}

/// Fetch a single record and print it
fn run_once(settings: &Settings, json: bool) -> Result<()> {
    let adapter = build_adapter(settings)?;
    let rt = tokio::runtime::Runtime::new()?;

    info!(channel = adapter.channel_id(), "Fetching latest record");
    let entry = rt
        .block_on(adapter.fetch_latest())
        .context("Failed to fetch feed")?
        .with_context(|| format!("Channel {} has no records", adapter.channel_id()))?;

    let dashboard = Dashboard::from_entry(&entry, &settings.field_maps(), &RiskEngine::default());

    let stdout = io::stdout().lock();
    let mut renderer: Box<dyn Renderer> = if json {
        Box::new(JsonRenderer::new(stdout))
    } else {
        Box::new(TextRenderer::new(stdout))
    };
    renderer.display(
        &dashboard.metrics,
        &dashboard.risks,
        dashboard.updated.as_deref(),
    )
}

/// Run the TUI against a background poller
fn run_tui(settings: &Settings) -> Result<()> {
    let adapter = build_adapter(settings)?;
    let description = format!("thingspeak:{}", adapter.channel_id());

    let rt = tokio::runtime::Runtime::new()?;
    let (source, poller) = {
        let _guard = rt.enter();
        FeedPoller::spawn(adapter, settings.poll_interval(), &description)
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    let mut app = App::new(Box::new(source), settings.field_maps(), RiskEngine::default());

    let result = run_app(&mut terminal, &mut app, &poller);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    poller.abort();
    rt.shutdown_background();
    info!("Dashboard closed");

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    poller: &PollerHandle,
) -> Result<()> {
    while app.running {
        app.reload_data()?;

        terminal.draw(|frame| ui::draw(frame, app))?;

        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    events::handle_key_event(app, key)
                }
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse),
                _ => {}
            }
        }

        if app.take_refresh_request() {
            poller.request_refresh();
        }
    }

    Ok(())
}
