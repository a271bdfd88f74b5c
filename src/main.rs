use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use ratatui::DefaultTerminal;
use ratatui::crossterm::event::{self, Event};

use ghostwrite::app::App;
use ghostwrite::completion::spawn_worker;
use ghostwrite::config::{self, ConfigResult};
use ghostwrite::editor::TextAreaHost;
use ghostwrite::render;

/// How long to wait for input before advancing timers
const FRAME_INTERVAL: Duration = Duration::from_millis(50);

/// Terminal text editor with inline AI suggestions
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File to open
    file: Option<PathBuf>,

    /// Config file (default: ~/.config/ghostwrite/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Completion endpoint URL
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Only use the static suggestion table
    #[arg(long)]
    no_remote: bool,

    /// Typing pause before a suggestion is requested
    #[arg(long, value_name = "MS")]
    quiet_interval_ms: Option<u64>,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Print the resolved configuration as TOML and exit
    #[arg(long)]
    print_config: bool,

    /// Print the document to stdout on exit
    #[arg(long)]
    print_on_exit: bool,
}

fn main() -> Result<()> {
    // Install color-eyre panic hook for better error messages
    color_eyre::install()?;

    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let ConfigResult {
        mut config,
        warning,
    } = match &args.config {
        Some(path) => config::load_config_from_path(path),
        None => config::load_config(),
    };

    if let Some(url) = &args.api_url {
        config.completion.api_url = url.clone();
    }
    if args.no_remote {
        config.completion.enabled = false;
    }
    if let Some(ms) = args.quiet_interval_ms {
        config.completion.quiet_interval_ms = ms;
    }

    if args.print_config {
        print!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    let text = match &args.file {
        Some(path) => read_document(path)?,
        None => String::new(),
    };

    let mut app = App::new(&config, TextAreaHost::from_text(&text));
    app.file = args.file.clone();
    if let Some(warning) = warning {
        app.status = warning;
    }
    if config.completion.enabled {
        let (request_tx, response_rx) = spawn_worker(&config.completion);
        app.engine.set_channels(request_tx, response_rx);
    }

    log::info!(
        "Starting editor (remote completion {})",
        if config.completion.enabled { "on" } else { "off" }
    );

    // Initialize terminal (handles raw mode, alternate screen, etc.)
    let terminal = ratatui::init();
    let result = run(terminal, &mut app);
    ratatui::restore();

    app.shutdown();

    if args.print_on_exit {
        println!("{}", app.host.text());
    }

    result
}

fn run(mut terminal: DefaultTerminal, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| render::render(app, frame))?;

        if event::poll(FRAME_INTERVAL)?
            && let Event::Key(key) = event::read()?
        {
            app.handle_key(key);
        }

        app.tick();

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}

fn read_document(path: &Path) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(e).wrap_err_with(|| format!("Failed to read {}", path.display())),
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .wrap_err_with(|| format!("Failed to create log file {}", path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();

    Ok(())
}
