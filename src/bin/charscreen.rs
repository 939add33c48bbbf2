//! Charscreen Runner
//!
//! Composes a screen from windows given on the command line and prints it
//! once, as text or as a JSON snapshot.
//!
//! # Usage
//!
//! ```bash
//! # Size from ROWS/COLUMNS, one window with two lines of text
//! ROWS=$LINES COLUMNS=$COLUMNS charscreen -w '2,3,20,4:hello\nworld'
//!
//! # Explicit size, JSON output, no status bar
//! charscreen --cols 40 --rows 10 --json --no-status-bar -w 1,1,5,2
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use charscreen::app::{Config, TerminalSize};
use charscreen::clients::StatusBar;
use charscreen::core::{ClientHandle, Screen};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "charscreen")]
#[command(version)]
#[command(about = "Compose character windows onto a terminal-sized screen", long_about = None)]
struct Args {
    /// Configuration file (defaults to ~/.config/charscreen/config.json)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Screen width; read from COLUMNS when omitted
    #[arg(long, value_name = "COLS", requires = "rows")]
    cols: Option<usize>,

    /// Screen height; read from ROWS (minus one) when omitted
    #[arg(long, value_name = "ROWS", requires = "cols")]
    rows: Option<usize>,

    /// Window as X,Y,WIDTH,HEIGHT[:TEXT]; later windows are drawn on top
    #[arg(short, long = "window", value_name = "SPEC", value_parser = parse_window)]
    windows: Vec<WindowSpec>,

    /// Start with a few overlapping sample windows
    #[arg(long)]
    demo: bool,

    /// Don't attach the status bar
    #[arg(long)]
    no_status_bar: bool,

    /// Print a JSON snapshot instead of text
    #[arg(short, long)]
    json: bool,
}

/// A window requested on the command line
#[derive(Debug, Clone)]
struct WindowSpec {
    x: i32,
    y: i32,
    width: usize,
    height: usize,
    text: String,
}

fn parse_window(spec: &str) -> Result<WindowSpec, String> {
    let (geometry, text) = spec.split_once(':').unwrap_or((spec, ""));
    let parts: Vec<&str> = geometry.split(',').map(str::trim).collect();
    let [x, y, width, height] = parts.as_slice() else {
        return Err(format!("expected X,Y,WIDTH,HEIGHT, got {:?}", geometry));
    };
    let number = |what: &str, value: &str| format!("invalid {}: {:?}", what, value);
    Ok(WindowSpec {
        x: x.parse().map_err(|_| number("x", x))?,
        y: y.parse().map_err(|_| number("y", y))?,
        width: width.parse().map_err(|_| number("width", width))?,
        height: height.parse().map_err(|_| number("height", height))?,
        text: text.replace("\\n", "\n"),
    })
}

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Fatal error: {}", e);
            ExitCode::FAILURE
        },
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(),
    };
    if args.no_status_bar {
        config.status_bar = false;
    }

    let size = match (args.cols, args.rows) {
        (Some(cols), Some(rows)) => TerminalSize { cols, rows },
        _ => TerminalSize::from_env_or(config.screen.fallback_size())?,
    };
    info!("Screen size {}x{}", size.cols, size.rows);

    let mut windows = if args.demo { demo_windows() } else { Vec::new() };
    windows.extend(args.windows.iter().cloned());

    let screen = compose(&config, size, &windows)?;

    if args.json {
        println!("{}", screen.snapshot().to_json()?);
    } else {
        println!("{}", screen.render());
    }
    Ok(())
}

/// Sample windows stacked so each one partly covers the previous
fn demo_windows() -> Vec<WindowSpec> {
    [
        (2, 3, 24, 6, "first window\nbottom of the stack"),
        (14, 5, 24, 6, "second window\ncovers the first"),
        (26, 7, 24, 6, "third window\non top"),
    ]
    .into_iter()
    .map(|(x, y, width, height, text)| WindowSpec {
        x,
        y,
        width,
        height,
        text: text.to_string(),
    })
    .collect()
}

/// Build a refreshed screen holding `windows` and, if configured, a status bar
fn compose(
    config: &Config,
    size: TerminalSize,
    windows: &[WindowSpec],
) -> Result<Screen, Box<dyn std::error::Error>> {
    let mut screen = config.screen.build(size.cols, size.rows)?;

    for window in windows {
        let client = ClientHandle::plain(window.width, window.height)?;
        {
            let mut surface = client.surface_mut();
            surface.set_background(config.client_background);
            surface.fill();
            surface.set_position(window.x, window.y);
            surface.set_contents(&window.text);
        }
        screen.attach(&client)?;
    }

    if config.status_bar {
        attach_status_bar(&mut screen, config.status_bar_height)?;
    }

    screen.refresh();
    Ok(screen)
}

fn attach_status_bar(screen: &mut Screen, height: usize) -> charscreen::core::Result<()> {
    let bar = StatusBar::with_height(height).client()?;
    screen.attach(&bar)
}
