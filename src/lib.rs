//! urlshort library crate
//!
//! This crate provides the core functionality for the `urlshort` CLI. It is
//! organized into small modules: `shorten` (client for the remote shortening
//! endpoint), `history` (JSON history file), `clipboard` (cross-platform
//! clipboard helper), `qr` (terminal QR codes), `config` (run configuration)
//! and `app` (the command sequence). The binary `src/main.rs` calls
//! `urlshort_lib::run()` to execute the CLI.
//!
//! Public API
//!
//! - `run()` — CLI entrypoint used by the binary.
//! - `app::execute()` — the same sequence with injectable shortener,
//!   clipboard and streams, used by tests.

pub mod app;
pub mod clipboard;
pub mod config;
pub mod history;
pub mod qr;
pub mod shorten;

use std::io;
use std::path::PathBuf;

use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use crate::clipboard::SystemClipboard;
use crate::config::Config;
use crate::history::DEFAULT_HISTORY_FILE;
use crate::shorten::{DEFAULT_ENDPOINT, HttpShortener};

/// Top-level CLI flags. Keep `main.rs` thin.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// URL to shorten (prompted for on stdin when omitted)
    #[arg(long = "url")]
    pub url: Option<String>,

    /// Show the conversion history and exit
    #[arg(long = "history", action = ArgAction::SetTrue)]
    pub history: bool,

    /// Print a QR code for the shortened URL
    #[arg(long = "qr", action = ArgAction::SetTrue)]
    pub qr: bool,

    /// Do not copy the result to the clipboard
    #[arg(long = "no-copy", action = ArgAction::SetTrue)]
    pub no_copy: bool,

    /// History file location
    #[arg(long = "history-file", env = "URLSHORT_HISTORY", default_value = DEFAULT_HISTORY_FILE)]
    pub history_file: PathBuf,

    /// Shortening endpoint; the URL is sent as the `url` query parameter
    #[arg(long = "endpoint", env = "URLSHORT_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Request timeout in seconds (at least 1)
    #[arg(
        long = "timeout",
        env = "URLSHORT_TIMEOUT",
        default_value_t = 10u64,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,

    /// More diagnostics on stderr (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise the level follows `verbose`.
pub fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Run the urlshort CLI.
///
/// Parses flags (`--help` and `--version` exit 0 inside clap), builds the
/// immutable `Config`, and runs the sequence against the real endpoint and
/// system clipboard. Exits the process with the resulting code: 0 on success
/// or after listing history, 1 when no URL was given or shortening failed.
///
/// ```no_run
/// urlshort_lib::run(); // called from src/main.rs
/// ```
pub fn run() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::from(cli);

    let shortener = HttpShortener::new(&config.endpoint, config.timeout).unwrap_or_else(|e| {
        eprintln!("error: {}", e);
        std::process::exit(1);
    });
    let mut clipboard = SystemClipboard;

    let stdin = io::stdin();
    let code = app::execute(
        &config,
        &shortener,
        &mut clipboard,
        &mut stdin.lock(),
        &mut io::stdout(),
        &mut io::stderr(),
    );
    std::process::exit(code);
}
