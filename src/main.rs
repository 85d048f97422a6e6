//! logkit demo / operator CLI.
//!
//! Configures the process logger from flags or a TOML file and writes a
//! handful of records, optionally staying alive to follow config changes.
//!
//! ```text
//! logkit --file /tmp/app/app.log --level debug --stack --count 3
//! logkit --level warn --console
//! logkit --config logging.toml --watch --interval-secs 5
//! ```

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use logkit::config::{load_config, ConfigWatcher};
use logkit::field;

#[derive(Parser)]
#[command(name = "logkit")]
#[command(about = "Write structured log records to stdout and a rotated file", long_about = None)]
struct Cli {
    /// TOML logging configuration; overrides the file flags below.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log file path. Without it records only go to stdout.
    #[arg(short, long)]
    file: Option<String>,

    /// Minimum level: debug, info, warn or error (default: error with --file, info otherwise).
    #[arg(short, long, default_value = "")]
    level: String,

    /// Size in megabytes before the file is rolled.
    #[arg(long, default_value_t = 100, allow_negative_numbers = true)]
    max_size_mb: i64,

    /// Rolled files to keep.
    #[arg(long, default_value_t = 3, allow_negative_numbers = true)]
    max_backups: i64,

    /// Append the caller location to debug records.
    #[arg(long)]
    stack: bool,

    /// Write console text instead of JSON lines.
    #[arg(long)]
    console: bool,

    /// Number of records to write at each level.
    #[arg(short = 'n', long, default_value_t = 1)]
    count: usize,

    /// Message for the records.
    #[arg(short, long, default_value = "hello from logkit")]
    message: String,

    /// Keep running, reloading --config on change and writing a heartbeat.
    #[arg(short, long)]
    watch: bool,

    /// Seconds between heartbeats in --watch mode.
    #[arg(long, default_value_t = 5)]
    interval_secs: u64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logkit::observability::metrics::describe();

    if let Some(path) = &cli.config {
        let config = load_config(path)?;
        logkit::configure(config);
    } else if let Some(file) = &cli.file {
        logkit::init(file, &cli.level, cli.max_size_mb, cli.max_backups, cli.stack)?;
        if cli.console {
            logkit::configure(logkit::LoggerConfig {
                encode_json: false,
                ..logkit::LoggerConfig::clone(&logkit::logger::config())
            });
        }
    } else {
        logkit::set_level(if cli.level.is_empty() { "info" } else { cli.level.as_str() })?;
        logkit::configure(logkit::LoggerConfig {
            encode_json: !cli.console,
            stack_on_debug: cli.stack,
            ..logkit::LoggerConfig::default()
        });
    }

    let started = Instant::now();
    for i in 0..cli.count {
        let seq = field::int64("seq", i as i64);
        logkit::debug(&cli.message, &[seq.clone()]);
        logkit::info(&cli.message, &[seq.clone()]);
        logkit::warn(&cli.message, &[seq.clone()]);
        logkit::error(&cli.message, &[seq]);
    }
    logkit::infof!("wrote {} records per level", cli.count);
    tracing::info!(elapsed_ms = started.elapsed().as_millis() as u64, "tracing events are redirected");

    if cli.watch {
        let _watcher = match &cli.config {
            Some(path) => Some(ConfigWatcher::new(path).run()?),
            None => None,
        };
        let interval = Duration::from_secs(cli.interval_secs.max(1));
        loop {
            std::thread::sleep(interval);
            logkit::info(
                "heartbeat",
                &[field::duration("uptime", started.elapsed())],
            );
        }
    }

    logkit::sync();
    Ok(())
}
