use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use scorewatch::provider::ScoreProvider;
use scorewatch::store::SelectionStore;
use scorewatch::{commands, config, espn, shared_handle, tui};
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Log level used when neither the CLI nor the config file sets one.
const DEFAULT_LOG_LEVEL: &str = "info";

/// Sink path that leaves file logging off.
const DEFAULT_LOG_FILE: &str = "/dev/null";

#[derive(Parser)]
#[command(name = "scorewatch")]
#[command(
    about = "Live sports scores dashboard for the terminal",
    long_about = "Live sports scores dashboard for the terminal\n\nWithout a command, starts the interactive dashboard."
)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'L', long, global = true, default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,

    /// Log file path; logging stays off while this points at /dev/null
    #[arg(short = 'F', long, global = true, default_value = DEFAULT_LOG_FILE)]
    log_file: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List live games and games starting within the next hour
    Games {
        /// Look up a single game by its id
        #[arg(short, long)]
        id: Option<String>,
    },
    /// Show the resolved configuration and where it came from
    Config,
}

/// CLI flags win over the config file whenever they differ from the
/// built-in defaults.
fn resolve_log_config<'a>(cli: &'a Cli, config: &'a config::Config) -> (&'a str, &'a str) {
    let level = if cli.log_level == DEFAULT_LOG_LEVEL {
        config.log_level.as_str()
    } else {
        cli.log_level.as_str()
    };
    let file = if cli.log_file == DEFAULT_LOG_FILE {
        config.log_file.as_str()
    } else {
        cli.log_file.as_str()
    };
    (level, file)
}

/// Route tracing output to the configured file. There is no console
/// fallback: writing to stdout would corrupt the TUI.
fn init_logging(log_level: &str, log_file: &str) -> Result<()> {
    let level = log_level.parse::<Level>().unwrap_or(Level::INFO);
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("Failed to open log file {}", log_file))?;
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install tracing subscriber")
}

/// `scorewatch config` - print the resolved configuration in config-file
/// syntax, so the output doubles as a starting point for edits.
fn print_config(cfg: &config::Config) {
    match config::get_config_path() {
        Some(path) if path.exists() => println!("# {}", path.display()),
        Some(path) => println!("# {} (not present, showing defaults)", path.display()),
        None => println!("# no config directory available, showing defaults"),
    }
    println!();
    println!("log_level = {:?}", cfg.log_level);
    println!("log_file = {:?}", cfg.log_file);
    println!("refresh_interval = {} # seconds", cfg.refresh_interval);
    println!("time_format = {:?}", cfg.time_format);
    println!("use_unicode = {}", cfg.use_unicode);
    println!();
    println!("[theme]");
    println!("selection_fg = {:?}", cfg.theme.selection_fg);
    println!("live_fg = {:?}", cfg.theme.live_fg);
    println!("error_fg = {:?}", cfg.theme.error_fg);
    match cfg.theme.disabled_fg {
        Some(color) => println!("disabled_fg = {:?}", color),
        None => println!("disabled_fg = {:?} # auto, 50% darker", cfg.theme.disabled_fg()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::read();
    let cli = Cli::parse();

    let (log_level, log_file) = resolve_log_config(&cli, &config);
    if log_file != DEFAULT_LOG_FILE {
        if let Err(e) = init_logging(log_level, log_file) {
            eprintln!("Warning: {:#}", e);
        }
    }

    match cli.command {
        None => {
            let shared = shared_handle(SelectionStore::open());
            let provider: Arc<dyn ScoreProvider> = Arc::new(espn::Client::new()?);
            tui::run(shared, provider, config).await?;
        }
        Some(Commands::Config) => print_config(&config),
        Some(Commands::Games { id }) => {
            let client = espn::Client::new()?;
            commands::games::run(&client, id, &config.display()).await?;
        }
    }
    Ok(())
}
