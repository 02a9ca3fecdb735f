use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use pr_stats_card::config::Config;
use pr_stats_card::github::{self, DataSource, PrCache};
use pr_stats_card::output::{format_json, format_stats_summary, should_use_colors, write_output};
use pr_stats_card::render::render_error_card;
use pr_stats_card::{CardParams, RawParams};

// Card failures exit with CardError::exit_code (1 not found, 2 upstream, 3 bad record)
const EXIT_SUCCESS: i32 = 0;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Commands {
    /// Render the card (default if no subcommand)
    Render,
    /// Print the headline counts to the terminal
    Stats,
    /// Remove cached pull request records
    ClearCache,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Svg,
    Json,
}

#[derive(Args, Debug)]
struct CardArgs {
    /// GitHub login to summarize
    #[arg(short, long, global = true)]
    username: Option<String>,

    /// Color theme: dark or light
    #[arg(long, global = true)]
    theme: Option<String>,

    /// View mode: pr-list or repo-aggregate
    #[arg(long, global = true)]
    mode: Option<String>,

    /// Comma-separated statuses to show (merged,open,draft,closed) or "all"
    #[arg(long, global = true)]
    status: Option<String>,

    /// Drop repositories with fewer stars
    #[arg(long, global = true, allow_negative_numbers = true)]
    min_stars: Option<i64>,

    /// Maximum rows to show (0 or less shows all)
    #[arg(long, global = true, allow_negative_numbers = true)]
    limit: Option<i64>,

    /// Comma-separated sort keys, e.g. "status,stars_desc"
    #[arg(long, global = true)]
    sort: Option<String>,

    /// Comma-separated stats for the panel, "all" or "none"
    #[arg(long, global = true)]
    stats: Option<String>,

    /// Comma-separated table columns
    #[arg(long, global = true)]
    fields: Option<String>,

    /// Badge-style query string; explicit flags take precedence
    #[arg(long, global = true)]
    query: Option<String>,

    /// Read records from a JSON file instead of GitHub
    #[arg(short, long, global = true)]
    input: Option<PathBuf>,

    /// Bypass the record cache
    #[arg(long, global = true)]
    no_cache: bool,
}

impl CardArgs {
    fn raw_params(&self) -> RawParams {
        RawParams {
            username: self.username.clone(),
            theme: self.theme.clone(),
            mode: self.mode.clone(),
            status: self.status.clone(),
            min_stars: self.min_stars,
            limit: self.limit,
            sort: self.sort.clone(),
            stats: self.stats.clone(),
            fields: self.fields.clone(),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "pr-stats-card")]
#[command(about = "SVG card of a GitHub user's pull request contributions", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/pr-stats-card/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format for the render command
    #[arg(short, long, value_enum, default_value = "svg", global = true)]
    format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    #[command(flatten)]
    card: CardArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Report a failure, emit an error card where a card was expected, and exit
fn fail(cli: &Cli, command: Commands, message: &str, code: i32) -> ! {
    tracing::error!(code, "{}", message);
    eprintln!("Error: {}", message);

    if command == Commands::Render && cli.format == OutputFormat::Svg {
        if let Err(e) = write_output(cli.output.as_deref(), &render_error_card(message)) {
            eprintln!("Failed to write error card: {:#}", e);
        }
    }
    std::process::exit(code);
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_cache(config: &Config, no_cache: bool) -> anyhow::Result<PrCache> {
    if no_cache || !config.cache.enabled {
        return Ok(PrCache::disabled());
    }
    Ok(PrCache::new(github::get_cache_path(), config.cache.ttl()?))
}

fn build_source(input: Option<&Path>) -> Result<DataSource, String> {
    if let Some(path) = input {
        return Ok(DataSource::File(path.to_path_buf()));
    }
    let token = github::token_from_env()
        .ok_or_else(|| "GITHUB_TOKEN is not set; export a token or pass --input".to_string())?;
    github::create_client(&token)
        .map(DataSource::GitHub)
        .map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() {
    // rustls 0.23 needs a process-wide crypto provider; a second install is harmless
    let _ = rustls::crypto::ring::default_provider().install_default();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Render);
    init_logging(cli.verbose);
    let start_time = Instant::now();

    let config = match pr_stats_card::config::load_config(cli.config.clone()) {
        Ok(c) => c,
        Err(e) => fail(&cli, command, &format!("Config error: {:#}", e), EXIT_CONFIG),
    };

    if command == Commands::ClearCache {
        let cache_path = github::get_cache_path();
        if let Err(e) = github::clear_cache(&cache_path) {
            fail(&cli, command, &format!("{:#}", e), EXIT_CONFIG);
        }
        eprintln!("Cleared cache at {}", cache_path.display());
        std::process::exit(EXIT_SUCCESS);
    }

    // Flags, then the query string, then config defaults
    let query_params = cli
        .card
        .query
        .as_deref()
        .map(RawParams::from_query)
        .unwrap_or_default();
    let raw = cli
        .card
        .raw_params()
        .or(query_params)
        .or(config.defaults.to_params());

    let params = match CardParams::resolve(raw) {
        Ok(p) => p,
        Err(e) => fail(&cli, command, &e.to_string(), e.exit_code()),
    };

    let cache = match build_cache(&config, cli.card.no_cache) {
        Ok(c) => c,
        Err(e) => fail(&cli, command, &format!("Config error: {:#}", e), EXIT_CONFIG),
    };
    let source = match build_source(cli.card.input.as_deref()) {
        Ok(s) => s,
        Err(message) => fail(&cli, command, &message, EXIT_CONFIG),
    };

    tracing::debug!(
        username = %params.username,
        mode = %params.mode,
        cache = cache.is_enabled(),
        remote = source.is_remote(),
        "Resolved request"
    );

    let card = match pr_stats_card::fetch::fetch_and_render(&source, &cache, &params).await {
        Ok(card) => card,
        Err(e) => {
            let message = match std::error::Error::source(&e) {
                Some(source) => format!("{}: {}", e, source),
                None => e.to_string(),
            };
            fail(&cli, command, &message, e.exit_code())
        }
    };

    let rendered = match (command, cli.format) {
        (Commands::Stats, _) => Ok(format!(
            "{}\n",
            format_stats_summary(&params.username, &card.data.stats, should_use_colors())
        )),
        (_, OutputFormat::Json) => format_json(&card).map(|json| json + "\n"),
        (_, OutputFormat::Svg) => Ok(card.svg.clone()),
    };

    let written = rendered.and_then(|contents| {
        let target = if command == Commands::Stats {
            None
        } else {
            cli.output.as_deref()
        };
        write_output(target, &contents)
    });
    if let Err(e) = written {
        fail(&cli, command, &format!("{:#}", e), EXIT_CONFIG);
    }

    tracing::info!(elapsed = ?start_time.elapsed(), "Done");
    std::process::exit(EXIT_SUCCESS);
}
