//! Lingua CLI - generate and inspect language message catalogs.
//!
//! # Commands
//!
//! - `lingua generate [--base DIR] [LANG...]` - Create or refresh message files
//! - `lingua resolve <TAG...>` - Show how language tags resolve
//! - `lingua tags` - List the language tag catalog
//! - `lingua render --base DIR <TAG> <SECTION> [KEY=VALUE...]` - Render a section

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use lingua_i18n::{Database, I18nConfig};
use lingua_log::{Format, Level, LogConfig};
use std::path::PathBuf;

mod commands;
mod error;

use error::CliResult;

/// Lingua CLI - language tags and message catalogs
#[derive(Parser)]
#[command(name = "lingua")]
#[command(version)]
#[command(about = "Generate and inspect language message catalogs")]
#[command(long_about = None)]
#[command(propagate_version = true)]
#[command(after_help = format!(
    "{}\n  {} lingua generate --base locale en zh-Hans zh-Hant\n  {} lingua resolve zh_hant_tw\n  {} lingua render --base locale zh-Hans-CN login username=alice",
    "Examples:".bright_cyan().bold(),
    "$".dimmed(),
    "$".dimmed(),
    "$".dimmed(),
))]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML)
    #[arg(short, long, global = true, env = "LINGUA_CONFIG")]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Enable verbose output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create message files for languages that have none and rewrite the rest
    #[command(alias = "g")]
    Generate(GenerateArgs),

    /// Show canonical form, fallback chain and catalog entry of tags
    #[command(alias = "r")]
    Resolve(ResolveArgs),

    /// List the language tag catalog
    Tags,

    /// Render one section of the best matching message file
    Render(RenderArgs),
}

#[derive(Args)]
struct GenerateArgs {
    /// Message directory
    #[arg(long = "base", value_name = "DIR", default_value = "locale")]
    base: PathBuf,

    /// Language tags to generate
    #[arg(value_name = "LANG", default_values = ["en", "zh-Hans", "zh-Hant"])]
    languages: Vec<String>,
}

#[derive(Args)]
struct ResolveArgs {
    /// Language tags to resolve
    #[arg(value_name = "TAG", required = true)]
    tags: Vec<String>,
}

#[derive(Args)]
struct RenderArgs {
    /// Message directory
    #[arg(long = "base", value_name = "DIR", default_value = "locale")]
    base: PathBuf,

    /// Requested language tag
    #[arg(value_name = "TAG")]
    tag: String,

    /// Dotted section path, e.g. `menu.file`
    #[arg(value_name = "SECTION")]
    section: String,

    /// Template arguments
    #[arg(value_name = "KEY=VALUE")]
    args: Vec<String>,
}

/// Options shared by every command.
pub struct Context {
    pub db: Database,
    pub quiet: bool,
}

fn init_logging(cli: &Cli) {
    let mut config = LogConfig::from_env();
    if std::env::var_os("LINGUA_LOG_FORMAT").is_none() {
        config.format = Format::Pretty;
    }
    if cli.verbose {
        config.level = Level::Debug;
    } else if cli.quiet {
        config.level = Level::Error;
    }
    if cli.no_color {
        config.color = false;
    }
    lingua_log::init_with(config);
}

fn load_config(cli: &Cli) -> CliResult<I18nConfig> {
    let config = match &cli.config {
        Some(path) => I18nConfig::from_file(path)?.merge_env()?,
        None => I18nConfig::load_dotenv(None)?,
    };
    Ok(config)
}

fn run(cli: Cli) -> CliResult<()> {
    let ctx = Context {
        db: Database::new(load_config(&cli)?),
        quiet: cli.quiet,
    };

    match cli.command {
        Commands::Generate(args) => commands::generate::run(&ctx, &args.base, &args.languages),
        Commands::Resolve(args) => commands::resolve::run(&ctx, &args.tags),
        Commands::Tags => commands::tags::run(&ctx),
        Commands::Render(args) => {
            commands::render::run(&ctx, &args.base, &args.tag, &args.section, &args.args)
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }
    init_logging(&cli);

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
