use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use command::{
    AskPayload, CommandAction, CommandHandler, CommandRequest, CommandResponse, PathPayload,
    ResponseMeta, SearchPayload, ShowPayload, StatsPayload, SuggestPayload,
};
use config::ExplorerConfig;
use serde::Serialize;
use std::io::{self, Read};
use std::path::PathBuf;

mod command;
mod config;
mod services;

#[derive(Parser)]
#[command(name = "tagtrail")]
#[command(about = "Explore a tagged document corpus by narrowing facets", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (default: ./tagtrail.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Corpus JSON file (overrides TAGTRAIL_CORPUS and the config file)
    #[arg(long, global = true)]
    corpus: Option<PathBuf>,

    /// Translation / question-answering service base URL
    #[arg(long, global = true)]
    service_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a JSON Command API request
    Command(CommandArgs),

    /// Corpus size and most-used tags
    Stats(StatsArgs),

    /// Random facets to start exploring from
    Suggest(SuggestArgs),

    /// Matching documents and remaining facets for a selection path
    Facets(PathArgs),

    /// Navigation chain for a selection path
    Chain(PathArgs),

    /// Find facets by prefix, most frequent first
    Search(SearchArgs),

    /// Full record of one document
    Show(ShowArgs),

    /// Translate a document's title and summary via the external service
    Translate(ShowArgs),

    /// Ask a question about a document via the external service
    Ask(AskArgs),
}

#[derive(Args)]
struct CommandArgs {
    /// Inline JSON payload (mutually exclusive with --file)
    #[arg(long, conflicts_with = "file")]
    json: Option<String>,

    /// Path to file containing JSON payload ("-" for stdin)
    #[arg(long)]
    file: Option<PathBuf>,
}

#[derive(Args)]
struct StatsArgs {
    /// Number of most-used tags to list
    #[arg(long)]
    top: Option<usize>,
}

#[derive(Args)]
struct SuggestArgs {
    /// Number of facets to suggest
    #[arg(long)]
    count: Option<usize>,
}

#[derive(Args)]
struct PathArgs {
    /// Selected facet, in selection order (repeatable)
    #[arg(long = "tag", short = 't')]
    tags: Vec<String>,
}

#[derive(Args)]
struct SearchArgs {
    query: String,

    /// Maximum number of tags returned
    #[arg(long)]
    limit: Option<usize>,
}

#[derive(Args)]
struct ShowArgs {
    /// Document identifier
    id: String,
}

#[derive(Args)]
struct AskArgs {
    /// Document identifier
    id: String,

    question: String,

    /// Question is in Spanish; translate it and the answer
    #[arg(long)]
    translated: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.filter_module("reqwest", log::LevelFilter::Warn);
    builder.target(env_logger::Target::Stderr).init();

    let mut config = ExplorerConfig::load(cli.config.as_deref())?;
    config.apply_env();
    if let Some(corpus) = cli.corpus {
        config.corpus = corpus;
    }
    if let Some(url) = cli.service_url {
        config.service_url = url;
    }

    let pretty = cli.pretty;
    let request = match cli.command {
        Commands::Command(args) => return run_command(args, config, pretty).await,
        Commands::Stats(args) => {
            build_request(CommandAction::Stats, StatsPayload { top: args.top })?
        }
        Commands::Suggest(args) => build_request(
            CommandAction::Suggest,
            SuggestPayload { count: args.count },
        )?,
        Commands::Facets(args) => {
            build_request(CommandAction::Explore, PathPayload { path: args.tags })?
        }
        Commands::Chain(args) => {
            build_request(CommandAction::Chain, PathPayload { path: args.tags })?
        }
        Commands::Search(args) => build_request(
            CommandAction::Search,
            SearchPayload {
                query: args.query,
                limit: args.limit,
            },
        )?,
        Commands::Show(args) => {
            build_request(CommandAction::Show, ShowPayload { id: args.id })?
        }
        Commands::Translate(args) => {
            build_request(CommandAction::Translate, ShowPayload { id: args.id })?
        }
        Commands::Ask(args) => build_request(
            CommandAction::Ask,
            AskPayload {
                id: args.id,
                question: args.question,
                translated: args.translated,
            },
        )?,
    };

    let handler = CommandHandler::open(config)?;
    let response = handler.execute(request).await;
    if let Some(error) = response.error {
        bail!("{} ({})", error.message, error.code);
    }
    print_json(&response.data, pretty)
}

fn build_request<P: Serialize>(action: CommandAction, payload: P) -> Result<CommandRequest> {
    Ok(CommandRequest {
        action,
        payload: serde_json::to_value(payload)?,
    })
}

async fn run_command(args: CommandArgs, config: ExplorerConfig, pretty: bool) -> Result<()> {
    let raw = read_payload(&args)?;
    let request: CommandRequest =
        serde_json::from_str(&raw).context("Invalid JSON passed to --json/--file")?;

    let response = match CommandHandler::open(config) {
        Ok(handler) => handler.execute(request).await,
        Err(err) => CommandResponse::from_error(
            &err,
            ResponseMeta {
                action: Some(request.action.as_str()),
                ..Default::default()
            },
        ),
    };

    print_json(&response, pretty)?;
    if response.is_error() {
        std::process::exit(1);
    }
    Ok(())
}

fn read_payload(args: &CommandArgs) -> Result<String> {
    if let Some(raw) = &args.json {
        return Ok(raw.clone());
    }
    match &args.file {
        Some(path) if path.as_os_str() == "-" => {
            let mut raw = String::new();
            io::stdin()
                .read_to_string(&mut raw)
                .context("Failed to read payload from stdin")?;
            Ok(raw)
        }
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read payload {}", path.display())),
        None => Err(anyhow!("Provide a request with --json or --file")),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<()> {
    let output = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{output}");
    Ok(())
}
