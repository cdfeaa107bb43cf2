//! mcpbridge - chat with a language model that can call an MCP tool server

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mcpbridge_core::{
    create_provider, BridgeConfig, ConfigProvider, FileConfigProvider, Logger, Orchestrator,
    ToolSession, TracingLogger,
};

const USAGE: &str = "Usage: mcpbridge <path_to_server_script>";

#[derive(Parser, Debug)]
#[command(name = "mcpbridge", version, about = "Chat with an LLM that can call MCP tools")]
struct CliArgs {
    /// Tool server script (.py runs with python, .js with node)
    script: Option<PathBuf>,

    /// Configuration file (default: <config_dir>/mcpbridge/config.yaml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Model provider (openai, azure, anthropic, ollama, mock, ...)
    #[arg(long)]
    provider: Option<String>,

    /// Model name as the provider's API knows it
    #[arg(long)]
    model: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();

    let Some(script) = args.script.clone() else {
        println!("{}", USAGE);
        std::process::exit(1);
    };

    init_logging(args.verbose);
    debug!("mcpbridge v{} starting", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    let exit_code = match run(&args, &script).await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}

/// File config, then environment, then command-line flags
fn load_config(args: &CliArgs) -> anyhow::Result<BridgeConfig> {
    let source = match &args.config {
        Some(path) => {
            let source = FileConfigProvider::new(path);
            if !source.exists() {
                bail!("config file {} does not exist", path.display());
            }
            source
        }
        None => FileConfigProvider::user(),
    };

    let mut config = source
        .load()
        .with_context(|| format!("loading {}", source.source()))?;
    config.apply_env_overrides();

    if let Some(provider) = &args.provider {
        config.model.provider = provider.clone();
    }
    if let Some(model) = &args.model {
        config.model.model = model.clone();
    }

    Ok(config.validate()?)
}

async fn run(args: &CliArgs, script: &Path) -> anyhow::Result<()> {
    let config = load_config(args)?;
    let logger: Arc<dyn Logger> = Arc::new(TracingLogger::new());

    // Resolve the provider first so a bad setting fails before anything is spawned
    let provider = create_provider(&config.model, Arc::clone(&logger))?;
    let session = ToolSession::connect(script, &config, Arc::clone(&logger)).await?;

    println!(
        "\nConnected to server with tools: {:?}",
        session.catalog().names()
    );

    let mut orchestrator = Orchestrator::with_settings(session, provider, &config.model, logger);

    // Close the session on every exit path, then report whichever failed first
    let loop_result = chat_loop(&mut orchestrator).await;
    let shutdown_result = orchestrator.shutdown().await;
    loop_result?;
    shutdown_result?;
    Ok(())
}

async fn chat_loop(orchestrator: &mut Orchestrator) -> anyhow::Result<()> {
    println!("\nMCP Client Started!");
    println!("Type your query or 'quit' to exit.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("\nQuery: ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };

        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        if query.eq_ignore_ascii_case("quit") {
            break;
        }

        match orchestrator.process_query(query).await {
            Ok(outcome) => println!("\n{}", outcome.text),
            Err(e) => eprintln!("\nError: {}", e),
        }
    }

    Ok(())
}
