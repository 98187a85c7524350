use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use toolbridge::config::Config;
use toolbridge::mcp::McpServer;
use toolbridge::providers;

#[derive(Parser)]
#[command(name = env!("CARGO_PKG_NAME"))]
#[command(about = env!("CARGO_PKG_DESCRIPTION"))]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = toolbridge::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    log_level: Option<String>,

    /// Print the canonical tool table and exit
    #[arg(long)]
    list_tools: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before anything reads the environment
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::load(&cli.config)?;

    init_logging(&config, cli.log_level.as_deref());

    info!(
        version = toolbridge::VERSION,
        config = %cli.config.display(),
        "starting toolbridge"
    );

    let registry = providers::build_registry(&config)?;

    if cli.list_tools {
        print_tool_table(&registry);
        return Ok(());
    }

    let server = McpServer::new(&config.server, registry);
    server.run_stdio().await?;

    Ok(())
}

/// Initialize tracing. Diagnostics go to stderr so stdout stays clean for
/// JSON-RPC frames.
fn init_logging(config: &Config, override_level: Option<&str>) {
    use tracing_subscriber::EnvFilter;

    let level = override_level.unwrap_or(&config.logging.level);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Print the canonical name table: what each provider action is advertised
/// as.
fn print_tool_table(registry: &toolbridge::registry::Registry) {
    println!("{:<40} {:<14} {}", "CANONICAL NAME", "NAMESPACE", "RAW ACTION");
    for binding in registry.bindings() {
        println!(
            "{:<40} {:<14} {}",
            binding.definition.name, binding.namespace, binding.raw_action
        );
    }
}
