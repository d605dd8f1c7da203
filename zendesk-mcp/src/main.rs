use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use zendesk_mcp::client::ZendeskClient;
use zendesk_mcp::config::Config;
use zendesk_mcp::server::McpServer;
use zendesk_mcp::tools::ToolRegistry;

#[derive(Parser, Debug)]
#[command(name = "zendesk-mcp")]
#[command(version)]
#[command(about = "Zendesk Support MCP server", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Run the MCP server on stdio (default)")]
    Serve,

    #[command(about = "Print the registered tools and exit")]
    ListTools,

    #[command(about = "Validate configuration and print the account endpoint")]
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // stdout carries the protocol; all diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Failed to initialize Zendesk client: {err}");
            std::process::exit(1);
        }
    };

    let client = Arc::new(ZendeskClient::new(&config));

    match args.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            let registry = ToolRegistry::new(client);
            let server = McpServer::new(registry);
            eprintln!("Zendesk MCP server running on stdio");
            server.run().await?;
        }

        Commands::ListTools => {
            let registry = ToolRegistry::new(client);
            println!("{} tools registered:", registry.len());
            for tool in registry.tools() {
                println!("  {}  {}", tool.name, tool.description);
            }
        }

        Commands::Check => {
            println!("endpoint: {}", client.base_url());
            println!("subdomain: {}", client.subdomain());
            let state = client.rate_limit_status();
            println!("rate limit remaining: {}", state.remaining);
        }
    }

    Ok(())
}
