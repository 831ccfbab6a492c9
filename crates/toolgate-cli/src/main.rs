use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod call_cmd;
mod check_cmd;

#[derive(Parser)]
#[command(name = "toolgate", about = "Toolgate CLI - MCP tool gateway client")]
struct Cli {
    /// Toolgate server URL
    #[arg(long, env = "TOOLGATE_URL", default_value = "http://localhost:8000")]
    server_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and print the advertised tool manifest
    Tools,

    /// Invoke a tool over JSON-RPC and print the result
    Call {
        /// Tool name as advertised in the manifest
        tool: String,

        /// Tool params as a JSON object
        #[arg(long, default_value = "{}")]
        params: String,

        /// JSON-RPC request id
        #[arg(long, default_value_t = 1)]
        id: i64,
    },

    /// Validate configuration documents without starting a server
    Check {
        /// Tool manifest document
        #[arg(long, default_value = "config/tools.json")]
        tools: PathBuf,

        /// Policy document
        #[arg(long, default_value = "config/policy.json")]
        policy: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Tools => {
            let manifest = reqwest::Client::new()
                .get(format!("{}/tools", cli.server_url))
                .send()
                .await?
                .error_for_status()?
                .json::<serde_json::Value>()
                .await?;
            println!("{}", serde_json::to_string_pretty(&manifest)?);
        }
        Commands::Call { tool, params, id } => {
            call_cmd::run(&cli.server_url, &tool, &params, id).await?;
        }
        Commands::Check { tools, policy } => {
            check_cmd::run(&tools, &policy)?;
        }
    }

    Ok(())
}
