//! Binsta CLI - command-line access to Binsta file storage

mod commands;

use binsta_client::{BinstaClient, Config};
use clap::Parser;
use commands::Command;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "binsta")]
#[command(about = "Manage files and folders on Binsta storage")]
#[command(version)]
struct Args {
    /// Bearer token for metadata calls
    #[arg(long, env = "BINSTA_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// API base URL
    #[arg(long, env = "BINSTA_API_URL")]
    api_url: Option<String>,

    /// Base URL for media variant URLs
    #[arg(long, env = "BINSTA_TRANSFORM_URL")]
    transform_url: Option<String>,

    /// Anonymous key used for uploads
    #[arg(long, env = "BINSTA_ANON_KEY", hide_env_values = true)]
    anon_key: Option<String>,

    /// Enable debug logging
    #[arg(short, long, env = "BINSTA_DEBUG")]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    fn client_config(&self) -> Config {
        let mut config = Config::new();
        if let Some(token) = &self.token {
            config = config.with_token(token);
        }
        if let Some(url) = &self.api_url {
            config = config.with_api_url(url);
        }
        if let Some(url) = &self.transform_url {
            config = config.with_transform_url(url);
        }
        if let Some(key) = &self.anon_key {
            config = config.with_anon_key(key);
        }
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Logs go to stderr so stdout stays machine readable
    let log_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            format!("binsta_cli={},binsta_client={}", log_level, log_level).into()
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = args.client_config();
    tracing::debug!(api_url = %config.api_url, "Using Binsta API");
    let client = BinstaClient::new(config)?;

    let output = commands::run(&client, args.command).await?;
    println!("{}", output);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_options_build_config() {
        let args = Args::try_parse_from([
            "binsta",
            "--token",
            "tok",
            "--api-url",
            "http://localhost:3000/api/v1/",
            "--anon-key",
            "anon",
            "folder",
            "get",
        ])
        .unwrap();

        let config = args.client_config();
        assert_eq!(config.token.as_deref(), Some("tok"));
        assert_eq!(config.api_url, "http://localhost:3000/api/v1");
        assert_eq!(config.anon_key, "anon");
        assert_eq!(config.transform_url, binsta_client::DEFAULT_API_URL);
    }

    #[test]
    fn test_command_required() {
        assert!(Args::try_parse_from(["binsta"]).is_err());
    }
}
