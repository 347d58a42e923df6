//! gxshell CLI
//!
//! Shows which DMS3-FS API endpoint a client would use, and queries it.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use gxshell_core::constants::PUBLIC_GATEWAY_URL;
use gxshell_resolver::{Resolution, Resolver, ResolverConfig};

/// gxshell - find and query a DMS3-FS API endpoint
#[derive(Parser)]
#[command(name = "gxshell")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    /// API endpoint to use as-is, skipping discovery
    #[arg(long, global = true, env = "DMS3FS_API")]
    api: Option<String>,

    /// Repo directory holding the node's `api` file
    #[arg(long, global = true, env = "DMS3FS_PATH")]
    repo: Option<PathBuf>,

    /// Endpoint used when no local node answers
    #[arg(long, global = true, default_value = PUBLIC_GATEWAY_URL)]
    gateway: String,

    /// Liveness check timeout for a local node, in seconds
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the API endpoint and print it
    Resolve {
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve the API endpoint and query the node version
    Version,
}

impl Cli {
    fn resolver_config(&self) -> ResolverConfig {
        let mut config = ResolverConfig::default().with_gateway(self.gateway.clone());

        if let Some(api) = &self.api {
            config = config.with_api_override(api.clone());
        }
        if let Some(repo) = self.repo.as_ref().filter(|p| !p.as_os_str().is_empty()) {
            config = config.with_repo_path(repo.clone());
        }
        if let Some(seconds) = self.timeout {
            config = config.with_probe_timeout(seconds);
        }

        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "gxshell=debug,info"
    } else {
        "gxshell=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(cli.json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!cli.json_logs).then(|| tracing_subscriber::fmt::layer()))
        .init();

    let config = cli.resolver_config();
    debug!(?config, "Resolver configuration");
    let resolver = Resolver::with_config(config);

    match cli.command {
        Commands::Resolve { json } => cmd_resolve(&resolver, json).await,
        Commands::Version => cmd_version(&resolver).await,
    }
}

/// Resolve and print the endpoint
async fn cmd_resolve(resolver: &Resolver, json: bool) -> Result<()> {
    let resolution = resolver.resolve().await;

    if json {
        let out = serde_json::json!({
            "endpoint": resolution.endpoint(),
            "base_url": resolution.client.base_url(),
            "source": resolution.source,
            "used_fallback": resolution.used_fallback,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    print_resolution(&resolution);
    Ok(())
}

/// Resolve and query the node version
async fn cmd_version(resolver: &Resolver) -> Result<()> {
    let resolution = resolver.resolve().await;
    print_resolution(&resolution);

    let info = resolution
        .client
        .version()
        .await
        .with_context(|| format!("Failed to query version from {}", resolution.endpoint()))?;

    println!("\n{}", "Node version:".green().bold());
    println!("   {} {}", "Version:".dimmed(), info.version);
    if !info.commit.is_empty() {
        println!("   {} {}", "Commit:".dimmed(), info.commit);
    }
    if let Some(repo) = &info.repo {
        println!("   {} {}", "Repo:".dimmed(), repo);
    }
    if let Some(system) = &info.system {
        println!("   {} {}", "System:".dimmed(), system);
    }

    Ok(())
}

fn print_resolution(resolution: &Resolution) {
    println!("{} {}", "API endpoint:".cyan().bold(), resolution.endpoint());
    println!("   {} {}", "Source:".dimmed(), resolution.source);
    println!("   {} {}", "Base URL:".dimmed(), resolution.client.base_url());

    if resolution.used_fallback {
        println!(
            "\n{}",
            "No local node answered; using the public gateway.".yellow()
        );
    }
}
