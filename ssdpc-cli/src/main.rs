//! ssdpc - command-line client for the minissdpd discovery daemon.

mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use ssdpc_client::{Client, DEFAULT_SOCKET_PATH};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ssdpc")]
#[command(about = "Client for the minissdpd service-discovery daemon")]
#[command(version)]
struct Cli {
    /// Path to the daemon's Unix socket
    #[arg(long, default_value = DEFAULT_SOCKET_PATH, env = "SSDPC_SOCKET")]
    socket: PathBuf,

    /// Print services as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new service for the daemon to advertise
    Register {
        /// SSDP service/device type URN
        #[arg(short = 't', long = "type")]
        service_type: String,

        /// SSDP unique service name
        #[arg(short, long)]
        usn: String,

        /// SSDP server identifier string
        #[arg(short, long)]
        server: String,

        /// URL of the service being advertised
        #[arg(short, long)]
        location: String,
    },

    /// List services currently advertised by the daemon
    Ls {
        #[command(subcommand)]
        filter: Option<LsFilter>,
    },
}

#[derive(Subcommand)]
enum LsFilter {
    /// Only services matching a type filter string
    Type {
        /// Type filter string
        filter: String,
    },

    /// Only services matching a USN filter string
    Usn {
        /// USN filter string
        filter: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    // The client is built here and handed to command execution; no shared
    // process-wide client.
    let mut client = Client::new(&cli.socket);
    if let Err(e) = client.connect().await {
        eprintln!("{}: could not connect to daemon: {}", "Error".red(), e);
        std::process::exit(2);
    }

    let result = commands::execute(&mut client, cli.command, cli.json).await;
    let _ = client.close().await;

    match result {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("{}: {}", "Error".red(), e);
            std::process::exit(2);
        }
    }
}
