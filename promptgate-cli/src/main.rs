//! promptgate CLI - host and drive prompt edit gates.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use promptgate_server::observability::{TracingConfig, TracingGuard, init_tracing};

const DEFAULT_URL: &str = "http://127.0.0.1:8188";

/// promptgate - pause a pipeline until a human confirms an edited prompt.
#[derive(Parser)]
#[command(name = "promptgate")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the session endpoints
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value = "8188")]
        port: u16,

        /// Open a gate for every line read from stdin
        #[arg(long)]
        stdin: bool,

        /// Also POST session events to this URL
        #[arg(long)]
        webhook: Option<String>,

        /// Seconds to wait for each confirmation
        #[arg(short, long)]
        timeout: Option<u64>,
    },

    /// Open one gate and print the confirmed text
    Gate {
        /// Text to present for editing
        #[arg(long)]
        text: String,

        /// Pre-filled edit; ignored when blank
        #[arg(long)]
        seed: Option<String>,

        /// Node identifier reported to clients
        #[arg(long)]
        node_id: Option<String>,

        /// Seconds to wait for confirmation
        #[arg(short, long)]
        timeout: Option<u64>,

        /// Also POST the session event to this URL
        #[arg(long)]
        webhook: Option<String>,

        /// Host to bind to
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value = "8188")]
        port: u16,

        /// Print the node output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List sessions waiting for confirmation
    Pending {
        /// Server URL
        #[arg(short, long, default_value = DEFAULT_URL)]
        url: String,
    },

    /// Overwrite the working text of a session
    Update {
        /// Session ID
        session_id: String,

        /// New working text
        text: String,

        /// Server URL
        #[arg(short, long, default_value = DEFAULT_URL)]
        url: String,
    },

    /// Confirm the final text and resume the gate
    Confirm {
        /// Session ID
        session_id: String,

        /// Final text
        text: String,

        /// Server URL
        #[arg(short, long, default_value = DEFAULT_URL)]
        url: String,
    },

    /// Report a dismissed edit dialog
    Cancel {
        /// Session ID
        session_id: String,

        /// Server URL
        #[arg(short, long, default_value = DEFAULT_URL)]
        url: String,
    },

    /// Print session events as they arrive
    Watch {
        /// Server URL
        #[arg(short, long, default_value = DEFAULT_URL)]
        url: String,
    },

    /// Show version information
    Version,
}

/// Logging config: `PROMPTGATE_LOG_*` / `RUST_LOG` first, then `-v` on top.
fn logging_config(verbosity: u8) -> TracingConfig {
    TracingConfig::from_env_or("warn").with_verbosity(verbosity)
}

fn setup_logging(verbosity: u8) -> Result<TracingGuard> {
    init_tracing(logging_config(verbosity))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _tracing_guard = setup_logging(cli.verbose)?;

    match cli.command {
        Commands::Serve {
            host,
            port,
            stdin,
            webhook,
            timeout,
        } => {
            let options = commands::serve::ServeOptions {
                host,
                port,
                stdin,
                webhook,
                timeout,
            };
            commands::serve::run(options).await
        }
        Commands::Gate {
            text,
            seed,
            node_id,
            timeout,
            webhook,
            host,
            port,
            json,
        } => {
            let options = commands::gate::GateOptions {
                text,
                seed,
                node_id,
                timeout,
                webhook,
                host,
                port,
                json,
            };
            commands::gate::run(options).await
        }
        Commands::Pending { url } => commands::session::pending(&url).await,
        Commands::Update {
            session_id,
            text,
            url,
        } => commands::session::update(&url, &session_id, &text).await,
        Commands::Confirm {
            session_id,
            text,
            url,
        } => commands::session::confirm(&url, &session_id, &text).await,
        Commands::Cancel { session_id, url } => commands::session::cancel(&url, &session_id).await,
        Commands::Watch { url } => commands::session::watch(&url).await,
        Commands::Version => commands::version::run(),
    }
}
