//! Serve command - host the session endpoints and, optionally, gates fed from stdin.

use anyhow::{Context, Result};
use promptgate_core::{
    BroadcastTransport, GateConfig, GateOutput, NodeRef, Notifier, PromptEdit, SessionStore,
    WebhookTransport,
};
use promptgate_server::api::{API_PREFIX, ApiServer, AppState, ServerConfig};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Options for the serve command.
pub struct ServeOptions {
    pub host: String,
    pub port: u16,
    pub stdin: bool,
    pub webhook: Option<String>,
    pub timeout: Option<u64>,
}

/// A running server plus the store its gates share.
pub(crate) struct GateHost {
    store: Arc<SessionStore>,
    events: Arc<BroadcastTransport>,
    addr: SocketAddr,
    server: JoinHandle<promptgate_core::Result<()>>,
}

impl GateHost {
    /// Bind the endpoints and start serving in the background.
    pub(crate) async fn start(host: &str, port: u16) -> Result<Self> {
        let store = Arc::new(SessionStore::new());
        let events = Arc::new(BroadcastTransport::default());
        let state = Arc::new(AppState::new(Arc::clone(&store), Arc::clone(&events)));

        let server = ApiServer::bind(&ServerConfig::new(host, port), state).await?;
        let addr = server.local_addr();
        let server = tokio::spawn(server.run());

        Ok(Self {
            store,
            events,
            addr,
            server,
        })
    }

    pub(crate) fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub(crate) fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    /// Build a gate node that notifies long-poll clients and the optional webhook.
    pub(crate) fn node(&self, timeout: Option<u64>, webhook: Option<&str>) -> Result<PromptEdit> {
        let mut config = GateConfig::from_env();
        if let Some(secs) = timeout {
            config = config.with_timeout(Duration::from_secs(secs));
        }

        let mut notifier = Notifier::new(tokio::runtime::Handle::current())
            .with_transport(self.events.clone());
        if let Some(url) = webhook {
            notifier = notifier.with_transport(Arc::new(WebhookTransport::new(url)?));
        }

        Ok(PromptEdit::new(Arc::clone(&self.store), config).with_notifier(notifier))
    }

    pub(crate) fn stop(self) {
        self.server.abort();
    }
}

/// Run a gate on its own worker thread.
///
/// Gates block for up to the configured timeout, so they run on detached
/// threads that do not hold up process exit.
pub(crate) fn spawn_gate(
    node: PromptEdit,
    text: String,
    seed: Option<String>,
    node_ref: NodeRef,
) -> Result<oneshot::Receiver<promptgate_core::Result<GateOutput>>> {
    let (tx, rx) = oneshot::channel();
    std::thread::Builder::new()
        .name(format!("gate-{}", node_ref))
        .spawn(move || {
            let result = node.edit_prompt(&text, seed.as_deref(), node_ref);
            let _ = tx.send(result);
        })
        .context("failed to spawn gate worker")?;
    Ok(rx)
}

fn print_endpoints(addr: SocketAddr) {
    let base = format!("http://{}{}", addr, API_PREFIX);
    println!("Server: http://{}", addr);
    println!();
    println!("Endpoints:");
    println!("  POST {}/update      - Overwrite working text", base);
    println!("  POST {}/confirm     - Confirm and resume", base);
    println!("  POST {}/cancel      - Dismiss dialog (gate keeps waiting)", base);
    println!("  GET  {}/pending     - List waiting sessions", base);
    println!("  GET  {}/events      - Long-poll for session events", base);
    println!("  GET  {}/health      - Health check", base);
    println!();
}

/// Run the serve command.
pub async fn run(options: ServeOptions) -> Result<()> {
    tracing::info!(host = %options.host, port = options.port, "Starting promptgate server");

    let host = GateHost::start(&options.host, options.port).await?;
    let node = host.node(options.timeout, options.webhook.as_deref())?;

    println!("Starting promptgate server...");
    println!();
    print_endpoints(host.addr());
    if options.stdin {
        println!("Each line read from stdin opens a gate.");
    }
    println!("Press Ctrl+C to stop.");
    println!();

    let feed = async {
        if options.stdin {
            feed_stdin(&node).await?;
        }
        std::future::pending::<Result<()>>().await
    };

    tokio::select! {
        result = feed => result?,
        signal = tokio::signal::ctrl_c() => signal?,
    }

    tracing::info!(
        pending = host.store().list_pending().len(),
        "Shutdown signal received"
    );
    println!();
    println!("Shutting down...");
    host.stop();

    Ok(())
}

async fn feed_stdin(node: &PromptEdit) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut count = 0u64;

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        count += 1;

        let node_ref = NodeRef::new(format!("stdin-{}", count));
        let rx = spawn_gate(node.clone(), line, None, node_ref.clone())?;

        tokio::spawn(async move {
            match rx.await {
                Ok(Ok(output)) => println!("{}\t{}", node_ref, output.text),
                Ok(Err(e)) => eprintln!("{}\t{}", node_ref, e),
                Err(_) => tracing::error!(node = %node_ref, "Gate worker exited without a result"),
            }
        });
    }

    tracing::debug!(count, "stdin closed");
    Ok(())
}
