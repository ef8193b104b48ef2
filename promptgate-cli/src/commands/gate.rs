//! Gate command - open one gate and print the confirmed text.

use super::serve::{GateHost, spawn_gate};
use anyhow::{Result, anyhow};
use promptgate_core::NodeRef;

/// Options for the gate command.
pub struct GateOptions {
    pub text: String,
    pub seed: Option<String>,
    pub node_id: Option<String>,
    pub timeout: Option<u64>,
    pub webhook: Option<String>,
    pub host: String,
    pub port: u16,
    pub json: bool,
}

/// Run the gate command.
pub async fn run(options: GateOptions) -> Result<()> {
    let host = GateHost::start(&options.host, options.port).await?;
    let node = host.node(options.timeout, options.webhook.as_deref())?;

    eprintln!(
        "Waiting for confirmation (timeout {}s). Clients: http://{}/prompt_edit/pending",
        node.config().timeout().as_secs(),
        host.addr()
    );

    let node_ref = NodeRef::from(options.node_id);
    let rx = spawn_gate(node, options.text, options.seed, node_ref)?;

    let result = tokio::select! {
        result = rx => result.map_err(|_| anyhow!("gate worker exited without a result"))?,
        signal = tokio::signal::ctrl_c() => {
            signal?;
            host.stop();
            return Err(anyhow!("interrupted while waiting for confirmation"));
        }
    };
    host.stop();

    let output = result?;
    if options.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", output.text);
    }

    Ok(())
}
