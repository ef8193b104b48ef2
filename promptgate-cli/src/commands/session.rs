//! Session commands - drive pending sessions on a running server.

use anyhow::{Context, Result};
use promptgate_client::Client;
use std::time::Duration;

/// How long each watch request is held open.
const WATCH_WAIT: Duration = Duration::from_secs(25);

fn client(url: &str) -> Result<Client> {
    Client::new(url).with_context(|| format!("invalid server URL '{}'", url))
}

/// List pending sessions.
pub async fn pending(url: &str) -> Result<()> {
    let sessions = client(url)?.pending().await?;

    if sessions.is_empty() {
        println!("No pending sessions.");
        return Ok(());
    }

    println!(
        "{:<38} {:<10} {:<26} EDITED TEXT",
        "SESSION", "NODE", "CREATED"
    );
    for session in &sessions {
        println!(
            "{:<38} {:<10} {:<26} {}",
            session.session_id,
            session.node_id.as_deref().unwrap_or("-"),
            session.created_at,
            preview(&session.edited_text),
        );
    }
    println!();
    println!("{} session(s) waiting", sessions.len());

    Ok(())
}

/// Overwrite the working text of a session.
pub async fn update(url: &str, session_id: &str, text: &str) -> Result<()> {
    client(url)?.update(session_id, text).await?;
    tracing::info!(session_id, "Session updated");
    println!("Updated {}", session_id);
    Ok(())
}

/// Confirm a session.
pub async fn confirm(url: &str, session_id: &str, text: &str) -> Result<()> {
    client(url)?.confirm(session_id, text).await?;
    tracing::info!(session_id, "Session confirmed");
    println!("Confirmed {}", session_id);
    Ok(())
}

/// Report a dismissed dialog.
pub async fn cancel(url: &str, session_id: &str) -> Result<()> {
    client(url)?.cancel(session_id).await?;
    println!("Cancelled {} (gate still waiting)", session_id);
    Ok(())
}

/// Print session events until interrupted.
pub async fn watch(url: &str) -> Result<()> {
    let client = client(url)?;
    eprintln!("Watching {} for session events. Press Ctrl+C to stop.", url);

    loop {
        tokio::select! {
            event = client.next_event(WATCH_WAIT) => {
                if let Some(event) = event? {
                    println!(
                        "{}\t{}\t{}",
                        event.session_id,
                        event.node_id.as_deref().unwrap_or("-"),
                        preview(&event.text),
                    );
                }
            }
            signal = tokio::signal::ctrl_c() => {
                signal?;
                return Ok(());
            }
        }
    }
}

/// First line of `text`, truncated for table output.
fn preview(text: &str) -> String {
    const MAX: usize = 60;
    let line = text.lines().next().unwrap_or("");
    if line.chars().count() > MAX || text.lines().nth(1).is_some() {
        let cut: String = line.chars().take(MAX).collect();
        format!("{}...", cut)
    } else {
        line.to_string()
    }
}
