//! Version command - show version information.

use anyhow::Result;
use promptgate_core::PROMPT_EDIT_INFO;

/// Version information.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run the version command.
pub fn run() -> Result<()> {
    println!("promptgate - human-in-the-loop prompt edit gate");
    println!();
    println!("Version:     {}", VERSION);
    println!(
        "Platform:    {} / {}",
        std::env::consts::OS,
        std::env::consts::ARCH
    );
    println!(
        "Node:        {} ({})",
        PROMPT_EDIT_INFO.type_name, PROMPT_EDIT_INFO.display_name
    );
    println!();
    println!("Components:");
    println!("  promptgate-core    Session store, wait gate, notifier, gate node");
    println!("  promptgate-server  HTTP session endpoints, logging");
    println!("  promptgate-client  Typed endpoint client");
    println!("  promptgate-cli     Command-line interface");

    Ok(())
}
