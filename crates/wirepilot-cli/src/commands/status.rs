use anyhow::Result;
use time::format_description::well_known::Rfc3339;

use wirepilot_core::SplitTunnelMode;

use crate::session::Session;

pub fn execute(session: &Session) -> Result<()> {
    let settings = &session.settings;
    let mut orchestrator = session.orchestrator()?;

    if orchestrator.check_installation() {
        if let Some(path) = orchestrator.supervisor().located_path() {
            println!("WireSock client: {}", path.display());
        }
    } else {
        println!("WireSock client: not installed");
    }
    let running = if orchestrator.is_client_running() {
        "running"
    } else {
        "not running"
    };
    println!("Tunnel process: {running}");

    println!("Source directory: {}", settings.source_directory.display());
    if settings.last_server_id.is_empty() {
        println!("Last server: none");
    } else {
        println!("Last server: {}", settings.last_server_id);
    }
    println!(
        "Auto-connect: {}",
        if settings.auto_connect { "on" } else { "off" }
    );

    let policy = settings.split_tunnel_policy();
    match policy.mode() {
        SplitTunnelMode::Disabled => println!("Split tunneling: off"),
        mode => println!(
            "Split tunneling: {mode} ({})",
            policy.effective_processes().join(", ")
        ),
    }

    match orchestrator.locations().cache_written_at() {
        Some(written) => {
            let stamp = written.format(&Rfc3339).unwrap_or_else(|_| written.to_string());
            println!("Location cache: updated {stamp}");
        }
        None => println!("Location cache: empty"),
    }
    Ok(())
}
