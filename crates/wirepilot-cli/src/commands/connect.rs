use anyhow::{anyhow, bail, Result};
use tracing::info;

use wirepilot_core::find_server;

use crate::session::Session;

pub fn connect(session: &mut Session, server_id: &str) -> Result<()> {
    session.ensure_single_instance()?;
    let mut orchestrator = session.orchestrator()?;
    if !orchestrator.check_installation() {
        bail!(
            "WireSock client not found; set its location with `wirepilot settings set-client <path>`"
        );
    }

    let servers = orchestrator.refresh_servers(&session.settings.source_directory);
    let server = find_server(&servers, server_id)
        .ok_or_else(|| anyhow!("no tunnel config named {server_id}"))?;

    let outcome = orchestrator.connect(server, &session.settings);
    if !outcome.is_success() {
        bail!("could not connect to {}: {outcome}", server.friendly_name);
    }

    session.settings.last_server_id = server.id.clone();
    session.save_settings()?;
    println!("Connected to {}", server.friendly_name);
    Ok(())
}

pub fn disconnect(session: &Session) -> Result<()> {
    session.ensure_single_instance()?;
    let mut orchestrator = session.orchestrator()?;
    let outcome = orchestrator.disconnect();
    if !outcome.is_success() {
        bail!("disconnect failed: {outcome}");
    }
    println!("{}", capitalize(&outcome.to_string()));
    Ok(())
}

/// Connects to the last used server when auto-connect is on.
pub fn up(session: &mut Session) -> Result<()> {
    if !session.settings.auto_connect {
        println!("Auto-connect is off.");
        return Ok(());
    }
    if session.settings.last_server_id.is_empty() {
        println!("No previous server to reconnect to.");
        return Ok(());
    }
    let server_id = session.settings.last_server_id.clone();
    info!("auto-connecting to {server_id}");
    connect(session, &server_id)
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
