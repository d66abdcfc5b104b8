use anyhow::Result;

use wirepilot_core::ServerInfo;

use crate::session::Session;

pub fn list(session: &Session) -> Result<()> {
    let mut orchestrator = session.orchestrator()?;
    let servers = orchestrator.refresh_servers(&session.settings.source_directory);
    print_servers(session, &servers);
    Ok(())
}

pub fn update_locations(session: &Session) -> Result<()> {
    let mut orchestrator = session.orchestrator()?;
    let servers = orchestrator.update_locations(&session.settings.source_directory);
    println!("Location database updated.");
    print_servers(session, &servers);
    Ok(())
}

fn print_servers(session: &Session, servers: &[ServerInfo]) {
    if servers.is_empty() {
        println!(
            "No tunnel configs found in {}",
            session.settings.source_directory.display()
        );
        return;
    }
    let width = servers.iter().map(|server| server.id.len()).max().unwrap_or(0);
    for server in servers {
        let marker = if server.id == session.settings.last_server_id {
            "*"
        } else {
            " "
        };
        println!("{marker} {:<width$}  {}", server.id, server.friendly_name);
    }
}
