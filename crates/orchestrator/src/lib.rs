//! Connect and disconnect flows over the location cache, the config
//! rewriter and the process supervisor.

pub mod servers;

use std::path::Path;

use locations::LocationCache;
use supervisor::ProcessSupervisor;
use tracing::{debug, info, warn};
use wirepilot_core::{ServerInfo, Settings, SplitTunnelMode, SplitTunnelPolicy};

pub use servers::{friendly_name, scan_servers};
pub use supervisor::{ConnectOutcome, StopOutcome};

/// One per running application. Callers must not overlap `connect` and
/// `disconnect`.
pub struct Orchestrator {
    supervisor: ProcessSupervisor,
    locations: LocationCache,
}

impl Orchestrator {
    /// Takes ownership of both parts and clears temporaries left behind by
    /// an earlier session. A running client may still hold its config, so
    /// nothing is swept then.
    pub fn new(mut supervisor: ProcessSupervisor, locations: LocationCache) -> Self {
        if supervisor.is_client_running() {
            debug!("client running, keeping temporary configs");
        } else {
            supervisor.temp_configs().sweep();
        }
        Self {
            supervisor,
            locations,
        }
    }

    pub fn check_installation(&mut self) -> bool {
        self.supervisor.locate()
    }

    pub fn supervisor(&self) -> &ProcessSupervisor {
        &self.supervisor
    }

    pub fn locations(&self) -> &LocationCache {
        &self.locations
    }

    pub fn is_client_running(&mut self) -> bool {
        self.supervisor.is_client_running()
    }

    pub fn connect(&mut self, server: &ServerInfo, settings: &Settings) -> ConnectOutcome {
        if self.supervisor.located_path().is_none() {
            warn!("cannot connect to {}: WireSock client not installed", server.id);
            return ConnectOutcome::NotInstalled;
        }
        info!("connecting to {} ({})", server.friendly_name, server.id);

        let reset = self.supervisor.stop();
        if !reset.is_success() {
            warn!("pre-connect reset incomplete: {reset}");
        }

        let policy = settings.split_tunnel_policy();
        let config_path = if policy.is_configured() {
            self.supervisor
                .temp_configs()
                .write_temporary(&server.config_path, &policy)
        } else {
            server.config_path.clone()
        };
        log_split_mode(&policy);

        let outcome = self.supervisor.start(&config_path);
        if outcome.is_success() {
            info!("connected to {}", server.friendly_name);
        } else {
            warn!("connection to {} failed: {outcome}", server.friendly_name);
        }
        outcome
    }

    pub fn disconnect(&mut self) -> StopOutcome {
        let outcome = self.supervisor.stop();
        info!("{outcome}");
        outcome
    }

    pub fn refresh_servers(&mut self, source_directory: &Path) -> Vec<ServerInfo> {
        scan_servers(source_directory, &mut self.locations)
    }

    /// Refetches the country database, then rescans with the new names.
    pub fn update_locations(&mut self, source_directory: &Path) -> Vec<ServerInfo> {
        self.locations.force_refresh();
        self.refresh_servers(source_directory)
    }
}

fn log_split_mode(policy: &SplitTunnelPolicy) {
    let processes = policy.effective_processes().join(", ");
    match policy.mode() {
        SplitTunnelMode::Include => {
            info!("include mode configured for: {processes}");
            info!("split tunneling enabled, only these processes use the VPN");
        }
        SplitTunnelMode::Exclude => {
            info!("exclude mode configured for: {processes}");
            info!("split tunneling enabled, these processes bypass the VPN");
        }
        SplitTunnelMode::Disabled => {}
    }
}
