use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread::sleep;
use std::time::Duration;

use tracing::{debug, error, info, warn};
use tunnel_config::TempConfigs;

use crate::outcome::{ConnectOutcome, StopOutcome};
use crate::process::{matches_image, ProcessTable, SysinfoTable};
use crate::SupervisorError;

/// Known install locations, probed after the configured path.
pub const DEFAULT_INSTALL_PATHS: [&str; 10] = [
    r"C:\Program Files\WireSock Secure Connect\bin\wiresock-client.exe",
    r"C:\Program Files\WireSock VPN Client\bin\wiresock-client.exe",
    r"C:\Program Files (x86)\WireSock VPN Client\bin\wiresock-client.exe",
    r"C:\Program Files (x86)\WireSock Secure Connect\bin\wiresock-client.exe",
    r"C:\Program Files\WireSock VPN Client\WireSockUI.exe",
    r"C:\Program Files (x86)\WireSock VPN Client\WireSockUI.exe",
    r"C:\Program Files\WireSock Secure Connect\WireSockUI.exe",
    r"C:\Program Files (x86)\WireSock Secure Connect\WireSockUI.exe",
    r"C:\Program Files\WireSock VPN Client\WireSock.exe",
    r"C:\Program Files (x86)\WireSock VPN Client\WireSock.exe",
];

/// Every image name a WireSock client has shipped under.
pub const CLIENT_PROCESS_NAMES: [&str; 3] = ["WireSockUI", "wiresock", "wiresock-client"];

/// Image that must be running after a launch, whichever binary was started.
/// A located `WireSockUI.exe` that never spawns `wiresock-client` fails
/// verification.
pub const VERIFY_PROCESS_NAME: &str = "wiresock-client";

#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// Fixed waits around process start and teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delays {
    /// Before launching, after old clients were killed.
    pub launch_settle: Duration,
    /// After killing clients, before temporaries are swept.
    pub stop_settle: Duration,
    /// Between launch and the liveness check.
    pub verification: Duration,
}

impl Delays {
    pub const FIXED: Delays = Delays {
        launch_settle: Duration::from_secs(1),
        stop_settle: Duration::from_secs(3),
        verification: Duration::from_secs(3),
    };
}

impl Default for Delays {
    fn default() -> Self {
        Self::FIXED
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorState {
    Unknown,
    Located,
    Running,
    Stopped,
}

struct Termination {
    matched: usize,
    terminated: usize,
}

pub struct ProcessSupervisor {
    candidates: Vec<PathBuf>,
    located: Option<PathBuf>,
    state: SupervisorState,
    table: Box<dyn ProcessTable>,
    temp: TempConfigs,
    delays: Delays,
    child: Option<Child>,
}

impl ProcessSupervisor {
    /// Supervisor over the real process table and the system temp dir.
    pub fn new(configured_path: &Path) -> Self {
        Self::with_parts(
            configured_path,
            Box::new(SysinfoTable::new()),
            TempConfigs::system(),
        )
    }

    pub fn with_parts(
        configured_path: &Path,
        table: Box<dyn ProcessTable>,
        temp: TempConfigs,
    ) -> Self {
        let mut candidates = Vec::with_capacity(DEFAULT_INSTALL_PATHS.len() + 1);
        if !configured_path.as_os_str().is_empty() {
            candidates.push(configured_path.to_path_buf());
        }
        candidates.extend(DEFAULT_INSTALL_PATHS.iter().map(PathBuf::from));
        Self {
            candidates,
            located: None,
            state: SupervisorState::Unknown,
            table,
            temp,
            delays: Delays::FIXED,
            child: None,
        }
    }

    /// Replaces the fixed waits. Meant for tests.
    pub fn with_delays(mut self, delays: Delays) -> Self {
        self.delays = delays;
        self
    }

    pub fn state(&self) -> SupervisorState {
        self.state
    }

    pub fn located_path(&self) -> Option<&Path> {
        self.located.as_deref()
    }

    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    pub fn temp_configs(&self) -> &TempConfigs {
        &self.temp
    }

    /// Probes the candidate paths in order and keeps the first that exists.
    pub fn locate(&mut self) -> bool {
        match self.candidates.iter().find(|path| path.is_file()) {
            Some(path) => {
                info!("WireSock client found at {}", path.display());
                self.located = Some(path.clone());
                if self.state == SupervisorState::Unknown {
                    self.state = SupervisorState::Located;
                }
                true
            }
            None => {
                warn!("WireSock client not found in any known location");
                self.located = None;
                self.state = SupervisorState::Unknown;
                false
            }
        }
    }

    /// Any client image currently running, launched by us or not.
    pub fn is_client_running(&mut self) -> bool {
        match self.table.list() {
            Ok(entries) => entries.iter().any(|entry| {
                CLIENT_PROCESS_NAMES
                    .iter()
                    .any(|name| matches_image(&entry.name, name))
            }),
            Err(err) => {
                warn!("{err}");
                false
            }
        }
    }

    /// Launches the client on `config_path` and checks it came up. A launch
    /// that fails verification is killed before returning.
    pub fn start(&mut self, config_path: &Path) -> ConnectOutcome {
        let Some(executable) = self.located.clone() else {
            warn!("cannot start: WireSock client not located");
            return ConnectOutcome::NotInstalled;
        };

        // Temporaries are left alone here: the one about to be launched
        // may already be on disk.
        if let Err(err) = self.terminate_clients() {
            warn!("could not reset running clients: {err}");
        }
        sleep(self.delays.launch_settle);

        info!(
            "launching {} run -config {}",
            executable.display(),
            config_path.display()
        );
        let mut child = match launch(&executable, config_path) {
            Ok(child) => child,
            Err(err) => {
                error!("failed to launch {}: {err}", executable.display());
                self.state = SupervisorState::Stopped;
                return ConnectOutcome::LaunchFailed;
            }
        };
        let pid = child.id();

        sleep(self.delays.verification);

        let handle_alive = match child.try_wait() {
            Ok(None) => true,
            Ok(Some(status)) => {
                warn!("client exited early with {status}");
                false
            }
            Err(err) => {
                warn!("could not poll client: {err}");
                false
            }
        };
        self.child = Some(child);
        if !handle_alive {
            self.reap_child();
            self.state = SupervisorState::Stopped;
            return ConnectOutcome::VerificationFailed;
        }

        let verified = match self.table.list() {
            Ok(entries) => entries
                .iter()
                .any(|entry| matches_image(&entry.name, VERIFY_PROCESS_NAME)),
            Err(err) => {
                warn!("{err}");
                false
            }
        };
        if !verified {
            warn!("no {VERIFY_PROCESS_NAME} process after launch, killing pid {pid}");
            self.reap_child();
            self.state = SupervisorState::Stopped;
            return ConnectOutcome::VerificationFailed;
        }

        info!("client running with pid {pid}");
        self.state = SupervisorState::Running;
        ConnectOutcome::Connected {
            config_path: config_path.to_path_buf(),
            pid,
        }
    }

    /// Kills every client process, waits for adapters to settle and sweeps
    /// temporary configs. Only a failed process listing is a failure.
    pub fn stop(&mut self) -> StopOutcome {
        let termination = match self.terminate_clients() {
            Ok(termination) => termination,
            Err(err) => {
                error!("{err}");
                return StopOutcome::EnumerationFailed;
            }
        };

        if termination.matched > 0 {
            sleep(self.delays.stop_settle);
        } else {
            debug!("no client processes running");
        }
        self.temp.sweep();

        if self.state != SupervisorState::Unknown {
            self.state = SupervisorState::Stopped;
        }
        StopOutcome::Stopped {
            terminated: termination.terminated,
        }
    }

    fn terminate_clients(&mut self) -> Result<Termination, SupervisorError> {
        self.reap_child();

        let entries = self.table.list()?;
        let matched: Vec<_> = entries
            .into_iter()
            .filter(|entry| {
                CLIENT_PROCESS_NAMES
                    .iter()
                    .any(|name| matches_image(&entry.name, name))
            })
            .collect();

        let mut terminated = 0;
        for entry in &matched {
            match self.table.terminate(entry.pid) {
                Ok(()) => {
                    info!("terminated {} (pid {})", entry.name, entry.pid);
                    terminated += 1;
                }
                Err(err) => warn!("{err}"),
            }
        }
        Ok(Termination {
            matched: matched.len(),
            terminated,
        })
    }

    /// Kills and waits on the process we launched ourselves, if still held.
    fn reap_child(&mut self) {
        let Some(mut child) = self.child.take() else {
            return;
        };
        if let Ok(None) = child.try_wait() {
            if let Err(err) = child.kill() {
                warn!("failed to kill launched client {}: {err}", child.id());
            }
        }
        if let Err(err) = child.wait() {
            warn!("failed to wait on launched client: {err}");
        }
    }
}

fn launch(executable: &Path, config_path: &Path) -> std::io::Result<Child> {
    let mut command = Command::new(executable);
    command
        .arg("run")
        .arg("-config")
        .arg(config_path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    #[cfg(windows)]
    {
        use std::os::windows::process::CommandExt;
        command.creation_flags(CREATE_NO_WINDOW);
    }
    command.spawn()
}
