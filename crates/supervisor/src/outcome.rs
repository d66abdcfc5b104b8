use std::fmt;
use std::path::PathBuf;

/// Result of a connection attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectOutcome {
    Connected { config_path: PathBuf, pid: u32 },
    NotInstalled,
    LaunchFailed,
    VerificationFailed,
}

impl ConnectOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ConnectOutcome::Connected { .. })
    }
}

impl fmt::Display for ConnectOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectOutcome::Connected { pid, .. } => write!(f, "connected (client pid {pid})"),
            ConnectOutcome::NotInstalled => write!(f, "WireSock client is not installed"),
            ConnectOutcome::LaunchFailed => write!(f, "failed to launch WireSock client"),
            ConnectOutcome::VerificationFailed => {
                write!(f, "WireSock client did not stay running")
            }
        }
    }
}

/// Result of tearing down client processes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    Stopped { terminated: usize },
    EnumerationFailed,
}

impl StopOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, StopOutcome::Stopped { .. })
    }
}

impl fmt::Display for StopOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopOutcome::Stopped { terminated: 0 } => write!(f, "disconnected (nothing running)"),
            StopOutcome::Stopped { terminated } => {
                write!(f, "disconnected ({terminated} process(es) terminated)")
            }
            StopOutcome::EnumerationFailed => write!(f, "could not list running processes"),
        }
    }
}
