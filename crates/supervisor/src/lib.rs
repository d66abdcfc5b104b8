pub mod outcome;
pub mod process;
pub mod supervisor;

use thiserror::Error;

pub use outcome::{ConnectOutcome, StopOutcome};
pub use process::{matches_image, ProcessEntry, ProcessTable, SysinfoTable};
pub use supervisor::{
    Delays, ProcessSupervisor, SupervisorState, CLIENT_PROCESS_NAMES, DEFAULT_INSTALL_PATHS,
    VERIFY_PROCESS_NAME,
};

#[derive(Debug, Error)]
pub enum SupervisorError {
    #[error("process enumeration failed: {0}")]
    Enumeration(String),
    #[error("could not terminate {name} (pid {pid})")]
    Terminate { pid: u32, name: String },
}
