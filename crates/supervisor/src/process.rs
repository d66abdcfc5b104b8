use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::SupervisorError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessEntry {
    pub pid: u32,
    pub name: String,
}

impl ProcessEntry {
    pub fn new(pid: u32, name: impl Into<String>) -> Self {
        Self {
            pid,
            name: name.into(),
        }
    }
}

/// The OS process list, as far as the supervisor needs it.
pub trait ProcessTable {
    fn list(&mut self) -> Result<Vec<ProcessEntry>, SupervisorError>;

    /// Kills `pid` and waits for it to exit. A pid that is already gone
    /// counts as terminated.
    fn terminate(&mut self, pid: u32) -> Result<(), SupervisorError>;
}

/// True when a process image name refers to `wanted`, ignoring case and a
/// trailing `.exe`.
pub fn matches_image(image: &str, wanted: &str) -> bool {
    image_stem(image) == image_stem(wanted)
}

fn image_stem(name: &str) -> String {
    let lower = name.trim().to_lowercase();
    match lower.strip_suffix(".exe") {
        Some(stem) => stem.to_string(),
        None => lower,
    }
}

pub struct SysinfoTable {
    system: System,
}

impl SysinfoTable {
    pub fn new() -> Self {
        Self {
            system: System::new(),
        }
    }
}

impl Default for SysinfoTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessTable for SysinfoTable {
    fn list(&mut self) -> Result<Vec<ProcessEntry>, SupervisorError> {
        self.system.refresh_processes(ProcessesToUpdate::All, true);
        let processes = self.system.processes();
        // Every live system has at least this process.
        if processes.is_empty() {
            return Err(SupervisorError::Enumeration(
                "no processes visible".to_string(),
            ));
        }
        // On Linux each thread is listed too, under its process's name.
        Ok(processes
            .iter()
            .filter(|(_, process)| process.thread_kind().is_none())
            .map(|(pid, process)| {
                ProcessEntry::new(pid.as_u32(), process.name().to_string_lossy())
            })
            .collect())
    }

    fn terminate(&mut self, pid: u32) -> Result<(), SupervisorError> {
        let pid = Pid::from_u32(pid);
        self.system
            .refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
        let Some(process) = self.system.process(pid) else {
            return Ok(());
        };
        if !process.kill() {
            return Err(SupervisorError::Terminate {
                pid: pid.as_u32(),
                name: process.name().to_string_lossy().into_owned(),
            });
        }
        process.wait();
        Ok(())
    }
}
