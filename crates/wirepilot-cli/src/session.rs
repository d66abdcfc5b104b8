use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use locations::LocationCache;
use orchestrator::Orchestrator;
use supervisor::{matches_image, ProcessSupervisor, ProcessTable, SysinfoTable};
use tracing::debug;

use wirepilot_core::{ConfigPaths, Settings};

const BINARY_NAME: &str = "wirepilot";

/// App paths under `data_dir`, or the platform data directory, created if
/// missing.
pub fn resolve_paths(data_dir: Option<PathBuf>) -> Result<ConfigPaths> {
    let paths = match data_dir {
        Some(dir) => ConfigPaths::from_data_dir(&dir),
        None => ConfigPaths::resolve()?,
    };
    paths.ensure_dirs()?;
    Ok(paths)
}

/// Paths and settings for one CLI invocation.
pub struct Session {
    pub paths: ConfigPaths,
    pub settings: Settings,
}

impl Session {
    pub fn load(paths: ConfigPaths) -> Self {
        let settings = Settings::load_or_default(&paths.settings_path);
        Self { paths, settings }
    }

    pub fn save_settings(&self) -> Result<()> {
        self.settings
            .save(&self.paths.settings_path)
            .with_context(|| format!("save settings to {}", self.paths.settings_path.display()))
    }

    pub fn orchestrator(&self) -> Result<Orchestrator> {
        let locations = LocationCache::with_http_sources(self.paths.cache_file.clone())
            .context("set up location lookups")?;
        let supervisor = ProcessSupervisor::new(&self.settings.wire_sock_path);
        Ok(Orchestrator::new(supervisor, locations))
    }

    /// Refuses to continue while another wirepilot process is running.
    pub fn ensure_single_instance(&self) -> Result<()> {
        check_single_instance(&mut SysinfoTable::new(), std::process::id(), BINARY_NAME)
    }
}

fn check_single_instance(table: &mut dyn ProcessTable, own: u32, image: &str) -> Result<()> {
    let others = table
        .list()?
        .into_iter()
        .filter(|entry| entry.pid != own && matches_image(&entry.name, image))
        .count();
    if others > 0 {
        bail!("another wirepilot instance is already running");
    }
    debug!("no other wirepilot instance running");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use supervisor::{ProcessEntry, SupervisorError};

    struct StaticTable(Vec<ProcessEntry>);

    impl ProcessTable for StaticTable {
        fn list(&mut self) -> Result<Vec<ProcessEntry>, SupervisorError> {
            Ok(self.0.clone())
        }

        fn terminate(&mut self, _pid: u32) -> Result<(), SupervisorError> {
            Ok(())
        }
    }

    #[test]
    fn test_single_instance_ignores_own_process() {
        let mut table = StaticTable(vec![
            ProcessEntry::new(1, "init"),
            ProcessEntry::new(40, "wirepilot"),
        ]);
        assert!(check_single_instance(&mut table, 40, BINARY_NAME).is_ok());
    }

    #[test]
    fn test_single_instance_rejects_second_process() {
        let mut table = StaticTable(vec![
            ProcessEntry::new(40, "wirepilot"),
            ProcessEntry::new(41, "wirepilot.exe"),
        ]);
        let err = check_single_instance(&mut table, 40, BINARY_NAME).unwrap_err();
        assert!(err.to_string().contains("already running"));
    }

    // The test harness runs on several threads, all under this image name.
    #[test]
    fn test_single_instance_passes_on_live_table_with_only_this_process() {
        let mut table = SysinfoTable::new();
        let own = std::process::id();
        let image = table
            .list()
            .unwrap()
            .into_iter()
            .find(|entry| entry.pid == own)
            .map(|entry| entry.name)
            .unwrap();
        assert!(check_single_instance(&mut table, own, &image).is_ok());
    }
}
