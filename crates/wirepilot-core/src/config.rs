use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::{ProjectDirs, UserDirs};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::CoreError;
use crate::split::SplitTunnelPolicy;

pub const DEFAULT_WIRESOCK_PATH: &str =
    r"C:\Program Files\WireSock VPN Client\bin\wiresock-client.exe";

/// User-facing settings, stored as `settings.json` in the data directory.
///
/// Keys are camelCase so files written by earlier releases keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub source_directory: PathBuf,
    pub wire_sock_path: PathBuf,
    pub auto_connect: bool,
    pub last_server_id: String,
    pub include_processes: Vec<String>,
    pub exclude_processes: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub data_dir: PathBuf,
    pub settings_path: PathBuf,
    pub configs_dir: PathBuf,
    pub cache_file: PathBuf,
    pub logs_dir: PathBuf,
    pub debug_log: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source_directory: default_source_directory(),
            wire_sock_path: PathBuf::from(DEFAULT_WIRESOCK_PATH),
            auto_connect: false,
            last_server_id: String::new(),
            include_processes: Vec::new(),
            exclude_processes: Vec::new(),
        }
    }
}

impl Settings {
    pub fn from_json_str(contents: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(contents).context("parse settings JSON")?;
        Ok(settings)
    }

    pub fn to_json_string(&self) -> Result<String> {
        let output = serde_json::to_string_pretty(self).context("render settings JSON")?;
        Ok(output)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("read settings at {}", path.display()))?;
        Self::from_json_str(&contents)
    }

    /// Loads settings, falling back to defaults when the file is missing or
    /// cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(settings) => settings,
            Err(err) => {
                warn!("settings at {} unusable, using defaults: {err:#}", path.display());
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create settings dir {}", parent.display()))?;
        }
        let contents = self.to_json_string()?;
        fs::write(path, contents)
            .with_context(|| format!("write settings at {}", path.display()))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.wire_sock_path.as_os_str().is_empty() {
            return Err(CoreError::InvalidSettings(
                "wireSockPath must not be empty".to_string(),
            ));
        }
        if self.source_directory.as_os_str().is_empty() {
            return Err(CoreError::InvalidSettings(
                "sourceDirectory must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn split_tunnel_policy(&self) -> SplitTunnelPolicy {
        SplitTunnelPolicy::new(self.include_processes.clone(), self.exclude_processes.clone())
    }

    /// Returns true when the entry was added.
    pub fn add_include(&mut self, name: &str) -> bool {
        let added = push_unique(&mut self.include_processes, name);
        if added && !self.exclude_processes.is_empty() {
            info!("include mode takes priority; exclude list is ignored while include list has entries");
        }
        added
    }

    pub fn add_exclude(&mut self, name: &str) -> bool {
        push_unique(&mut self.exclude_processes, name)
    }

    pub fn remove_include(&mut self, name: &str) -> bool {
        remove_entry(&mut self.include_processes, name)
    }

    pub fn remove_exclude(&mut self, name: &str) -> bool {
        remove_entry(&mut self.exclude_processes, name)
    }
}

impl ConfigPaths {
    pub fn resolve() -> Result<Self> {
        let project_dirs =
            ProjectDirs::from("io", "wirepilot", "wirepilot").ok_or(CoreError::NoProjectDirs)?;
        Ok(Self::from_data_dir(project_dirs.data_dir()))
    }

    pub fn from_data_dir(data_dir: &Path) -> Self {
        let configs_dir = data_dir.join("Configs");
        let logs_dir = data_dir.join("Logs");
        Self {
            data_dir: data_dir.to_path_buf(),
            settings_path: data_dir.join("settings.json"),
            cache_file: configs_dir.join("countries_cache.json"),
            debug_log: logs_dir.join("wirepilot_debug.log"),
            configs_dir,
            logs_dir,
        }
    }

    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in [&self.data_dir, &self.configs_dir, &self.logs_dir] {
            fs::create_dir_all(dir)
                .with_context(|| format!("create data dir {}", dir.display()))?;
        }
        Ok(())
    }
}

pub fn default_source_directory() -> PathBuf {
    UserDirs::new()
        .and_then(|dirs| dirs.document_dir().map(|docs| docs.join("WireGuard")))
        .unwrap_or_else(|| PathBuf::from("WireGuard"))
}

fn push_unique(list: &mut Vec<String>, name: &str) -> bool {
    let name = name.trim();
    if name.is_empty() || list.iter().any(|existing| existing == name) {
        return false;
    }
    list.push(name.to_string());
    true
}

fn remove_entry(list: &mut Vec<String>, name: &str) -> bool {
    let name = name.trim();
    let before = list.len();
    list.retain(|existing| existing != name);
    list.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_settings_roundtrip_on_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let mut settings = Settings::default();
        settings.last_server_id = "us-nyc-wg-3".to_string();
        settings.include_processes = vec!["game.exe".to_string()];
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_settings_reads_camel_case_keys() {
        let json = r#"{
            "sourceDirectory": "D:\\tunnels",
            "wireSockPath": "C:\\wiresock.exe",
            "autoConnect": true,
            "lastServerId": "de-fra-wg-1",
            "includeProcesses": ["firefox.exe"],
            "excludeProcesses": [],
            "themePreference": "Dark"
        }"#;
        let settings = Settings::from_json_str(json).unwrap();
        assert!(settings.auto_connect);
        assert_eq!(settings.last_server_id, "de-fra-wg-1");
        assert_eq!(settings.include_processes, vec!["firefox.exe".to_string()]);
        assert_eq!(settings.source_directory, PathBuf::from("D:\\tunnels"));
    }

    #[test]
    fn test_missing_keys_take_defaults() {
        let settings = Settings::from_json_str(r#"{"autoConnect": true}"#).unwrap();
        assert!(settings.auto_connect);
        assert_eq!(settings.wire_sock_path, PathBuf::from(DEFAULT_WIRESOCK_PATH));
        assert!(settings.include_processes.is_empty());
    }

    #[test]
    fn test_load_or_default_on_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(Settings::load_or_default(&path), Settings::default());
        assert_eq!(
            Settings::load_or_default(&dir.path().join("absent.json")),
            Settings::default()
        );
    }

    #[test]
    fn test_process_list_editing() {
        let mut settings = Settings::default();
        assert!(settings.add_exclude("steam.exe"));
        assert!(settings.add_include("  game.exe "));
        assert!(!settings.add_include("game.exe"));
        assert!(!settings.add_include("   "));
        assert_eq!(settings.include_processes, vec!["game.exe".to_string()]);

        assert!(settings.remove_include("game.exe"));
        assert!(!settings.remove_include("game.exe"));
        assert!(settings.remove_exclude("steam.exe"));
        assert!(settings.exclude_processes.is_empty());
    }

    #[test]
    fn test_validate_rejects_empty_client_path() {
        let mut settings = Settings::default();
        assert!(settings.validate().is_ok());
        settings.wire_sock_path = PathBuf::new();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_paths_layout() {
        let paths = ConfigPaths::from_data_dir(Path::new("/data/wirepilot"));
        assert_eq!(
            paths.cache_file,
            PathBuf::from("/data/wirepilot/Configs/countries_cache.json")
        );
        assert_eq!(
            paths.debug_log,
            PathBuf::from("/data/wirepilot/Logs/wirepilot_debug.log")
        );
        assert_eq!(paths.settings_path, PathBuf::from("/data/wirepilot/settings.json"));
    }
}
