use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use uuid::Uuid;
use walkdir::WalkDir;
use wirepilot_core::SplitTunnelPolicy;

use crate::inject::inject_split_tunneling;
use crate::RewriteError;

pub const TEMP_PREFIX: &str = "wirepilot_temp_";
pub const CONFIG_EXTENSION: &str = "conf";

/// Temporary working configs under one directory, named
/// `<prefix><random>.conf`.
#[derive(Debug, Clone)]
pub struct TempConfigs {
    dir: PathBuf,
    prefix: String,
}

impl TempConfigs {
    /// Temporaries in the OS temp directory.
    pub fn system() -> Self {
        Self::in_dir(std::env::temp_dir())
    }

    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            prefix: TEMP_PREFIX.to_string(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn is_temporary(&self, path: &Path) -> bool {
        let name_matches = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with(&self.prefix));
        let extension_matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(CONFIG_EXTENSION));
        name_matches && extension_matches
    }

    fn fresh_path(&self) -> PathBuf {
        self.dir.join(format!(
            "{}{}.{}",
            self.prefix,
            Uuid::new_v4().simple(),
            CONFIG_EXTENSION
        ))
    }

    /// Writes `base` with `policy` applied to a fresh temporary file.
    ///
    /// Returns `base` itself if anything goes wrong, so the caller can
    /// still connect without split tunneling.
    pub fn write_temporary(&self, base: &Path, policy: &SplitTunnelPolicy) -> PathBuf {
        match self.try_write(base, policy) {
            Ok(path) => {
                info!("created temporary config {}", path.display());
                path
            }
            Err(err) => {
                warn!("{err}; using original config");
                base.to_path_buf()
            }
        }
    }

    fn try_write(&self, base: &Path, policy: &SplitTunnelPolicy) -> Result<PathBuf, RewriteError> {
        let text = fs::read_to_string(base).map_err(|source| RewriteError::Read {
            path: base.to_path_buf(),
            source,
        })?;
        let rewritten = if policy.is_configured() {
            inject_split_tunneling(&text, policy)
        } else {
            text
        };

        let path = self.fresh_path();
        fs::write(&path, rewritten).map_err(|source| RewriteError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    /// Deletes every temporary in the directory. Failures are logged and
    /// skipped. Returns how many files were removed.
    pub fn sweep(&self) -> usize {
        let mut removed = 0;
        let entries = WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| self.is_temporary(entry.path()));

        for entry in entries {
            match fs::remove_file(entry.path()) {
                Ok(()) => {
                    debug!("deleted temporary config {}", entry.path().display());
                    removed += 1;
                }
                Err(err) => warn!(
                    "failed to delete temporary config {}: {err}",
                    entry.path().display()
                ),
            }
        }

        if removed > 0 {
            info!("cleaned up {removed} temporary config(s)");
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn policy() -> SplitTunnelPolicy {
        SplitTunnelPolicy::new(vec!["game.exe".into()], Vec::new())
    }

    #[test]
    fn test_write_temporary_creates_prefixed_file() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("us-nyc-wg-1.conf");
        fs::write(&base, "[Peer]\nPublicKey = a\n").unwrap();
        let temps = TempConfigs::in_dir(dir.path().join("tmp"));
        fs::create_dir_all(temps.dir()).unwrap();

        let path = temps.write_temporary(&base, &policy());
        assert_ne!(path, base);
        assert!(temps.is_temporary(&path));
        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, "[Peer]\nPublicKey = a\nAllowedApps = game.exe\n");
        assert_eq!(fs::read_to_string(&base).unwrap(), "[Peer]\nPublicKey = a\n");
    }

    #[test]
    fn test_each_write_gets_a_new_name() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("base.conf");
        fs::write(&base, "[Peer]\n").unwrap();
        let temps = TempConfigs::in_dir(dir.path());

        let first = temps.write_temporary(&base, &policy());
        let second = temps.write_temporary(&base, &policy());
        assert_ne!(first, second);
    }

    #[test]
    fn test_missing_base_falls_back_to_base_path() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("missing.conf");
        let temps = TempConfigs::in_dir(dir.path());
        assert_eq!(temps.write_temporary(&base, &policy()), base);
    }

    #[test]
    fn test_unwritable_dir_falls_back_to_base_path() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("base.conf");
        fs::write(&base, "[Peer]\n").unwrap();
        let temps = TempConfigs::in_dir(dir.path().join("does-not-exist"));
        assert_eq!(temps.write_temporary(&base, &policy()), base);
    }

    #[test]
    fn test_sweep_only_removes_prefixed_configs() {
        let dir = TempDir::new().unwrap();
        let temps = TempConfigs::in_dir(dir.path());
        fs::write(dir.path().join("wirepilot_temp_a.conf"), "").unwrap();
        fs::write(dir.path().join("wirepilot_temp_b.CONF"), "").unwrap();
        fs::write(dir.path().join("wirepilot_temp_c.txt"), "").unwrap();
        fs::write(dir.path().join("us-nyc-wg-1.conf"), "").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("wirepilot_temp_d.conf"), "").unwrap();

        assert_eq!(temps.sweep(), 2);
        assert!(!dir.path().join("wirepilot_temp_a.conf").exists());
        assert!(dir.path().join("wirepilot_temp_c.txt").exists());
        assert!(dir.path().join("us-nyc-wg-1.conf").exists());
        assert!(dir.path().join("nested").join("wirepilot_temp_d.conf").exists());
        assert_eq!(temps.sweep(), 0);
    }

    #[test]
    fn test_sweep_skips_entries_it_cannot_delete() {
        let dir = TempDir::new().unwrap();
        let temps = TempConfigs::in_dir(dir.path());
        fs::create_dir(dir.path().join("wirepilot_temp_dir.conf")).unwrap();
        fs::write(dir.path().join("wirepilot_temp_a.conf"), "").unwrap();
        fs::write(dir.path().join("wirepilot_temp_b.conf"), "").unwrap();

        assert_eq!(temps.sweep(), 2);
        assert!(dir.path().join("wirepilot_temp_dir.conf").is_dir());
        assert!(!dir.path().join("wirepilot_temp_a.conf").exists());
        assert!(!dir.path().join("wirepilot_temp_b.conf").exists());
    }

    #[test]
    fn test_sweep_of_missing_dir_is_noop() {
        let dir = TempDir::new().unwrap();
        let temps = TempConfigs::in_dir(dir.path().join("gone"));
        assert_eq!(temps.sweep(), 0);
    }
}
