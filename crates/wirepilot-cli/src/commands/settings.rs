use std::path::PathBuf;

use anyhow::Result;
use clap::ValueEnum;
use tracing::warn;

use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

#[derive(Debug)]
pub enum SettingsAction {
    Show,
    SetSource { directory: PathBuf },
    SetClient { path: PathBuf },
    AutoConnect { state: Toggle },
}

pub fn execute(session: &mut Session, action: SettingsAction) -> Result<()> {
    match action {
        SettingsAction::Show => {
            println!("{}", session.settings.to_json_string()?);
            println!("Stored at {}", session.paths.settings_path.display());
            return Ok(());
        }
        SettingsAction::SetSource { directory } => {
            if !directory.is_dir() {
                warn!("{} is not a directory yet", directory.display());
            }
            session.settings.source_directory = directory;
        }
        SettingsAction::SetClient { path } => {
            if !path.is_file() {
                warn!("{} does not exist; default install paths will be probed", path.display());
            }
            session.settings.wire_sock_path = path;
        }
        SettingsAction::AutoConnect { state } => {
            session.settings.auto_connect = state == Toggle::On;
        }
    }

    session.settings.validate()?;
    session.save_settings()?;
    println!("Settings saved.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::resolve_paths;
    use tempfile::TempDir;
    use wirepilot_core::Settings;

    #[test]
    fn test_set_source_and_auto_connect() {
        let dir = TempDir::new().unwrap();
        let mut session = Session::load(resolve_paths(Some(dir.path().to_path_buf())).unwrap());
        let source = dir.path().join("tunnels");

        execute(&mut session, SettingsAction::SetSource { directory: source.clone() }).unwrap();
        execute(&mut session, SettingsAction::AutoConnect { state: Toggle::On }).unwrap();

        let stored = Settings::load(&session.paths.settings_path).unwrap();
        assert_eq!(stored.source_directory, source);
        assert!(stored.auto_connect);
    }

    #[test]
    fn test_empty_client_path_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut session = Session::load(resolve_paths(Some(dir.path().to_path_buf())).unwrap());
        let result = execute(&mut session, SettingsAction::SetClient { path: PathBuf::new() });
        assert!(result.is_err());
        assert!(!session.paths.settings_path.exists());
    }
}
