use anyhow::Result;

use crate::session::Session;

#[derive(Debug)]
pub enum AppsAction {
    List,
    AddInclude { name: String },
    RemoveInclude { name: String },
    AddExclude { name: String },
    RemoveExclude { name: String },
}

pub fn execute(session: &mut Session, action: AppsAction) -> Result<()> {
    let settings = &mut session.settings;
    let changed = match &action {
        AppsAction::List => {
            print_list("Include (only these use the VPN)", &settings.include_processes);
            print_list("Exclude (these bypass the VPN)", &settings.exclude_processes);
            if !settings.include_processes.is_empty() && !settings.exclude_processes.is_empty() {
                println!("Include list has entries, so the exclude list is ignored.");
            }
            return Ok(());
        }
        AppsAction::AddInclude { name } => settings.add_include(name),
        AppsAction::RemoveInclude { name } => settings.remove_include(name),
        AppsAction::AddExclude { name } => settings.add_exclude(name),
        AppsAction::RemoveExclude { name } => settings.remove_exclude(name),
    };

    if !changed {
        println!("Nothing to change.");
        return Ok(());
    }
    session.save_settings()?;
    println!("Process lists updated.");
    Ok(())
}

fn print_list(title: &str, entries: &[String]) {
    println!("{title}:");
    if entries.is_empty() {
        println!("  (none)");
    }
    for entry in entries {
        println!("  {entry}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::resolve_paths;
    use tempfile::TempDir;
    use wirepilot_core::Settings;

    #[test]
    fn test_edits_are_persisted() {
        let dir = TempDir::new().unwrap();
        let mut session = Session::load(resolve_paths(Some(dir.path().to_path_buf())).unwrap());

        execute(&mut session, AppsAction::AddExclude { name: "steam.exe".into() }).unwrap();
        execute(&mut session, AppsAction::AddInclude { name: "game.exe".into() }).unwrap();
        execute(&mut session, AppsAction::AddInclude { name: "game.exe".into() }).unwrap();
        execute(&mut session, AppsAction::RemoveExclude { name: "steam.exe".into() }).unwrap();

        let stored = Settings::load(&session.paths.settings_path).unwrap();
        assert_eq!(stored.include_processes, vec!["game.exe".to_string()]);
        assert!(stored.exclude_processes.is_empty());
    }
}
