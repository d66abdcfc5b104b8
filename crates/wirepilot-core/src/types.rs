use std::path::PathBuf;

/// One tunnel configuration found in the source directory.
///
/// Rebuilt on every scan; only `id` (the file stem) is stable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerInfo {
    pub id: String,
    pub friendly_name: String,
    pub config_path: PathBuf,
}

impl ServerInfo {
    pub fn new(id: impl Into<String>, friendly_name: impl Into<String>, config_path: PathBuf) -> Self {
        Self {
            id: id.into(),
            friendly_name: friendly_name.into(),
            config_path,
        }
    }
}

pub fn find_server<'a>(servers: &'a [ServerInfo], id: &str) -> Option<&'a ServerInfo> {
    servers.iter().find(|server| server.id == id)
}
