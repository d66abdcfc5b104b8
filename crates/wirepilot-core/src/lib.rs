pub mod config;
pub mod error;
pub mod split;
pub mod types;

pub use config::{ConfigPaths, Settings};
pub use error::CoreError;
pub use split::{SplitTunnelMode, SplitTunnelPolicy};
pub use types::{find_server, ServerInfo};
