//! Working copies of tunnel configs with split-tunneling directives applied.

pub mod inject;
pub mod temp;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub use inject::inject_split_tunneling;
pub use temp::{TempConfigs, CONFIG_EXTENSION, TEMP_PREFIX};

#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("read base config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("write temporary config {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
