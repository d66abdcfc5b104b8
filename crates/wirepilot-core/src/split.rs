use std::fmt;

pub const ALLOWED_APPS_KEY: &str = "AllowedApps";
pub const DISALLOWED_APPS_KEY: &str = "DisallowedApps";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitTunnelMode {
    Disabled,
    Include,
    Exclude,
}

/// Which applications are routed through the tunnel.
///
/// A non-empty include list always wins; the exclude list only takes effect
/// when nothing is included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitTunnelPolicy {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl SplitTunnelPolicy {
    pub fn new(include: Vec<String>, exclude: Vec<String>) -> Self {
        Self { include, exclude }
    }

    pub fn is_configured(&self) -> bool {
        !self.include.is_empty() || !self.exclude.is_empty()
    }

    pub fn mode(&self) -> SplitTunnelMode {
        if !self.include.is_empty() {
            SplitTunnelMode::Include
        } else if !self.exclude.is_empty() {
            SplitTunnelMode::Exclude
        } else {
            SplitTunnelMode::Disabled
        }
    }

    pub fn effective_processes(&self) -> &[String] {
        match self.mode() {
            SplitTunnelMode::Include => &self.include,
            SplitTunnelMode::Exclude => &self.exclude,
            SplitTunnelMode::Disabled => &[],
        }
    }

    /// The single config line that expresses this policy, if any.
    pub fn directive(&self) -> Option<String> {
        let key = match self.mode() {
            SplitTunnelMode::Include => ALLOWED_APPS_KEY,
            SplitTunnelMode::Exclude => DISALLOWED_APPS_KEY,
            SplitTunnelMode::Disabled => return None,
        };
        Some(format!("{key} = {}", self.effective_processes().join(", ")))
    }
}

impl fmt::Display for SplitTunnelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            SplitTunnelMode::Disabled => "disabled",
            SplitTunnelMode::Include => "include",
            SplitTunnelMode::Exclude => "exclude",
        };
        write!(f, "{value}")
    }
}
