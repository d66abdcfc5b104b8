use std::path::Path;

use locations::{city_name, LocationCache};
use tracing::{debug, warn};
use tunnel_config::CONFIG_EXTENSION;
use walkdir::WalkDir;
use wirepilot_core::ServerInfo;

const NAME_DELIMITER: char = '-';

/// `us-nyc-wg-3` becomes `United States - New York #3`. Stems with fewer
/// than four parts are returned as-is.
pub fn friendly_name(stem: &str, locations: &mut LocationCache) -> String {
    let parts: Vec<&str> = stem.split(NAME_DELIMITER).collect();
    if parts.len() < 4 {
        return stem.to_string();
    }
    let (country_code, city_code, serial) = (parts[0], parts[1], parts[3]);
    let country = locations.resolve_country_name(country_code);
    let city = city_name(country_code, city_code);
    format!("{country} - {city} #{serial}")
}

/// Every `*.conf` directly inside `dir`, sorted by friendly name.
pub fn scan_servers(dir: &Path, locations: &mut LocationCache) -> Vec<ServerInfo> {
    if !dir.is_dir() {
        debug!("source directory {} does not exist", dir.display());
        return Vec::new();
    }

    let mut servers = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("skipping unreadable entry in {}: {err}", dir.display());
                continue;
            }
        };
        let path = entry.path();
        let is_config = entry.file_type().is_file()
            && path
                .extension()
                .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(CONFIG_EXTENSION));
        if !is_config {
            continue;
        }

        let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
            warn!("skipping {}: file name is not valid UTF-8", path.display());
            continue;
        };
        let name = friendly_name(stem, locations);
        servers.push(ServerInfo::new(stem, name, path.to_path_buf()));
    }

    servers.sort_by(|a, b| a.friendly_name.cmp(&b.friendly_name));
    debug!("found {} server config(s) in {}", servers.len(), dir.display());
    servers
}

#[cfg(test)]
mod tests {
    use super::*;
    use locations::{CountryRecord, CountrySource, FetchError};
    use tempfile::TempDir;

    struct Unreachable;

    impl CountrySource for Unreachable {
        fn label(&self) -> &str {
            "unreachable"
        }

        fn fetch(&self) -> Result<Vec<CountryRecord>, FetchError> {
            Err(FetchError::Status {
                url: "fake://unreachable".to_string(),
                status: 500,
            })
        }
    }

    fn offline_cache(dir: &TempDir) -> LocationCache {
        LocationCache::new(
            dir.path().join("cache.json"),
            Box::new(Unreachable),
            Box::new(Unreachable),
        )
    }

    #[test]
    fn test_friendly_name_shapes() {
        let dir = TempDir::new().unwrap();
        let mut cache = offline_cache(&dir);
        assert_eq!(friendly_name("us-nyc-wg-3", &mut cache), "United States - New York #3");
        assert_eq!(friendly_name("gb-lon-wg-socks5-201", &mut cache), "United Kingdom - London #socks5");
        assert_eq!(friendly_name("us-nyc-wg", &mut cache), "us-nyc-wg");
        assert_eq!(friendly_name("custom", &mut cache), "custom");
        assert_eq!(friendly_name("xq-abc-wg-1", &mut cache), "XQ - ABC #1");
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_skips_non_utf8_names_and_keeps_going() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = TempDir::new().unwrap();
        let configs = dir.path().join("configs");
        std::fs::create_dir(&configs).unwrap();
        std::fs::write(configs.join(OsStr::from_bytes(b"\xff\xfe-bad.conf")), "").unwrap();
        std::fs::write(configs.join("us-nyc-wg-3.conf"), "").unwrap();
        let mut cache = offline_cache(&dir);

        let servers = scan_servers(&configs, &mut cache);
        assert_eq!(servers.len(), 1);
        assert_eq!(servers[0].id, "us-nyc-wg-3");
        assert_eq!(servers[0].config_path, configs.join("us-nyc-wg-3.conf"));
    }
}
