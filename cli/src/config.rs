use anyhow::{Context, Result};
use directories::ProjectDirs;

const DEFAULT_SERVER_URL: &str = "http://localhost:4000";

pub struct Config {
    pub server_url: String,
}

impl Config {
    /// Resolve the inventory service base URL: `PANTRY_SERVER_URL` env var,
    /// then a `server_url` file in the platform config directory, then the
    /// default local address.
    pub fn load() -> Result<Self> {
        if let Ok(url) = std::env::var("PANTRY_SERVER_URL") {
            let url = url.trim();
            if !url.is_empty() {
                return Ok(Self {
                    server_url: normalize_url(url),
                });
            }
        }

        let proj_dirs =
            ProjectDirs::from("", "", "pantry").context("Could not determine home directory")?;
        let path = proj_dirs.config_dir().join("server_url");
        if path.exists() {
            let url = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let url = url.trim();
            if !url.is_empty() {
                return Ok(Self {
                    server_url: normalize_url(url),
                });
            }
        }

        Ok(Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
        })
    }
}

fn normalize_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
