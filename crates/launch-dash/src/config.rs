//! Process configuration, read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

pub const DATA_VAR: &str = "LAUNCH_DASH_DATA";
pub const ADDR_VAR: &str = "LAUNCH_DASH_ADDR";
pub const FRONTEND_VAR: &str = "LAUNCH_DASH_FRONTEND";

pub const DEFAULT_DATA_PATH: &str = "spacex_launch_dash.csv";
pub const DEFAULT_ADDR: &str = "127.0.0.1:8050";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Frontend {
    /// Local HTTP server with a Plotly page.
    #[default]
    Web,
    /// egui window.
    Native,
}

impl FromStr for Frontend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "web" => Ok(Self::Web),
            "native" => Ok(Self::Native),
            other => bail!("unknown front end `{other}`, expected `web` or `native`"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashConfig {
    pub data_path: PathBuf,
    pub addr: SocketAddr,
    pub frontend: Frontend,
}

impl DashConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank keys take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let data_path = get(DATA_VAR)
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_PATH), PathBuf::from);
        let addr = get(ADDR_VAR)
            .as_deref()
            .unwrap_or(DEFAULT_ADDR)
            .parse::<SocketAddr>()
            .with_context(|| format!("{ADDR_VAR} must be a socket address such as {DEFAULT_ADDR}"))?;
        let frontend = match get(FRONTEND_VAR) {
            Some(value) => value
                .parse::<Frontend>()
                .with_context(|| format!("invalid {FRONTEND_VAR}"))?,
            None => Frontend::default(),
        };

        Ok(Self {
            data_path,
            addr,
            frontend,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<DashConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        DashConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.data_path, PathBuf::from("spacex_launch_dash.csv"));
        assert_eq!(cfg.addr, "127.0.0.1:8050".parse::<SocketAddr>().unwrap());
        assert_eq!(cfg.frontend, Frontend::Web);
    }

    #[test]
    fn test_overrides() {
        let cfg = config(&[
            (DATA_VAR, "/data/launches.csv"),
            (ADDR_VAR, "0.0.0.0:9000"),
            (FRONTEND_VAR, "Native"),
        ])
        .unwrap();
        assert_eq!(cfg.data_path, PathBuf::from("/data/launches.csv"));
        assert_eq!(cfg.addr.port(), 9000);
        assert_eq!(cfg.frontend, Frontend::Native);
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let cfg = config(&[(DATA_VAR, "  "), (FRONTEND_VAR, "")]).unwrap();
        assert_eq!(cfg.data_path, PathBuf::from(DEFAULT_DATA_PATH));
        assert_eq!(cfg.frontend, Frontend::Web);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(config(&[(ADDR_VAR, "localhost")]).is_err());
        assert!(config(&[(FRONTEND_VAR, "terminal")]).is_err());
    }
}
