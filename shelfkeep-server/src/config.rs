//! Server configuration from the environment

use std::net::SocketAddr;
use std::path::PathBuf;

const DEFAULT_DATA_PATH: &str = "./shelfkeep_data";
const DEFAULT_ADDR: &str = "127.0.0.1:3000";
const CATALOG_FILE: &str = "library.json";

/// Runtime settings for the server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Directory holding the catalog file
    pub data_path: PathBuf,

    /// Address to listen on
    pub addr: SocketAddr,

    /// Comma-separated allowed origins, or "*" for any
    pub cors_origins: Option<String>,
}

impl ServerConfig {
    /// Read `SHELFKEEP_DATA_PATH`, `SHELFKEEP_ADDR` and `SHELFKEEP_CORS_ORIGINS`
    pub fn from_env() -> anyhow::Result<Self> {
        let data_path = std::env::var("SHELFKEEP_DATA_PATH")
            .unwrap_or_else(|_| DEFAULT_DATA_PATH.to_string());
        let addr = std::env::var("SHELFKEEP_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
        let addr = addr
            .parse::<SocketAddr>()
            .map_err(|e| anyhow::anyhow!("Invalid SHELFKEEP_ADDR '{}': {}", addr, e))?;

        Ok(Self {
            data_path: PathBuf::from(data_path),
            addr,
            cors_origins: std::env::var("SHELFKEEP_CORS_ORIGINS").ok(),
        })
    }

    /// Path of the catalog file inside the data directory
    pub fn catalog_path(&self) -> PathBuf {
        self.data_path.join(CATALOG_FILE)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            cors_origins: None,
        }
    }
}
