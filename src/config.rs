//! Configuration module

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// File name of the classifier artifact inside the weights directory
pub const MODEL_FILE_NAME: &str = "clf_iris.json";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Listen address
    pub host: IpAddr,

    /// Server port
    pub port: u16,

    /// Directory holding the classifier artifact
    pub weights_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8080,
            weights_dir: PathBuf::from("weights/"),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            host: env::var("HOST")
                .ok()
                .and_then(|h| h.parse().ok())
                .unwrap_or(defaults.host),

            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),

            weights_dir: env::var("WEIGHTS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.weights_dir),
        }
    }

    /// Full path of the classifier artifact
    pub fn model_path(&self) -> PathBuf {
        self.weights_dir.join(MODEL_FILE_NAME)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
