//! Runtime configuration.
//!
//! Values come from the environment (after `dotenv` has loaded `.env`);
//! command line flags override them in [`crate::cli`].

use std::net::SocketAddr;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_LOG_CONFIG: &str = "log4rs.yml";

/// Largest request body accepted by the service, in bytes.
pub const MAX_BODY_BYTES: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Address the HTTP service listens on.
    pub bind_addr: String,
    /// Optional CIDR list loaded into the collection at startup.
    pub seed_file: Option<String>,
    /// Base URL used by the client commands.
    pub server_url: String,
    /// Path of the log4rs configuration file.
    pub log_config: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            seed_file: None,
            server_url: DEFAULT_SERVER_URL.to_string(),
            log_config: DEFAULT_LOG_CONFIG.to_string(),
        }
    }
}

impl Config {
    /// Read `IP_RANGE_*` variables, falling back to defaults.
    pub fn from_env() -> Config {
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        Config {
            bind_addr: lookup("IP_RANGE_BIND_ADDR").unwrap_or(defaults.bind_addr),
            seed_file: lookup("IP_RANGE_SEED_FILE").filter(|s| !s.trim().is_empty()),
            server_url: lookup("IP_RANGE_SERVER_URL").unwrap_or(defaults.server_url),
            log_config: lookup("IP_RANGE_LOG_CONFIG").unwrap_or(defaults.log_config),
        }
    }

    /// Parsed listen address.
    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        self.bind_addr
            .parse()
            .map_err(|e| format!("Invalid bind address '{}': {e}", self.bind_addr))
    }
}
