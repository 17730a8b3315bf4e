//! Runtime configuration loaded from environment variables.

use std::env;
use std::net::{IpAddr, SocketAddr};

use tracing::warn;

use crate::error::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 4000;

/// Where to listen and how to log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_format: LogFormat,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl Config {
    /// Reads `HOST`, `PORT` and `LOG_FORMAT`. Unset or unparsable values
    /// fall back to the defaults (`0.0.0.0`, `4000`, compact).
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let port = match get("PORT") {
            None => DEFAULT_PORT,
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warn!(value = %raw, "PORT is not a valid port, using {DEFAULT_PORT}");
                DEFAULT_PORT
            }),
        };

        let log_format = match get("LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Compact,
        };

        Self {
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned()),
            port,
            log_format,
        }
    }

    pub fn addr(&self) -> Result<SocketAddr, Error> {
        let ip: IpAddr = self.host.parse().map_err(|source| Error::Addr {
            addr: self.host.clone(),
            source,
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_listen_on_4000() {
        let cfg = Config::default();
        assert_eq!(cfg.addr().unwrap(), "0.0.0.0:4000".parse().unwrap());
        assert_eq!(cfg.log_format, LogFormat::Compact);
    }

    #[test]
    fn reads_overrides() {
        let cfg = config(&[("HOST", "127.0.0.1"), ("PORT", "8081"), ("LOG_FORMAT", "json")]);
        assert_eq!(cfg.addr().unwrap(), "127.0.0.1:8081".parse().unwrap());
        assert_eq!(cfg.log_format, LogFormat::Json);
    }

    #[test]
    fn bad_port_falls_back() {
        assert_eq!(config(&[("PORT", "http")]).port, DEFAULT_PORT);
    }

    #[test]
    fn bad_host_is_an_error() {
        let err = config(&[("HOST", "not an ip")]).addr().unwrap_err();
        assert!(err.to_string().contains("not an ip"));
    }
}
