//! Process-level configuration.
//!
//! There is deliberately no configuration file: the service is stateless,
//! so every knob is an environment variable with a default, read once at
//! startup.

use std::path::PathBuf;

/// Server configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server binds to (`BIND_ADDR`).
    pub bind_addr: String,
    /// Directory served as the static frontend (`STATIC_DIR`).
    pub static_dir: PathBuf,
    /// Upper bound on request bodies, uploads included (`MAX_UPLOAD_BYTES`).
    pub max_upload_bytes: usize,
}

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_STATIC_DIR: &str = "./static";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl AppConfig {
    /// Read configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            static_dir: std::env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            max_upload_bytes: parse_upload_limit(std::env::var("MAX_UPLOAD_BYTES").ok()),
        }
    }
}

/// Parse an upload limit override; ignores unparseable or zero values.
fn parse_upload_limit(raw: Option<String>) -> usize {
    raw.and_then(|s| s.trim().parse().ok())
        .filter(|&n| n > 0)
        .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.bind_addr, "0.0.0.0:3000");
        assert_eq!(config.static_dir, PathBuf::from("./static"));
        assert_eq!(config.max_upload_bytes, 25 * 1024 * 1024);
    }

    #[test]
    fn test_parse_upload_limit_valid() {
        assert_eq!(parse_upload_limit(Some("1024".to_string())), 1024);
    }

    #[test]
    fn test_parse_upload_limit_rejects_garbage_and_zero() {
        assert_eq!(parse_upload_limit(None), DEFAULT_MAX_UPLOAD_BYTES);
        assert_eq!(
            parse_upload_limit(Some("banana".to_string())),
            DEFAULT_MAX_UPLOAD_BYTES
        );
        assert_eq!(
            parse_upload_limit(Some("0".to_string())),
            DEFAULT_MAX_UPLOAD_BYTES
        );
    }
}
