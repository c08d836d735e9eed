mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Smallest body that can hold a BIF header plus its terminator.
const MIN_BIF_BYTES: u64 = 64 + 8;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config = parse_config(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    tracing::debug!("Loaded config from {:?}", path);
    Ok(config)
}

/// Parse and validate configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content)?;
    validate_config(&config)?;
    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./trickplay.toml",
        "~/.config/trickplay/config.toml",
        "/etc/trickplay/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
fn validate_config(config: &Config) -> Result<()> {
    if config.http.timeout_secs == 0 {
        anyhow::bail!("HTTP timeout cannot be 0");
    }

    if config.http.max_bif_bytes < MIN_BIF_BYTES {
        anyhow::bail!(
            "max_bif_bytes must be at least {} bytes, got {}",
            MIN_BIF_BYTES,
            config.http.max_bif_bytes
        );
    }

    if let Some(base_url) = &config.thumbnails.base_url {
        if base_url.trim().is_empty() {
            tracing::warn!("thumbnails.base_url is empty, per-block thumbnails disabled");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.http.timeout_secs, 30);
        assert_eq!(config.http.max_bif_bytes, 64 * 1024 * 1024);
        assert!(config.http.user_agent.starts_with("trickplay/"));
        assert!(config.thumbnails.base_url.is_none());
    }

    #[test]
    fn test_parse_full() {
        let config = parse_config(
            r#"
            [http]
            timeout_secs = 5
            user_agent = "tv-client/2.0"
            max_bif_bytes = 1048576

            [thumbnails]
            base_url = "https://cdn.example/thumbs/title-42/"
            "#,
        )
        .unwrap();

        assert_eq!(config.http.timeout_secs, 5);
        assert_eq!(config.http.user_agent, "tv-client/2.0");
        assert_eq!(config.http.max_bif_bytes, 1_048_576);
        assert_eq!(
            config.thumbnails.base_url.as_deref(),
            Some("https://cdn.example/thumbs/title-42/")
        );
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = parse_config("[http]\ntimeout_secs = 0\n").unwrap_err();
        assert!(err.to_string().contains("timeout"));
    }

    #[test]
    fn test_tiny_body_limit_rejected() {
        assert!(parse_config("[http]\nmax_bif_bytes = 16\n").is_err());
        assert!(parse_config("[http]\nmax_bif_bytes = 72\n").is_ok());
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trickplay.toml");
        std::fs::write(&path, "[thumbnails]\nbase_url = \"http://x/y\"\n").unwrap();

        let config = load_config_or_default(Some(path.as_path())).unwrap();
        assert_eq!(config.thumbnails.base_url.as_deref(), Some("http://x/y"));
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        assert!(load_config(&path).is_err());
    }
}
