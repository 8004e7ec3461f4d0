//! Configuration loader
//!
//! Builds a [`ClientConfig`] by layering sources, lowest precedence first:
//!
//! 1. Built-in defaults
//! 2. Config file (TOML or JSON, detected by extension)
//! 3. Environment variables
//!
//! ## Environment Variables
//! - `ORCHEX_AGENT_HOST`: agent base URL
//! - `ORCHEX_HMAC_SECRET`: shared signing secret
//! - `ORCHEX_HMAC_SKEW_SECS`: allowed clock drift for verification
//! - `ORCHEX_CONNECT_TIMEOUT_MS` / `ORCHEX_READ_TIMEOUT_MS` /
//!   `ORCHEX_WRITE_TIMEOUT_MS`: transport budget
//! - `ORCHEX_POLL_INTERVAL_MS`: pacing between wait probes
//! - `ORCHEX_MAX_WAIT_MS`: upper bound on polling
//!
//! ## File Locations
//! The loader probes `./orchex.toml`, `./orchex.json`, and
//! `./config/orchex.toml`, in that order.

use std::path::{Path, PathBuf};

use orchex_domain::{ClientConfig, OrchexError, Result};

/// Load configuration with the full layering strategy.
///
/// # Errors
/// Returns `OrchexError::Config` if a discovered file cannot be parsed or
/// an environment variable holds an invalid value.
pub fn load() -> Result<ClientConfig> {
    let mut config = match probe_config_paths().into_iter().find(|path| path.is_file()) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config file");
            load_from_file(&path)?
        }
        None => ClientConfig::default(),
    };
    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Load configuration from a specific file.
///
/// # Errors
/// Returns `OrchexError::Config` if the file cannot be read, has an
/// unsupported extension, or fails to parse.
pub fn load_from_file(path: &Path) -> Result<ClientConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|err| OrchexError::Config(format!("failed to read config file: {err}")))?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(&content)
            .map_err(|err| OrchexError::Config(format!("failed to parse TOML config: {err}"))),
        Some("json") => serde_json::from_str(&content)
            .map_err(|err| OrchexError::Config(format!("failed to parse JSON config: {err}"))),
        other => Err(OrchexError::Config(format!(
            "unsupported config extension {other:?} for {}",
            path.display()
        ))),
    }
}

/// Candidate config file paths, highest priority first.
#[must_use]
pub fn probe_config_paths() -> Vec<PathBuf> {
    vec![
        PathBuf::from("./orchex.toml"),
        PathBuf::from("./orchex.json"),
        PathBuf::from("./config/orchex.toml"),
    ]
}

fn apply_env_overrides(config: &mut ClientConfig) -> Result<()> {
    if let Ok(host) = std::env::var("ORCHEX_AGENT_HOST") {
        config.host_base = host;
    }
    if let Ok(secret) = std::env::var("ORCHEX_HMAC_SECRET") {
        config.hmac_secret = secret;
    }
    if let Some(skew) = env_u64("ORCHEX_HMAC_SKEW_SECS")? {
        config.hmac_skew_secs = skew;
    }
    if let Some(connect) = env_u64("ORCHEX_CONNECT_TIMEOUT_MS")? {
        config.timeouts.connect_ms = connect;
    }
    if let Some(read) = env_u64("ORCHEX_READ_TIMEOUT_MS")? {
        config.timeouts.read_ms = read;
    }
    if let Some(write) = env_u64("ORCHEX_WRITE_TIMEOUT_MS")? {
        config.timeouts.write_ms = write;
    }
    if let Some(interval) = env_u64("ORCHEX_POLL_INTERVAL_MS")? {
        config.poll_interval_ms = interval;
    }
    if let Some(max_wait) = env_u64("ORCHEX_MAX_WAIT_MS")? {
        config.max_wait_ms = max_wait;
    }
    Ok(())
}

fn env_u64(name: &str) -> Result<Option<u64>> {
    match std::env::var(name) {
        Ok(value) => value
            .parse::<u64>()
            .map(Some)
            .map_err(|err| OrchexError::Config(format!("invalid {name}: {err}"))),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn toml_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orchex.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            "host_base = \"http://agent.internal:9000\"\n\
             hmac_secret = \"file-secret\"\n\n\
             [timeouts]\n\
             connect_ms = 100\n\
             read_ms = 200\n\
             write_ms = 300\n"
        )
        .unwrap();

        let config = load_from_file(&path).unwrap();
        assert_eq!(config.host_base, "http://agent.internal:9000");
        assert_eq!(config.hmac_secret, "file-secret");
        assert_eq!(config.timeouts.connect_ms, 100);
        // Untouched fields keep their defaults.
        assert_eq!(config.max_wait_ms, 30_000);
    }

    #[test]
    fn json_file_is_supported_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orchex.json");
        std::fs::write(&path, r#"{"poll_interval_ms": 250}"#).unwrap();

        let config = load_from_file(&path).unwrap();
        assert_eq!(config.poll_interval_ms, 250);
    }

    #[test]
    fn unsupported_extension_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orchex.yaml");
        std::fs::write(&path, "host_base: nope").unwrap();

        assert!(matches!(load_from_file(&path), Err(OrchexError::Config(_))));
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orchex.toml");
        std::fs::write(&path, "host_base = [broken").unwrap();

        assert!(matches!(load_from_file(&path), Err(OrchexError::Config(_))));
    }

    #[test]
    fn env_overrides_beat_defaults() {
        // Var names unique to this test so parallel tests cannot clash.
        std::env::set_var("ORCHEX_HMAC_SKEW_SECS", "60");
        std::env::set_var("ORCHEX_READ_TIMEOUT_MS", "750");

        let mut config = ClientConfig::default();
        apply_env_overrides(&mut config).unwrap();
        assert_eq!(config.hmac_skew_secs, 60);
        assert_eq!(config.timeouts.read_ms, 750);

        std::env::remove_var("ORCHEX_HMAC_SKEW_SECS");
        std::env::remove_var("ORCHEX_READ_TIMEOUT_MS");
    }

    #[test]
    fn invalid_numeric_env_is_a_config_error() {
        std::env::set_var("ORCHEX_MAX_WAIT_MS", "soon");

        let mut config = ClientConfig::default();
        let result = apply_env_overrides(&mut config);
        assert!(matches!(result, Err(OrchexError::Config(_))));

        std::env::remove_var("ORCHEX_MAX_WAIT_MS");
    }
}
