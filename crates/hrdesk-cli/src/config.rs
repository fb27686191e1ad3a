use anyhow::anyhow;
use hrdesk_client::ClientConfig;
use hrdesk_logging::LogFormat;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Default config template created when no config exists
const DEFAULT_CONFIG: &str = r#"
[server]
base_url = "http://localhost:5000"  # Set via HRDESK_BASE_URL env var
# timeout_secs = 30  # Omit to wait for the server indefinitely

[database]
path = "hrdesk.db"  # Local employee directory; set via HRDESK_DATABASE env var

[logging]
level = "warn"  # trace, debug, info, warn, error
format = "pretty"  # pretty or json

[session]
# manager_id = 4  # Catalog owner; defaults to the logged-in manager
"#;

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SessionConfig {
    pub manager_id: Option<i64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ClientConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

type Builder = config::ConfigBuilder<config::builder::DefaultState>;

impl Config {
    /// Get the global config path: ~/.hrdesk/hrdesk.toml
    fn global_config_path() -> anyhow::Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not find home directory"))?;
        Ok(home.join(".hrdesk").join("hrdesk.toml"))
    }

    /// Ensure global config directory and file exist, creating defaults if needed
    fn ensure_global_config() -> anyhow::Result<PathBuf> {
        let config_path = Self::global_config_path()?;
        let config_dir = config_path
            .parent()
            .ok_or_else(|| anyhow!("Config path has no parent directory"))?;

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
            eprintln!("Created config directory: {}", config_dir.display());
        }

        if !config_path.exists() {
            fs::write(&config_path, DEFAULT_CONFIG.trim())?;
            eprintln!("Created default config: {}", config_path.display());
        }

        Ok(config_path)
    }

    /// Load configuration with layered approach:
    /// 1. Global config: ~/.hrdesk/hrdesk.toml (auto-created if missing)
    /// 2. Local override: ./hrdesk.toml (optional)
    /// 3. Environment variables with the HRDESK__ prefix
    /// 4. HRDESK_BASE_URL and HRDESK_DATABASE (highest priority)
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let global_config_path = Self::ensure_global_config()?;

        let builder = config::Config::builder()
            .add_source(config::File::from(global_config_path))
            .add_source(config::File::with_name("hrdesk").required(false))
            .add_source(config::Environment::with_prefix("HRDESK").separator("__"));

        let builder = apply_overrides(
            builder,
            env::var("HRDESK_BASE_URL").ok(),
            env::var("HRDESK_DATABASE").ok(),
        )?;

        Ok(builder.build()?.try_deserialize()?)
    }
}

fn apply_overrides(
    mut builder: Builder,
    base_url: Option<String>,
    database: Option<String>,
) -> anyhow::Result<Builder> {
    if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
        builder = builder.set_override("server.base_url", url)?;
    }
    if let Some(path) = database.filter(|p| !p.trim().is_empty()) {
        builder = builder.set_override("database.path", path)?;
    }
    Ok(builder)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn from_default(base_url: Option<&str>, database: Option<&str>) -> Config {
        let builder = config::Config::builder().add_source(config::File::from_str(
            DEFAULT_CONFIG,
            config::FileFormat::Toml,
        ));
        apply_overrides(builder, base_url.map(String::from), database.map(String::from))
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_default_template_parses() {
        let config = from_default(None, None);
        assert_eq!(config.server.base_url, "http://localhost:5000");
        assert_eq!(config.server.timeout_secs, None);
        assert_eq!(config.database.path, "hrdesk.db");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.session.manager_id, None);
    }

    #[test]
    fn test_convenience_overrides_win() {
        let config = from_default(Some("https://hr.example.com"), Some("/tmp/hr.db"));
        assert_eq!(config.server.base_url, "https://hr.example.com");
        assert_eq!(config.database.path, "/tmp/hr.db");
    }

    #[test]
    fn test_blank_overrides_are_ignored() {
        let config = from_default(Some("  "), None);
        assert_eq!(config.server.base_url, "http://localhost:5000");
    }
}
