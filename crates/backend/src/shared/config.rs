use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory of the compiled frontend bundle.
    pub static_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub bucket: String,
    pub region: String,
    /// Prepended to presigned upload keys, e.g. `uploads/`.
    #[serde(default)]
    pub key_prefix: String,
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 3000
static_dir = "dist"

[storage]
bucket = "knowledge-base-assistant"
region = "us-east-1"
key_prefix = ""
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
///
/// Environment variables are applied on top of either source.
pub fn load_config() -> anyhow::Result<Config> {
    let mut config = read_config_file()?;
    apply_overrides(&mut config, |name| std::env::var(name).ok())?;
    Ok(config)
}

fn read_config_file() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

/// `AWS_REGION`, `AWS_S3_BUCKET`, `AWS_S3_BUCKET_FOLDER` and `PORT` win over
/// the file. Empty values are ignored.
pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> anyhow::Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(region) = lookup("AWS_REGION") {
        config.storage.region = region;
    }
    if let Some(bucket) = lookup("AWS_S3_BUCKET") {
        config.storage.bucket = bucket;
    }
    if let Some(prefix) = lookup("AWS_S3_BUCKET_FOLDER") {
        config.storage.key_prefix = prefix;
    }
    if let Some(port) = lookup("PORT") {
        config.server.port = port
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid PORT '{}': {}", port, e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn default_config() -> Config {
        toml::from_str(DEFAULT_CONFIG).unwrap()
    }

    #[test]
    fn test_default_config_loads() {
        let config: Result<Config, _> = toml::from_str(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.static_dir, "dist");
        assert_eq!(config.storage.key_prefix, "");
    }

    #[test]
    fn test_environment_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("AWS_REGION", "eu-west-1"),
            ("AWS_S3_BUCKET", "docs"),
            ("AWS_S3_BUCKET_FOLDER", "uploads/"),
            ("PORT", "8080"),
        ]);
        let mut config = default_config();
        apply_overrides(&mut config, |k| env.get(k).map(|v| v.to_string())).unwrap();

        assert_eq!(config.storage.region, "eu-west-1");
        assert_eq!(config.storage.bucket, "docs");
        assert_eq!(config.storage.key_prefix, "uploads/");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_blank_override_keeps_file_value() {
        let mut config = default_config();
        apply_overrides(&mut config, |k| (k == "AWS_REGION").then(|| " ".to_string())).unwrap();
        assert_eq!(config.storage.region, "us-east-1");
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        let mut config = default_config();
        let result = apply_overrides(&mut config, |k| (k == "PORT").then(|| "http".to_string()));
        assert!(result.is_err());
    }
}
