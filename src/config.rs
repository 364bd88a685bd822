// Service configuration
// Uses the 'config' crate, with '.env' support through 'dotenv'

use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server_address: String,
    // Region tree to load instead of the embedded default
    pub regions_file: Option<String>,
}

impl Settings {
    pub fn new() -> Result<Self> {
        dotenv::dotenv().ok(); // Load .env file if present
        Self::from_file("config")
    }

    pub fn from_file(name: &str) -> Result<Self> {
        let builder = Config::builder()
            // Add default values
            .set_default("server_address", "0.0.0.0:80")?
            // Load from a configuration file (e.g., config.toml)
            .add_source(File::with_name(name).required(false))
            // Load from environment variables (e.g., APP_SERVER_ADDRESS, APP_REGIONS_FILE)
            .add_source(Environment::with_prefix("APP").prefix_separator("_"));

        let settings = builder.build()?.try_deserialize()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_config_file() {
        let settings = Settings::from_file("does-not-exist").unwrap();
        assert!(!settings.server_address.is_empty());
    }

    #[test]
    fn test_values_from_config_file() {
        let path = std::env::temp_dir().join(format!("offer_search_{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "server_address = \"127.0.0.1:9999\"").unwrap();
        writeln!(file, "regions_file = \"custom.json\"").unwrap();

        let name = path.to_str().unwrap().trim_end_matches(".toml").to_string();
        let settings = Settings::from_file(&name).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(settings.regions_file.as_deref(), Some("custom.json"));
    }
}
