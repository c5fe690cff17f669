use crate::config::types::{Config, LogicConfig, SeedUrl};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_db_path(&config.db.path)?;
    validate_logic(&config.logic)?;
    validate_seed_urls(&config.seed_urls)?;
    Ok(())
}

fn validate_db_path(path: &str) -> Result<(), ConfigError> {
    if path.is_empty() {
        return Err(ConfigError::Validation(
            "db.path cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_logic(logic: &LogicConfig) -> Result<(), ConfigError> {
    if logic.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "logic.user_agent cannot be empty".to_string(),
        ));
    }

    if logic.delay < 0.0 {
        return Err(ConfigError::Validation(format!(
            "logic.delay must be >= 0, got {}",
            logic.delay
        )));
    }

    if logic.max_documents < 1 {
        return Err(ConfigError::Validation(format!(
            "logic.max_documents must be >= 1, got {}",
            logic.max_documents
        )));
    }

    Ok(())
}

fn validate_seed_urls(seeds: &[SeedUrl]) -> Result<(), ConfigError> {
    for seed in seeds {
        let url = Url::parse(&seed.url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", seed.url, e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::Validation(format!(
                "Seed URL '{}' must use an http(s) scheme",
                seed.url
            )));
        }

        if seed.source.is_empty() {
            return Err(ConfigError::Validation(format!(
                "Seed URL '{}' has an empty source label",
                seed.url
            )));
        }
    }

    Ok(())
}
