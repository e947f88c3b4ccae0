use super::types::LanguageConfig;
use crate::error::DomainError;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Code of the profile used for unknown or absent languages
pub const FALLBACK_LANGUAGE_CODE: &str = "und";

static LANGUAGE_CONFIGS: OnceLock<HashMap<String, LanguageConfig>> = OnceLock::new();

macro_rules! embed_language_config {
    ($code:expr, $path:expr) => {
        ($code, include_str!($path))
    };
}

fn load_embedded_configs() -> Result<HashMap<String, LanguageConfig>, DomainError> {
    let mut configs = HashMap::new();

    let embedded_configs = [
        embed_language_config!("en", "../../../configs/languages/english.toml"),
        embed_language_config!("de", "../../../configs/languages/german.toml"),
        embed_language_config!("fr", "../../../configs/languages/french.toml"),
        embed_language_config!("es", "../../../configs/languages/spanish.toml"),
        embed_language_config!("zh", "../../../configs/languages/chinese.toml"),
        embed_language_config!("ja", "../../../configs/languages/japanese.toml"),
        embed_language_config!("und", "../../../configs/languages/generic.toml"),
    ];

    for (code, toml_content) in embedded_configs {
        let config = parse_language_config(toml_content)
            .map_err(|e| DomainError::ConfigurationError(format!("{code} config: {e}")))?;

        // Validate that the config code matches
        if config.metadata.code != code {
            return Err(DomainError::ConfigurationError(format!(
                "Config code mismatch: expected {}, got {}",
                code, config.metadata.code
            )));
        }

        configs.insert(code.to_string(), config);
    }

    Ok(configs)
}

fn embedded_configs() -> &'static HashMap<String, LanguageConfig> {
    LANGUAGE_CONFIGS
        .get_or_init(|| load_embedded_configs().expect("Failed to load embedded language configs"))
}

/// Parse a language configuration from TOML text
pub fn parse_language_config(toml_content: &str) -> Result<LanguageConfig, DomainError> {
    toml::from_str(toml_content)
        .map_err(|e| DomainError::ConfigurationError(format!("Failed to parse config: {e}")))
}

/// Get an embedded configuration by its canonical code
pub fn get_language_config(code: &str) -> Result<&'static LanguageConfig, DomainError> {
    embedded_configs()
        .get(code)
        .ok_or_else(|| DomainError::UnsupportedLanguage(code.to_string()))
}

/// Canonical codes of all embedded configurations, sorted
pub fn list_available_languages() -> Vec<&'static str> {
    let mut codes: Vec<&'static str> = embedded_configs().keys().map(|s| s.as_str()).collect();
    codes.sort_unstable();
    codes
}
