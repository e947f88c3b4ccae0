use crate::language::ScriptCategory;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageConfig {
    pub metadata: MetadataConfig,
    pub terminators: TerminatorConfig,
    #[serde(default)]
    pub exceptions: ExceptionConfig,
    #[serde(default)]
    pub abbreviations: AbbreviationConfig,
    #[serde(default)]
    pub grammar: GrammarConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataConfig {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub category: ScriptCategory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerminatorConfig {
    pub chars: Vec<char>,
    #[serde(default)]
    pub ellipsis: Vec<char>,
    #[serde(default)]
    pub closers: Vec<char>,
    #[serde(default = "default_true")]
    pub require_trailing_space: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExceptionConfig {
    #[serde(default)]
    pub date_patterns: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AbbreviationConfig {
    #[serde(flatten)]
    pub categories: HashMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GrammarConfig {
    #[serde(default)]
    pub markers: Vec<String>,
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_config_deserialize() {
        let toml_str = r#"
            [metadata]
            code = "de"
            name = "German"
            aliases = ["german", "deutsch"]
            category = "whitespace"

            [terminators]
            chars = [".", "!", "?"]
            ellipsis = ["…"]
            closers = ["»", ")"]

            [exceptions]
            date_patterns = ['^\d{1,2}\.\d{1,2}\.\d{2,4}']

            [abbreviations]
            titles = ["Dr", "Prof"]
            common = ["z.B", "usw", "etc"]
        "#;

        let config: LanguageConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.metadata.code, "de");
        assert_eq!(config.metadata.category, ScriptCategory::Whitespace);
        assert_eq!(config.terminators.chars.len(), 3);
        assert!(config.terminators.require_trailing_space);
        assert_eq!(config.exceptions.date_patterns.len(), 1);
        assert_eq!(config.abbreviations.categories["common"].len(), 3);
        assert!(config.grammar.markers.is_empty());
    }

    #[test]
    fn test_non_whitespace_category() {
        let toml_str = r#"
            [metadata]
            code = "zh"
            name = "Chinese"
            category = "non_whitespace"

            [terminators]
            chars = ["。"]
            require_trailing_space = false

            [grammar]
            markers = ["了"]
        "#;

        let config: LanguageConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.metadata.category, ScriptCategory::NonWhitespace);
        assert!(!config.terminators.require_trailing_space);
        assert!(config.abbreviations.categories.is_empty());
        assert_eq!(config.grammar.markers, vec!["了".to_string()]);
    }
}
