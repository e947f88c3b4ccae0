//! Compiled language profiles
//!
//! A [`LanguageProfile`] is the runtime form of a [`LanguageConfig`]: lookup
//! sets instead of lists and compiled date patterns instead of strings.

use super::config::loader::{
    get_language_config, list_available_languages, parse_language_config,
};
use super::config::LanguageConfig;
use super::ScriptCategory;
use crate::error::{DomainError, DomainResult};
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::{Arc, OnceLock};

static BUILTIN_PROFILES: OnceLock<HashMap<String, Arc<LanguageProfile>>> = OnceLock::new();

/// Segmentation and marker rules for one language
#[derive(Debug, Clone)]
pub struct LanguageProfile {
    code: String,
    name: String,
    aliases: Vec<String>,
    category: ScriptCategory,
    terminators: HashSet<char>,
    closers: HashSet<char>,
    require_trailing_space: bool,
    abbreviations: HashSet<String>,
    exact_abbreviations: HashSet<String>,
    numbered_abbreviations: HashSet<String>,
    date_patterns: Vec<Regex>,
    grammar_markers: HashSet<String>,
}

/// Abbreviation category matched with the exact case as written
pub const CASE_SENSITIVE_CATEGORY: &str = "case_sensitive";
/// Abbreviation category that only applies when a number follows
pub const BEFORE_NUMBER_CATEGORY: &str = "before_number";

fn strip_abbreviation(raw: &str) -> &str {
    raw.trim().trim_end_matches('.')
}

fn normalize_abbreviation(raw: &str) -> String {
    strip_abbreviation(raw).to_lowercase()
}

fn collect_abbreviations<'a>(
    entries: impl Iterator<Item = &'a String>,
    normalize: impl Fn(&str) -> String,
) -> HashSet<String> {
    entries
        .map(|abbr| normalize(abbr))
        .filter(|abbr| !abbr.is_empty())
        .collect()
}

impl LanguageProfile {
    /// Compile a profile from its configuration
    pub fn from_config(config: &LanguageConfig) -> DomainResult<Self> {
        let date_patterns = config
            .exceptions
            .date_patterns
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|source| DomainError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect::<DomainResult<Vec<_>>>()?;

        let categories = &config.abbreviations.categories;
        let abbreviations = collect_abbreviations(
            categories
                .iter()
                .filter(|(name, _)| {
                    name.as_str() != CASE_SENSITIVE_CATEGORY
                        && name.as_str() != BEFORE_NUMBER_CATEGORY
                })
                .flat_map(|(_, entries)| entries),
            normalize_abbreviation,
        );
        let exact_abbreviations = collect_abbreviations(
            categories.get(CASE_SENSITIVE_CATEGORY).into_iter().flatten(),
            |abbr| strip_abbreviation(abbr).to_string(),
        );
        let numbered_abbreviations = collect_abbreviations(
            categories.get(BEFORE_NUMBER_CATEGORY).into_iter().flatten(),
            normalize_abbreviation,
        );

        let terminators = config
            .terminators
            .chars
            .iter()
            .chain(config.terminators.ellipsis.iter())
            .copied()
            .collect();

        Ok(Self {
            code: config.metadata.code.to_lowercase(),
            name: config.metadata.name.clone(),
            aliases: config
                .metadata
                .aliases
                .iter()
                .map(|alias| alias.to_lowercase())
                .collect(),
            category: config.metadata.category,
            terminators,
            closers: config.terminators.closers.iter().copied().collect(),
            require_trailing_space: config.terminators.require_trailing_space,
            abbreviations,
            exact_abbreviations,
            numbered_abbreviations,
            date_patterns,
            grammar_markers: config
                .grammar
                .markers
                .iter()
                .map(|marker| marker.to_lowercase())
                .collect(),
        })
    }

    /// Parse and compile a profile from TOML text
    pub fn from_toml_str(toml_content: &str) -> DomainResult<Self> {
        Self::from_config(&parse_language_config(toml_content)?)
    }

    /// Parse and compile a profile from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> DomainResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Get a built-in profile by canonical code
    pub fn builtin(code: &str) -> DomainResult<Arc<Self>> {
        builtin_profiles()
            .get(code)
            .cloned()
            .ok_or_else(|| DomainError::UnsupportedLanguage(code.to_string()))
    }

    /// Canonical language code
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lower-cased alternative names and codes
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Script category driving tokenization
    pub fn category(&self) -> ScriptCategory {
        self.category
    }

    /// Whether the character ends a sentence (ellipsis included)
    pub fn is_terminator(&self, ch: char) -> bool {
        self.terminators.contains(&ch)
    }

    /// Whether the character is a closing quote or bracket kept after a terminator
    pub fn is_closer(&self, ch: char) -> bool {
        self.closers.contains(&ch)
    }

    /// Whether a boundary must be followed by whitespace or end of text
    pub fn requires_trailing_space(&self) -> bool {
        self.require_trailing_space
    }

    /// Abbreviation check; the trailing period is optional
    ///
    /// Ordinary categories match case-insensitively, the `case_sensitive`
    /// category only as written.
    pub fn is_abbreviation(&self, token: &str) -> bool {
        self.exact_abbreviations.contains(strip_abbreviation(token))
            || self.abbreviations.contains(&normalize_abbreviation(token))
    }

    /// Abbreviations such as "No" or "p" that only count before a number
    pub fn is_numbered_abbreviation(&self, token: &str) -> bool {
        self.numbered_abbreviations
            .contains(&normalize_abbreviation(token))
    }

    /// Whether a date pattern anchored at the start of `window` covers `offset`
    pub fn date_covers(&self, window: &str, offset: usize) -> bool {
        self.date_patterns.iter().any(|pattern| {
            pattern
                .find(window)
                .is_some_and(|m| m.start() == 0 && offset < m.end())
        })
    }

    /// Whether the token is a grammatical particle of this language
    pub fn is_grammar_marker(&self, token: &str) -> bool {
        !self.grammar_markers.is_empty() && self.grammar_markers.contains(&token.to_lowercase())
    }
}

fn builtin_profiles() -> &'static HashMap<String, Arc<LanguageProfile>> {
    BUILTIN_PROFILES.get_or_init(|| {
        list_available_languages()
            .into_iter()
            .map(|code| {
                let config = get_language_config(code).expect("embedded config is listed");
                let profile = LanguageProfile::from_config(config)
                    .expect("Failed to compile embedded language profile");
                (code.to_string(), Arc::new(profile))
            })
            .collect()
    })
}

/// All built-in profiles, sorted by code
pub fn builtin_profile_list() -> Vec<Arc<LanguageProfile>> {
    list_available_languages()
        .into_iter()
        .filter_map(|code| builtin_profiles().get(code).cloned())
        .collect()
}
