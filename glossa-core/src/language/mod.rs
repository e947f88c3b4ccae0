//! Language classification and language profiles
//!
//! [`LanguageClassifier`] maps whatever the caller calls a language ("en",
//! "German", "zh_Hant", "中文") to a canonical code and a [`ScriptCategory`].
//! Unknown or absent languages never fail: they fall back to the
//! whitespace-delimited category, which drives word-level tokenization.

pub mod config;
pub mod profile;

pub use config::loader::FALLBACK_LANGUAGE_CODE;
pub use config::LanguageConfig;
pub use profile::{builtin_profile_list, LanguageProfile};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

static ALIAS_TABLE: OnceLock<HashMap<String, String>> = OnceLock::new();

/// How words are delimited in a script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptCategory {
    /// Words separated by whitespace (Latin, Cyrillic, ...)
    Whitespace,
    /// No whitespace between words (CJK-style scripts)
    NonWhitespace,
}

impl ScriptCategory {
    /// Lower-case name
    pub fn as_str(&self) -> &'static str {
        match self {
            ScriptCategory::Whitespace => "whitespace",
            ScriptCategory::NonWhitespace => "non_whitespace",
        }
    }
}

/// Result of classifying a language name or code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Canonical code for known languages, normalized input otherwise
    pub code: String,
    /// Script category
    pub category: ScriptCategory,
    /// Whether a built-in profile matched
    pub known: bool,
}

impl Classification {
    fn fallback(code: String) -> Self {
        Self {
            code,
            category: ScriptCategory::Whitespace,
            known: false,
        }
    }
}

/// Stateless language lookup
#[derive(Debug, Clone, Copy, Default)]
pub struct LanguageClassifier;

impl LanguageClassifier {
    /// Create a classifier
    pub fn new() -> Self {
        Self
    }

    /// Classify a language name or code
    pub fn classify(&self, name_or_code: Option<&str>) -> Classification {
        let normalized = match name_or_code.map(normalize_language_name) {
            Some(normalized) if !normalized.is_empty() => normalized,
            _ => return Classification::fallback(FALLBACK_LANGUAGE_CODE.to_string()),
        };

        let canonical = lookup_alias(&normalized).or_else(|| {
            normalized
                .split_once('-')
                .and_then(|(primary, _)| lookup_alias(primary))
        });

        match canonical.and_then(|code| LanguageProfile::builtin(code).ok()) {
            Some(profile) => Classification {
                code: profile.code().to_string(),
                category: profile.category(),
                known: true,
            },
            None => {
                log::debug!("Unknown language '{normalized}', using whitespace rules");
                Classification::fallback(normalized)
            }
        }
    }

    /// Profile for a classification, falling back to the generic profile
    pub fn profile_for(&self, classification: &Classification) -> Arc<LanguageProfile> {
        LanguageProfile::builtin(&classification.code)
            .or_else(|_| LanguageProfile::builtin(FALLBACK_LANGUAGE_CODE))
            .expect("generic language profile is embedded")
    }
}

/// Classify with the default classifier
pub fn classify(name_or_code: Option<&str>) -> Classification {
    LanguageClassifier::new().classify(name_or_code)
}

/// Codes and display names of the built-in profiles, sorted by code
pub fn list_languages() -> Vec<(String, String)> {
    builtin_profile_list()
        .iter()
        .map(|profile| (profile.code().to_string(), profile.name().to_string()))
        .collect()
}

fn normalize_language_name(raw: &str) -> String {
    raw.trim().to_lowercase().replace('_', "-")
}

fn lookup_alias(name: &str) -> Option<&'static str> {
    alias_table().get(name).map(|code| code.as_str())
}

fn alias_table() -> &'static HashMap<String, String> {
    ALIAS_TABLE.get_or_init(|| {
        let mut table = HashMap::new();
        for profile in builtin_profile_list() {
            if profile.code() == FALLBACK_LANGUAGE_CODE {
                continue;
            }
            let code = profile.code().to_string();
            table.insert(code.clone(), code.clone());
            table.insert(profile.name().to_lowercase(), code.clone());
            for alias in profile.aliases() {
                table.insert(alias.clone(), code.clone());
            }
        }
        table
    })
}
