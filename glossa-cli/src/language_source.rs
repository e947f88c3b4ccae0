//! Language source management for CLI

use glossa_core::classify;
use std::path::{Path, PathBuf};

/// Where the language profile for a run comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageSource {
    /// Built-in profile chosen by name or code, detected per document when absent
    BuiltIn(Option<String>),
    /// External profile file
    External {
        /// Path to the profile file
        path: PathBuf,
        /// Language tag recorded on the documents
        language_code: Option<String>,
    },
}

impl LanguageSource {
    /// Pick the source from the command-line language and profile options
    pub fn resolve(language: Option<&str>, language_config: Option<&Path>) -> Self {
        let language = language.map(str::to_string);
        match language_config {
            Some(path) => LanguageSource::External {
                path: path.to_path_buf(),
                language_code: language,
            },
            None => LanguageSource::BuiltIn(language),
        }
    }

    /// The language tag passed to the processor
    pub fn language(&self) -> Option<&str> {
        match self {
            LanguageSource::BuiltIn(language) => language.as_deref(),
            LanguageSource::External { language_code, .. } => language_code.as_deref(),
        }
    }

    /// Get the display name for the language source
    pub fn display_name(&self) -> String {
        match self {
            LanguageSource::BuiltIn(None) => "Unspecified (generic rules)".to_string(),
            LanguageSource::BuiltIn(Some(language)) => {
                let classification = classify(Some(language));
                if classification.known {
                    format!(
                        "Built-in: {} ({})",
                        classification.code,
                        classification.category.as_str()
                    )
                } else {
                    format!("Unknown: {} (generic rules)", classification.code)
                }
            }
            LanguageSource::External {
                path,
                language_code,
            } => {
                if let Some(code) = language_code {
                    format!("External: {} (code: {})", path.display(), code)
                } else {
                    format!("External: {}", path.display())
                }
            }
        }
    }
}
