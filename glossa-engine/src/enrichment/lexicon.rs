//! Deterministic word-list services
//!
//! Both services are plain tables loaded from text files, so the pipeline
//! can run fully offline and tests get reproducible enrichment.

use super::{DifficultyEstimator, Lemmatizer};
use crate::error::{EngineError, EnrichmentResult, Result};
use glossa_core::TokenDifficulty;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Lines that carry data: trimmed, non-empty, not `#` comments
fn data_lines(reader: impl BufRead) -> impl Iterator<Item = (usize, std::io::Result<String>)> {
    reader
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.map(|l| l.trim().to_string())))
        .filter(|(_, line)| match line {
            Ok(line) => !line.is_empty() && !line.starts_with('#'),
            Err(_) => true,
        })
}

/// Rates words the learner knows as easy and everything else as hard
#[derive(Debug, Clone)]
pub struct WordListEstimator {
    known: HashSet<String>,
    min_chars: usize,
}

impl WordListEstimator {
    /// Build from known words (case-insensitive)
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            known: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
            min_chars: 1,
        }
    }

    /// Read one known word per line
    pub fn from_reader(reader: impl BufRead) -> Result<Self> {
        let mut words = Vec::new();
        for (_, line) in data_lines(reader) {
            words.push(line?);
        }
        Ok(Self::from_words(words))
    }

    /// Read a known-word file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Words shorter than `min_chars` characters are always easy
    pub fn min_chars(mut self, min_chars: usize) -> Self {
        self.min_chars = min_chars;
        self
    }

    /// Number of known words
    pub fn len(&self) -> usize {
        self.known.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }

    fn rate(&self, word: &str) -> TokenDifficulty {
        let word = word.trim().to_lowercase();
        let trivial = word.chars().count() < self.min_chars
            || word.chars().all(|c| c.is_numeric());
        if trivial || self.known.contains(&word) {
            TokenDifficulty::Easy
        } else {
            TokenDifficulty::Hard
        }
    }
}

impl DifficultyEstimator for WordListEstimator {
    fn assess(&self, word: &str, _context: &str) -> EnrichmentResult<TokenDifficulty> {
        Ok(Some(self.rate(word)))
    }
}

/// Looks lemmas up in a form -> lemma table
#[derive(Debug, Clone, Default)]
pub struct TableLemmatizer {
    table: HashMap<String, String>,
}

impl TableLemmatizer {
    /// Build from `(form, lemma)` pairs; forms are matched case-insensitively
    pub fn from_pairs<I, F, L>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (F, L)>,
        F: AsRef<str>,
        L: Into<String>,
    {
        Self {
            table: pairs
                .into_iter()
                .map(|(form, lemma)| (form.as_ref().trim().to_lowercase(), lemma.into()))
                .collect(),
        }
    }

    /// Read `form<TAB>lemma` lines
    pub fn from_reader(reader: impl BufRead) -> Result<Self> {
        let mut pairs = Vec::new();
        for (line_number, line) in data_lines(reader) {
            let line = line?;
            let (form, lemma) = line.split_once('\t').ok_or_else(|| {
                EngineError::ConfigError(format!(
                    "lemma table line {line_number}: expected 'form<TAB>lemma'"
                ))
            })?;
            pairs.push((form.to_string(), lemma.trim().to_string()));
        }
        Ok(Self::from_pairs(pairs))
    }

    /// Read a lemma table file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Number of forms
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Lemmatizer for TableLemmatizer {
    fn lemmatize(&self, word: &str) -> EnrichmentResult<String> {
        Ok(self.table.get(&word.trim().to_lowercase()).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_word_list_rates_known_words_easy() {
        let estimator = WordListEstimator::from_words(["the", "Apple"]);
        assert_eq!(estimator.assess("The", ""), Ok(Some(TokenDifficulty::Easy)));
        assert_eq!(estimator.assess("apple", ""), Ok(Some(TokenDifficulty::Easy)));
        assert_eq!(
            estimator.assess("challenging", ""),
            Ok(Some(TokenDifficulty::Hard))
        );
        assert_eq!(estimator.assess("2024", ""), Ok(Some(TokenDifficulty::Easy)));
    }

    #[test]
    fn test_word_list_min_chars() {
        let estimator = WordListEstimator::from_words(Vec::<String>::new()).min_chars(3);
        assert_eq!(estimator.assess("an", ""), Ok(Some(TokenDifficulty::Easy)));
        assert_eq!(estimator.assess("ant", ""), Ok(Some(TokenDifficulty::Hard)));
    }

    #[test]
    fn test_word_list_reader_skips_comments() {
        let input = "# known words\nthe\n\n  cat  \n";
        let estimator = WordListEstimator::from_reader(Cursor::new(input)).unwrap();
        assert_eq!(estimator.len(), 2);
        assert_eq!(estimator.assess("cat", ""), Ok(Some(TokenDifficulty::Easy)));
    }

    #[test]
    fn test_lemma_table_reader() {
        let input = "runs\trun\nRan\trun\n# comment\n";
        let lemmatizer = TableLemmatizer::from_reader(Cursor::new(input)).unwrap();
        assert_eq!(lemmatizer.len(), 2);
        assert_eq!(lemmatizer.lemmatize("ran"), Ok(Some("run".to_string())));
        assert_eq!(lemmatizer.lemmatize("walk"), Ok(None));
    }

    #[test]
    fn test_lemma_table_rejects_malformed_lines() {
        let err = TableLemmatizer::from_reader(Cursor::new("runs run\n")).unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_lemma_table_from_file() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "went\tgo").unwrap();
        let lemmatizer = TableLemmatizer::from_file(file.path()).unwrap();
        assert_eq!(lemmatizer.lemmatize("Went"), Ok(Some("go".to_string())));
    }
}
