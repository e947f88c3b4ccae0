//! Sentence segmentation
//!
//! Splits a document into trimmed sentences. A maximal run of terminator
//! characters forms one boundary, closing quotes and brackets right after
//! the run stay with the sentence they close. A lone period is not a
//! boundary when the token it ends is a known abbreviation or when it sits
//! inside a date pattern of the language profile.

use crate::language::{classify, LanguageClassifier, LanguageProfile};
use regex::Regex;
use std::sync::{Arc, OnceLock};

static BLANK_LINE: OnceLock<Regex> = OnceLock::new();

fn blank_line() -> &'static Regex {
    BLANK_LINE.get_or_init(|| Regex::new(r"\n[^\S\n]*\n\s*").expect("valid blank line regex"))
}

/// Options that are independent of the language profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmenterOptions {
    /// Treat blank lines as hard sentence boundaries
    pub split_on_blank_lines: bool,
}

impl Default for SegmenterOptions {
    fn default() -> Self {
        Self {
            split_on_blank_lines: true,
        }
    }
}

/// Profile-driven sentence splitter
#[derive(Debug, Clone)]
pub struct SentenceSegmenter {
    profile: Arc<LanguageProfile>,
    options: SegmenterOptions,
}

impl SentenceSegmenter {
    /// Create a segmenter with default options
    pub fn new(profile: Arc<LanguageProfile>) -> Self {
        Self::with_options(profile, SegmenterOptions::default())
    }

    /// Create a segmenter with explicit options
    pub fn with_options(profile: Arc<LanguageProfile>, options: SegmenterOptions) -> Self {
        Self { profile, options }
    }

    /// Create a segmenter for a language name or code
    pub fn for_language(language: Option<&str>) -> Self {
        let classifier = LanguageClassifier::new();
        let profile = classifier.profile_for(&classifier.classify(language));
        Self::new(profile)
    }

    /// The profile in use
    pub fn profile(&self) -> &Arc<LanguageProfile> {
        &self.profile
    }

    /// Split `text` into trimmed, non-empty sentences in document order
    pub fn segment(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        if text.trim().is_empty() {
            return sentences;
        }

        if self.options.split_on_blank_lines {
            for block in blank_line().split(text) {
                self.segment_block(block, &mut sentences);
            }
        } else {
            self.segment_block(text, &mut sentences);
        }

        sentences
    }

    fn segment_block(&self, text: &str, sentences: &mut Vec<String>) {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let mut sentence_start = 0;
        let mut i = 0;

        while i < chars.len() {
            if !self.profile.is_terminator(chars[i].1) {
                i += 1;
                continue;
            }

            let run_start = i;
            let mut run_end = i;
            while run_end < chars.len() && self.profile.is_terminator(chars[run_end].1) {
                run_end += 1;
            }
            let mut boundary_end = run_end;
            while boundary_end < chars.len() && self.profile.is_closer(chars[boundary_end].1) {
                boundary_end += 1;
            }

            if self.accepts_boundary(text, &chars, run_start, run_end, boundary_end) {
                let end = chars.get(boundary_end).map_or(text.len(), |(pos, _)| *pos);
                push_sentence(&text[sentence_start..end], sentences);
                sentence_start = end;
            }

            i = boundary_end;
        }

        push_sentence(&text[sentence_start..], sentences);
    }

    fn accepts_boundary(
        &self,
        text: &str,
        chars: &[(usize, char)],
        run_start: usize,
        run_end: usize,
        boundary_end: usize,
    ) -> bool {
        if self.profile.requires_trailing_space() {
            if let Some((_, next)) = chars.get(boundary_end) {
                if !next.is_whitespace() {
                    return false;
                }
            }
        }

        let lone_period = run_end - run_start == 1 && chars[run_start].1 == '.';
        !(lone_period && self.is_period_exception(text, chars, run_start, boundary_end))
    }

    /// Check the token ending at the period against abbreviations and dates
    fn is_period_exception(
        &self,
        text: &str,
        chars: &[(usize, char)],
        period_index: usize,
        boundary_end: usize,
    ) -> bool {
        let mut token_start = period_index;
        while token_start > 0 && !chars[token_start - 1].1.is_whitespace() {
            token_start -= 1;
        }
        if token_start == period_index {
            return false;
        }

        let token_byte_start = chars[token_start].0;
        let period_byte = chars[period_index].0;

        let token = text[token_byte_start..period_byte]
            .trim_start_matches(|c: char| !c.is_alphanumeric());
        if !token.is_empty() && self.profile.is_abbreviation(token) {
            log::trace!("Suppressed boundary after abbreviation '{token}.'");
            return true;
        }

        let mut next_start = boundary_end;
        while next_start < chars.len() && chars[next_start].1.is_whitespace() {
            next_start += 1;
        }
        let number_follows = chars
            .get(next_start)
            .is_some_and(|(_, ch)| ch.is_ascii_digit());
        if number_follows && !token.is_empty() && self.profile.is_numbered_abbreviation(token) {
            log::trace!("Suppressed boundary after numbered abbreviation '{token}.'");
            return true;
        }

        // The window reaches through the following token so that patterns
        // such as "3. Mai" can see the month name.
        let mut window_end = next_start;
        while window_end < chars.len() && !chars[window_end].1.is_whitespace() {
            window_end += 1;
        }
        let window_byte_end = chars.get(window_end).map_or(text.len(), |(pos, _)| *pos);
        let window = &text[token_byte_start..window_byte_end];

        if self
            .profile
            .date_covers(window, period_byte - token_byte_start)
        {
            log::trace!("Suppressed boundary inside date '{window}'");
            return true;
        }

        false
    }
}

fn push_sentence(candidate: &str, sentences: &mut Vec<String>) {
    let trimmed = candidate.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
}

/// Segment `text` using the rules of `language`
pub fn segment_sentences(text: &str, language: Option<&str>) -> Vec<String> {
    let classification = classify(language);
    let profile = LanguageClassifier::new().profile_for(&classification);
    SentenceSegmenter::new(profile).segment(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(text: &str, language: &str) -> Vec<String> {
        segment_sentences(text, Some(language))
    }

    #[test]
    fn test_simple_english() {
        assert_eq!(
            split("I eat an apple. She runs fast.", "en"),
            vec!["I eat an apple.", "She runs fast."]
        );
    }

    #[test]
    fn test_english_abbreviations() {
        assert_eq!(
            split("Dr. Smith arrived. He sat down.", "en"),
            vec!["Dr. Smith arrived.", "He sat down."]
        );
        assert_eq!(
            split("The U.S. economy grew. Prices fell.", "en"),
            vec!["The U.S. economy grew.", "Prices fell."]
        );
    }

    #[test]
    fn test_ordinary_words_still_end_sentences() {
        assert_eq!(
            split("I said no. Then he left.", "en"),
            vec!["I said no.", "Then he left."]
        );
        assert_eq!(
            split("We went to the co. Then home.", "en"),
            vec!["We went to the co.", "Then home."]
        );
        assert_eq!(
            split("Il a vu M. Dupont. Je pars.", "fr"),
            vec!["Il a vu M. Dupont.", "Je pars."]
        );
    }

    #[test]
    fn test_abbreviations_before_numbers() {
        assert_eq!(
            split("See No. 5 and p. 12 for details. Done.", "en"),
            vec!["See No. 5 and p. 12 for details.", "Done."]
        );
        assert_eq!(
            split("Smith & Co. paid. Steht auf S. 3 im Buch. Ende.", "de"),
            vec!["Smith & Co. paid.", "Steht auf S. 3 im Buch.", "Ende."]
        );
    }

    #[test]
    fn test_abbreviation_inside_parenthesis() {
        assert_eq!(
            split("Fruit (e.g. apples) is good. Eat it.", "en"),
            vec!["Fruit (e.g. apples) is good.", "Eat it."]
        );
    }

    #[test]
    fn test_german_abbreviations_and_dates() {
        assert_eq!(
            split("Das ist z.B. ein Test. Noch einer.", "de"),
            vec!["Das ist z.B. ein Test.", "Noch einer."]
        );
        assert_eq!(
            split("Am 3. Mai kam er. Gut.", "de"),
            vec!["Am 3. Mai kam er.", "Gut."]
        );
        assert_eq!(
            split("Es begann am 12.03. und endete spät. Dann nichts.", "de"),
            vec!["Es begann am 12.03. und endete spät.", "Dann nichts."]
        );
    }

    #[test]
    fn test_period_after_full_date_is_boundary() {
        assert_eq!(
            split("Es geschah am 12.03.2024. Danach war Ruhe.", "de"),
            vec!["Es geschah am 12.03.2024.", "Danach war Ruhe."]
        );
    }

    #[test]
    fn test_decimals_do_not_split() {
        assert_eq!(
            split("Pi is 3.14 roughly. Yes.", "en"),
            vec!["Pi is 3.14 roughly.", "Yes."]
        );
    }

    #[test]
    fn test_terminator_runs_are_one_boundary() {
        assert_eq!(
            split("Wait... what?! Really.", "en"),
            vec!["Wait...", "what?!", "Really."]
        );
    }

    #[test]
    fn test_closing_quote_stays_with_sentence() {
        assert_eq!(
            split("He said \"Stop!\" Then he left.", "en"),
            vec!["He said \"Stop!\"", "Then he left."]
        );
    }

    #[test]
    fn test_chinese() {
        assert_eq!(
            split("我喜欢学习编程。你呢？", "zh"),
            vec!["我喜欢学习编程。", "你呢？"]
        );
        assert_eq!(
            split("他说：「好的。」然后走了。", "zh"),
            vec!["他说：「好的。」", "然后走了。"]
        );
        assert_eq!(split("真的吗……我不信。", "zh"), vec!["真的吗……", "我不信。"]);
    }

    #[test]
    fn test_blank_lines_split_headings() {
        assert_eq!(
            split("A Title\n\nFirst sentence. Second one", "en"),
            vec!["A Title", "First sentence.", "Second one"]
        );
    }

    #[test]
    fn test_blank_lines_kept_when_disabled() {
        let segmenter = SentenceSegmenter::with_options(
            LanguageProfile::builtin("en").unwrap(),
            SegmenterOptions {
                split_on_blank_lines: false,
            },
        );
        assert_eq!(
            segmenter.segment("A Title\n\nBody text."),
            vec!["A Title\n\nBody text."]
        );
    }

    #[test]
    fn test_internal_whitespace_preserved() {
        assert_eq!(
            split("  Two  spaces\there.   Next.  ", "en"),
            vec!["Two  spaces\there.", "Next."]
        );
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        assert!(split("", "en").is_empty());
        assert!(split("  \n\t ", "zh").is_empty());
    }

    #[test]
    fn test_unknown_language_uses_generic_rules() {
        assert_eq!(
            segment_sentences("One. Two! Three?", Some("tlh")),
            vec!["One.", "Two!", "Three?"]
        );
        assert_eq!(segment_sentences("One. Two.", None), vec!["One.", "Two."]);
    }
}
