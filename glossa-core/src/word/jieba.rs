//! Dictionary-based Chinese segmentation backed by jieba

use super::WordSegmenter;
use jieba_rs::Jieba;
use std::sync::{Arc, OnceLock};

static DEFAULT_JIEBA: OnceLock<Arc<Jieba>> = OnceLock::new();

/// jieba segmenter; the default dictionary is loaded once per process
#[derive(Clone)]
pub struct JiebaSegmenter {
    jieba: Arc<Jieba>,
    hmm: bool,
}

impl std::fmt::Debug for JiebaSegmenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JiebaSegmenter")
            .field("hmm", &self.hmm)
            .finish_non_exhaustive()
    }
}

impl Default for JiebaSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl JiebaSegmenter {
    /// Segmenter sharing the default dictionary, HMM enabled for unknown words
    pub fn new() -> Self {
        let jieba = DEFAULT_JIEBA.get_or_init(|| Arc::new(Jieba::new())).clone();
        Self { jieba, hmm: true }
    }

    /// Segmenter over a custom jieba instance
    pub fn with_jieba(jieba: Jieba) -> Self {
        Self {
            jieba: Arc::new(jieba),
            hmm: true,
        }
    }

    /// Enable or disable HMM discovery of unknown words
    pub fn hmm(mut self, enabled: bool) -> Self {
        self.hmm = enabled;
        self
    }
}

impl WordSegmenter for JiebaSegmenter {
    fn cut<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.jieba.cut(text, self.hmm)
    }

    fn name(&self) -> &'static str {
        "jieba"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jieba_cuts_common_words() {
        let words = JiebaSegmenter::new().cut("我喜欢学习编程。");
        assert!(words.contains(&"喜欢"));
        assert!(words.contains(&"学习"));
        assert_eq!(words.concat(), "我喜欢学习编程。");
    }
}
