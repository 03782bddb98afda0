// src/utils/sensitive_words.rs

use std::collections::HashSet;

use regex::{RegexSet, RegexSetBuilder};
use serde::Serialize;

/// Built-in list used when no override is configured.
pub const DEFAULT_WORDS: &[&str] = &[
    "赌博", "色情", "毒品", "暴力", "诈骗", "gambling", "porn", "drugs", "scam",
];

/// Case-insensitive literal matcher over a fixed word list.
#[derive(Debug, Clone)]
pub struct SensitiveWordScanner {
    words: Vec<String>,
    set: Option<RegexSet>,
}

/// Outcome of checking an article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    pub has_sensitive_words: bool,
    pub matched_words: Vec<String>,
}

impl SensitiveWordScanner {
    pub fn new<I, S>(words: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut words: Vec<String> = words
            .into_iter()
            .map(Into::into)
            .map(|w| w.trim().to_string())
            .filter(|w| !w.is_empty())
            .collect();
        let mut seen = HashSet::new();
        words.retain(|w| seen.insert(w.to_lowercase()));

        let set = if words.is_empty() {
            None
        } else {
            Some(
                RegexSetBuilder::new(words.iter().map(|w| regex::escape(w)))
                    .case_insensitive(true)
                    .build()?,
            )
        };

        Ok(Self { words, set })
    }

    pub fn with_default_words() -> Result<Self, regex::Error> {
        Self::new(DEFAULT_WORDS.iter().copied())
    }

    /// Words from the list that occur in `text`, in list order.
    pub fn scan(&self, text: &str) -> Vec<String> {
        let Some(set) = &self.set else {
            return Vec::new();
        };
        set.matches(text)
            .into_iter()
            .map(|i| self.words[i].clone())
            .collect()
    }

    /// Scans title and body together; each word is reported once.
    pub fn check_article(&self, title: &str, content: &str) -> ScanReport {
        let mut matched = self.scan(title);
        for word in self.scan(content) {
            if !matched.contains(&word) {
                matched.push(word);
            }
        }

        ScanReport {
            has_sensitive_words: !matched.is_empty(),
            matched_words: matched,
        }
    }
}
