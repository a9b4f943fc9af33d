//! Sentence sequences produced by the text generator.

use regex::Regex;
use serde::{Deserialize, Serialize};
use storyreel_error::{ConfigError, StoryreelResult};

/// Which of the two per-run scripts this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ScriptKind {
    /// Spoken narration, one short sentence per beat
    Narration,
    /// Visual description, one long sentence per beat
    Scene,
}

/// Ordered sentences, one per narrative beat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    kind: ScriptKind,
    sentences: Vec<String>,
}

impl Script {
    /// Wrap already-split sentences.
    pub fn new(kind: ScriptKind, sentences: Vec<String>) -> Self {
        Self { kind, sentences }
    }

    /// Script kind.
    pub fn kind(&self) -> ScriptKind {
        self.kind
    }

    /// Sentences in order.
    pub fn sentences(&self) -> &[String] {
        &self.sentences
    }

    /// Number of sentences.
    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    /// True when the script has no sentences.
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// All sentences before `index`, joined by spaces.
    pub fn preceding(&self, index: usize) -> Option<String> {
        (index > 0 && index <= self.sentences.len()).then(|| self.sentences[..index].join(" "))
    }

    /// All sentences after `index`, joined by spaces.
    pub fn following(&self, index: usize) -> Option<String> {
        (index + 1 < self.sentences.len()).then(|| self.sentences[index + 1..].join(" "))
    }
}

/// Splits generated text into sentences on terminal punctuation.
#[derive(Debug, Clone)]
pub struct SentenceParser {
    pattern: Regex,
}

impl SentenceParser {
    /// Compile the sentence pattern.
    pub fn new() -> StoryreelResult<Self> {
        let pattern = Regex::new(r"[^.!?]+[.!?]+")
            .map_err(|e| ConfigError::new(format!("Invalid sentence pattern: {}", e)))?;
        Ok(Self { pattern })
    }

    /// Split `text` into trimmed, non-empty sentences.
    ///
    /// Trailing text without terminal punctuation is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use storyreel_core::SentenceParser;
    ///
    /// let parser = SentenceParser::new().unwrap();
    /// let s = parser.split("The sky fell. Nobody noticed! Why? trailing");
    /// assert_eq!(s, vec!["The sky fell.", "Nobody noticed!", "Why?"]);
    /// ```
    pub fn split(&self, text: &str) -> Vec<String> {
        self.pattern
            .find_iter(text.trim())
            .map(|m| m.as_str().trim().to_string())
            .filter(|s| s.chars().any(|c| c.is_alphanumeric()))
            .collect()
    }

    /// Split `text` and wrap it as a script.
    pub fn parse(&self, kind: ScriptKind, text: &str) -> Script {
        Script::new(kind, self.split(text))
    }
}
