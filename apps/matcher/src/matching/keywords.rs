//! Keyword Extractor — turns free text into a set of normalized skill tokens.
//!
//! Policy: lower-case the text, tag it, keep NOUN/PROPN tokens that are not
//! stopwords and are longer than two characters.
//!
//! Because tagging sees lowercased text, the built-in `LexiconTagger` never
//! emits PROPN here; PROPN only arrives from a model-backed tagger.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::nlp::{NlpError, Tagger};

/// Normalized lowercase skill tokens.
pub type KeywordSet = BTreeSet<String>;

/// Tokens must be strictly longer than this many characters.
const MIN_KEYWORD_CHARS_EXCLUSIVE: usize = 2;

#[derive(Clone)]
pub struct KeywordExtractor {
    tagger: Arc<dyn Tagger>,
}

impl KeywordExtractor {
    pub fn new(tagger: Arc<dyn Tagger>) -> Self {
        Self { tagger }
    }

    pub fn tagger_name(&self) -> &str {
        self.tagger.name()
    }

    pub fn extract(&self, text: &str) -> Result<KeywordSet, NlpError> {
        let lowered = text.to_lowercase();
        if lowered.trim().is_empty() {
            return Ok(KeywordSet::new());
        }

        let keywords = self
            .tagger
            .tag(&lowered)?
            .into_iter()
            .filter(|token| {
                token.pos.is_nominal()
                    && !token.is_stop
                    && token.text.chars().count() > MIN_KEYWORD_CHARS_EXCLUSIVE
            })
            .map(|token| token.text)
            .collect();

        Ok(keywords)
    }
}
