//! NLP capability — part-of-speech tagging with stopword flags.
//!
//! The keyword extractor depends only on the `Tagger` trait. `LexiconTagger`
//! is the built-in English implementation; a model-backed tagger can be
//! swapped in at startup without touching the ranking code.

pub mod lexicon;
pub mod stopwords;

use thiserror::Error;

pub use lexicon::LexiconTagger;

#[derive(Debug, Error)]
pub enum NlpError {
    #[error("NLP pipeline unavailable: {0}")]
    Unavailable(String),
}

/// Universal Dependencies coarse part-of-speech tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartOfSpeech {
    Adj,
    Adp,
    Adv,
    Aux,
    Cconj,
    Det,
    Intj,
    Noun,
    Num,
    Part,
    Pron,
    Propn,
    Punct,
    Sconj,
    Sym,
    Verb,
    X,
}

impl PartOfSpeech {
    /// NOUN or PROPN: the only tags that can become skill keywords.
    pub fn is_nominal(self) -> bool {
        matches!(self, PartOfSpeech::Noun | PartOfSpeech::Propn)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaggedToken {
    pub text: String,
    pub pos: PartOfSpeech,
    pub is_stop: bool,
}

/// Tokenizes text and tags each token. Built once per process and shared
/// across requests, so implementations must be `Send + Sync`.
pub trait Tagger: Send + Sync {
    fn tag(&self, text: &str) -> Result<Vec<TaggedToken>, NlpError>;

    fn name(&self) -> &str;
}
