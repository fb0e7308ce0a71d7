//! Lexicon tagger — rule-based English part-of-speech tagging.
//!
//! Tagging order for each word:
//! 1. punctuation / symbols / numerals by character class
//! 2. closed-class lexicons (determiners, pronouns, adpositions, ...)
//! 3. noun overrides for words that would otherwise hit a suffix rule
//! 4. suffix rules (`-ing`/`-ed` → VERB when the stem is at least four
//!    characters with a vowel, `-ly` → ADV, `-ous`/`-able`/... → ADJ)
//! 5. capitalized mid-sentence → PROPN (only reachable on cased input;
//!    `KeywordExtractor` lowercases before tagging)
//! 6. everything else → NOUN
//!
//! Open-class words default to NOUN, so unseen technical terms ("kubernetes",
//! "k8s", "node.js") are kept as keyword candidates.

use std::collections::{HashMap, HashSet};

use unicode_segmentation::UnicodeSegmentation;

use super::stopwords::ENGLISH_STOP_WORDS;
use super::{NlpError, PartOfSpeech, TaggedToken, Tagger};

const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "each", "every", "either", "neither",
    "some", "any", "no", "all", "both", "another", "such", "what", "which", "whatever",
    "whichever",
];

const PRONOUNS: &[&str] = &[
    "i", "me", "my", "mine", "myself", "you", "your", "yours", "yourself", "yourselves", "he",
    "him", "his", "himself", "she", "her", "hers", "herself", "it", "its", "itself", "we", "us",
    "our", "ours", "ourselves", "they", "them", "their", "theirs", "themselves", "who", "whom",
    "whose", "someone", "somebody", "something", "anyone", "anybody", "anything", "everyone",
    "everybody", "everything", "nobody", "nothing",
];

const ADPOSITIONS: &[&str] = &[
    "about", "above", "across", "after", "against", "along", "among", "around", "as", "at",
    "before", "behind", "below", "beneath", "beside", "between", "beyond", "by", "despite",
    "down", "during", "except", "for", "from", "in", "inside", "into", "like", "near", "of",
    "off", "on", "onto", "out", "outside", "over", "past", "per", "since", "through",
    "throughout", "to", "toward", "towards", "under", "underneath", "until", "up", "upon", "via",
    "with", "within", "without",
];

const COORDINATING_CONJUNCTIONS: &[&str] = &["and", "or", "but", "nor", "yet", "so", "plus"];

const SUBORDINATING_CONJUNCTIONS: &[&str] = &[
    "although", "because", "if", "once", "than", "though", "unless", "whereas", "whether",
    "while",
];

const AUXILIARIES: &[&str] = &[
    "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "having", "do",
    "does", "did", "will", "would", "shall", "should", "can", "could", "may", "might", "must",
    "ca", "wo",
];

const PARTICLES: &[&str] = &["not", "n't", "'s"];

const INTERJECTIONS: &[&str] = &["yes", "oh", "hello", "hi", "thanks", "please"];

const ADVERBS: &[&str] = &[
    "also", "always", "often", "never", "very", "really", "quite", "just", "only", "even",
    "still", "already", "ever", "here", "there", "now", "then", "again", "soon", "well", "too",
    "however", "therefore", "thus", "hence", "perhaps", "almost", "rather", "instead", "how",
    "when", "where", "why",
];

/// Verbs that rarely name a skill. Ambiguous forms ("design", "support") stay nouns.
const VERBS: &[&str] = &[
    "join", "seek", "hire", "collaborate", "ensure", "help", "need", "want", "require", "love",
    "apply", "make", "get", "know", "learn", "grow", "develop", "implement", "maintain",
    "deliver", "create", "thrive", "enjoy", "work", "using", "making", "taking", "hiring",
    "giving", "coming", "moving", "used", "made", "based", "owned", "hired",
];

const ADJECTIVES: &[&str] = &[
    "strong", "excellent", "good", "great", "new", "senior", "junior", "familiar", "proficient",
    "solid", "deep", "fast", "able", "relevant", "hands-on", "passionate", "motivated", "key",
    "large", "small", "high", "low", "best", "better", "various", "other", "same", "own",
];

const NUMBER_WORDS: &[&str] = &[
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "twenty", "thirty", "fifty", "hundred", "thousand", "million",
];

/// Nouns whose endings would otherwise trip a suffix rule.
const NOUN_OVERRIDES: &[&str] = &[
    "engineering", "marketing", "programming", "computing", "networking", "testing",
    "accounting", "training", "learning", "modeling", "modelling", "building", "scheduling",
    "planning", "budgeting", "consulting", "debugging", "scripting", "caching", "hosting",
    "logging", "monitoring", "processing", "banking", "nursing", "teaching", "writing",
    "pricing", "branding", "recruiting", "sourcing", "onboarding", "manufacturing",
    "clustering", "tuning", "profiling", "warehousing", "labeling", "labelling",
    "benchmarking", "streaming", "rendering", "indexing", "mining", "imaging", "routing",
    "hashing", "mapping", "parsing", "tracing", "packaging", "forecasting", "auditing",
    "supply", "assembly", "family", "anomaly", "table", "cable", "variable",
    "timetable",
];

const MIN_VERB_STEM_CHARS: usize = 4;

const ADJECTIVE_SUFFIXES: &[&str] = &["ous", "ful", "less", "able", "ible", "ical"];

pub struct LexiconTagger {
    stop_words: HashSet<&'static str>,
    lexicon: HashMap<&'static str, PartOfSpeech>,
    noun_overrides: HashSet<&'static str>,
}

impl Default for LexiconTagger {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconTagger {
    pub fn new() -> Self {
        let mut lexicon = HashMap::new();
        // Later inserts win; closed classes go last so "that" stays SCONJ, not DET, etc.
        for (words, pos) in [
            (ADJECTIVES, PartOfSpeech::Adj),
            (VERBS, PartOfSpeech::Verb),
            (ADVERBS, PartOfSpeech::Adv),
            (NUMBER_WORDS, PartOfSpeech::Num),
            (INTERJECTIONS, PartOfSpeech::Intj),
            (PRONOUNS, PartOfSpeech::Pron),
            (DETERMINERS, PartOfSpeech::Det),
            (ADPOSITIONS, PartOfSpeech::Adp),
            (SUBORDINATING_CONJUNCTIONS, PartOfSpeech::Sconj),
            (COORDINATING_CONJUNCTIONS, PartOfSpeech::Cconj),
            (AUXILIARIES, PartOfSpeech::Aux),
            (PARTICLES, PartOfSpeech::Part),
        ] {
            for word in words {
                lexicon.insert(*word, pos);
            }
        }

        Self {
            stop_words: ENGLISH_STOP_WORDS.iter().copied().collect(),
            lexicon,
            noun_overrides: NOUN_OVERRIDES.iter().copied().collect(),
        }
    }

    pub fn is_stop(&self, word: &str) -> bool {
        self.stop_words.contains(word.to_lowercase().as_str())
    }

    fn tag_word(&self, word: &str, sentence_start: bool) -> PartOfSpeech {
        if !word.chars().any(char::is_alphanumeric) {
            return if word.chars().all(|c| c.is_ascii_punctuation() && !is_symbol(c)) {
                PartOfSpeech::Punct
            } else {
                PartOfSpeech::Sym
            };
        }

        if is_numeral(word) {
            return PartOfSpeech::Num;
        }

        let lower = word.to_lowercase();

        if let Some(pos) = self.lexicon.get(lower.as_str()) {
            return *pos;
        }

        if self.noun_overrides.contains(lower.as_str()) {
            return PartOfSpeech::Noun;
        }

        if let Some(pos) = suffix_tag(&lower) {
            return pos;
        }

        let capitalized = word.chars().next().is_some_and(char::is_uppercase);
        if capitalized && !sentence_start {
            return PartOfSpeech::Propn;
        }

        PartOfSpeech::Noun
    }
}

impl Tagger for LexiconTagger {
    fn tag(&self, text: &str) -> Result<Vec<TaggedToken>, NlpError> {
        let mut tokens = Vec::new();
        let mut sentence_start = true;

        for segment in text.split_word_bounds() {
            if segment.trim().is_empty() {
                if segment.contains('\n') {
                    sentence_start = true;
                }
                continue;
            }

            for piece in split_clitics(segment) {
                let pos = self.tag_word(&piece, sentence_start);
                sentence_start = matches!(piece.as_str(), "." | "!" | "?");
                let is_stop = self.is_stop(&piece);
                tokens.push(TaggedToken {
                    text: piece,
                    pos,
                    is_stop,
                });
            }
        }

        Ok(tokens)
    }

    fn name(&self) -> &str {
        "lexicon"
    }
}

/// Splits possessive `'s` and negation `n't` off a word, normalizing curly apostrophes.
fn split_clitics(segment: &str) -> Vec<String> {
    let word = segment.replace('\u{2019}', "'");

    for clitic in ["n't", "'s", "'ll", "'re", "'ve", "'m", "'d"] {
        if let Some(base) = word.strip_suffix(clitic) {
            if !base.is_empty() && base.chars().any(char::is_alphanumeric) {
                return vec![base.to_string(), clitic.to_string()];
            }
        }
    }

    vec![word]
}

fn is_symbol(c: char) -> bool {
    matches!(c, '$' | '%' | '+' | '=' | '<' | '>' | '^' | '|' | '~' | '#' | '&' | '@' | '*')
}

/// Digits with optional separators and no letters: "5", "3.5", "10,000".
fn is_numeral(word: &str) -> bool {
    word.chars().any(|c| c.is_ascii_digit())
        && word
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '_'))
}

fn suffix_tag(lower: &str) -> Option<PartOfSpeech> {
    let len = lower.chars().count();
    if len <= 4 {
        return None;
    }

    let inflected_stem = lower
        .strip_suffix("ing")
        .or_else(|| lower.strip_suffix("ed"));
    if let Some(stem) = inflected_stem {
        // "spring", "string", "speed": the ending is part of the root.
        return is_verb_stem(stem).then_some(PartOfSpeech::Verb);
    }
    if lower.ends_with("ly") {
        return Some(PartOfSpeech::Adv);
    }
    if ADJECTIVE_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
        return Some(PartOfSpeech::Adj);
    }
    None
}

/// At least four characters with a vowel, so the word is a real inflection.
fn is_verb_stem(stem: &str) -> bool {
    stem.chars().count() >= MIN_VERB_STEM_CHARS
        && stem.chars().any(|c| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y'))
}
