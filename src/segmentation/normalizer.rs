use std::{
    fmt,
    sync::Arc,
};

use rust_stemmers::{
    Algorithm,
    Stemmer,
};
use serde::{
    Deserialize,
    Serialize,
};

/// Morphological reduction: given a lower-cased word, return its base form.
///
/// Quality of the reduction is not a correctness concern for the engine. Every
/// operation must still behave when the reducer is [`IdentityReducer`].
pub trait Reducer: Send + Sync {
    fn reduce(&self, word: &str) -> String;
}

impl<F> Reducer for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn reduce(&self, word: &str) -> String {
        self(word)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityReducer;

impl Reducer for IdentityReducer {
    fn reduce(&self, word: &str) -> String {
        word.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StemLanguage {
    #[default]
    Russian,
    English,
    German,
    French,
    Spanish,
    Italian,
    Portuguese,
}

impl StemLanguage {
    fn algorithm(self) -> Algorithm {
        match self {
            StemLanguage::Russian => Algorithm::Russian,
            StemLanguage::English => Algorithm::English,
            StemLanguage::German => Algorithm::German,
            StemLanguage::French => Algorithm::French,
            StemLanguage::Spanish => Algorithm::Spanish,
            StemLanguage::Italian => Algorithm::Italian,
            StemLanguage::Portuguese => Algorithm::Portuguese,
        }
    }
}

/// Snowball stemmer. Strips inflectional endings ("ремонта" -> "ремонт").
pub struct SnowballReducer {
    language: StemLanguage,
    stemmer: Stemmer,
}

impl SnowballReducer {
    pub fn new(language: StemLanguage) -> Self {
        Self { language, stemmer: Stemmer::create(language.algorithm()) }
    }
}

impl fmt::Debug for SnowballReducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnowballReducer").field("language", &self.language).finish()
    }
}

impl Reducer for SnowballReducer {
    fn reduce(&self, word: &str) -> String {
        self.stemmer.stem(word).into_owned()
    }
}

pub const EXACT_MARKER: char = '!';

/// Lower-cases tokens and runs them through the injected [`Reducer`].
#[derive(Clone)]
pub struct Normalizer {
    reducer: Arc<dyn Reducer>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Normalizer").finish_non_exhaustive()
    }
}

impl Normalizer {
    pub fn new(reducer: impl Reducer + 'static) -> Self {
        Self { reducer: Arc::new(reducer) }
    }

    pub fn identity() -> Self {
        Self::new(IdentityReducer)
    }

    pub fn snowball(language: StemLanguage) -> Self {
        Self::new(SnowballReducer::new(language))
    }

    pub fn normalize(&self, token: &str, force_exact: bool) -> String {
        if force_exact {
            let token = token.strip_prefix(EXACT_MARKER).unwrap_or(token);
            return token.to_lowercase();
        }

        let lower = token.to_lowercase();
        if lower.is_empty() {
            return lower;
        }
        self.reducer.reduce(&lower)
    }
}
