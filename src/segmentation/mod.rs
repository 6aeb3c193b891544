pub mod normalizer;

pub mod tokenizer;

pub use normalizer::{
    IdentityReducer,
    Normalizer,
    Reducer,
    SnowballReducer,
    StemLanguage,
};
pub use tokenizer::{
    extract_tokens,
    split_words,
    Token,
};
