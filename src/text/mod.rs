// Text handling: tokenization, n-gram windows, and loaded documents.

pub mod document;
pub mod ngram;
pub mod tokenizer;
