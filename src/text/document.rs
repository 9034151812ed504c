// A document under comparison: its raw text plus the normalized tokens.
//
// The segment matcher works on `text`; the similarity metrics work on
// `tokens`. Both are fixed once the document is built.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use super::tokenizer::Tokenizer;

#[derive(Debug, Clone)]
pub struct Document {
    /// Display label, usually the file path
    pub label: String,
    /// Raw text exactly as read
    pub text: String,
    /// Lowercased, stop-word-filtered tokens in document order
    pub tokens: Vec<String>,
}

impl Document {
    pub fn from_text(
        label: impl Into<String>,
        text: impl Into<String>,
        tokenizer: &Tokenizer,
    ) -> Self {
        let text = text.into();
        let tokens = tokenizer.tokenize(&text);
        Self {
            label: label.into(),
            text,
            tokens,
        }
    }

    /// Read a UTF-8 document from disk and tokenize it.
    pub fn load(path: &Path, tokenizer: &Tokenizer) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read document {}", path.display()))?;

        if text.trim().is_empty() {
            warn!(path = %path.display(), "Document is empty");
        }

        let doc = Self::from_text(path.display().to_string(), text, tokenizer);
        debug!(
            path = %path.display(),
            chars = doc.char_count(),
            tokens = doc.tokens.len(),
            "Loaded document"
        );
        Ok(doc)
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}
