// Report assembly and output: the comparison result plus its renderings.
//
// A ComparisonReport is built once per run by the compare pipeline, shown in
// the terminal, and optionally written to disk as Markdown or JSON.

pub mod markdown;
pub mod terminal;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::matching::segment::MatchSet;
use crate::similarity::scores::SimilarityScores;
use crate::text::document::Document;

/// Size summary of one compared document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub label: String,
    pub chars: usize,
    pub tokens: usize,
}

impl From<&Document> for DocumentSummary {
    fn from(doc: &Document) -> Self {
        Self {
            label: doc.label.clone(),
            chars: doc.char_count(),
            tokens: doc.tokens.len(),
        }
    }
}

/// Everything one comparison run produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub source: DocumentSummary,
    pub comparison: DocumentSummary,
    pub ngram_size: usize,
    pub min_match_len: usize,
    pub scores: SimilarityScores,
    pub matches: MatchSet,
    /// RFC 3339 UTC timestamp
    pub generated_at: String,
}

impl ComparisonReport {
    /// Fraction of the source document covered by matched segments.
    pub fn source_coverage(&self) -> f64 {
        self.matches.coverage(self.source.chars)
    }
}

/// Write the report to `path`: JSON for a `.json` extension, Markdown otherwise.
pub fn write_report(report: &ComparisonReport, path: &Path) -> Result<()> {
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let content = if is_json {
        serde_json::to_string_pretty(report).context("Failed to serialize report")?
    } else {
        markdown::generate(report)
    };

    fs::write(path, content)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;

    info!(path = %path.display(), json = is_json, "Report written");
    Ok(())
}

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Unlike byte slicing (`&text[..120]`), this respects UTF-8 character boundaries
/// and will never panic on multi-byte characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}

/// Collapse runs of whitespace (including newlines) to single spaces so a
/// matched span prints on one line.
pub fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
