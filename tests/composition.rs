// Composition tests: verifying that the modules chain together correctly.
//
// These tests exercise the data flow between modules:
//   Document -> Tokenizer -> (Scores, Matches) -> Report -> file
// Report generation writes to the system temp directory.

use std::path::PathBuf;
use std::sync::Arc;

use docsim::config::{Config, Overrides};
use docsim::matching::matcher::MatcherConfig;
use docsim::pipeline::compare::{run, CompareOptions};
use docsim::report::{truncate_chars, write_report, ComparisonReport};
use docsim::similarity::scores::Metric;
use docsim::text::document::Document;
use docsim::text::tokenizer::Tokenizer;

const ESSAY: &str = "Memory safety without garbage collection is the central promise of the \
    language. The borrow checker enforces that every value has a single owner, and that \
    references never outlive the data they point to. Concurrency bugs such as data races \
    become compile-time errors instead of production incidents.";

const PARAPHRASE: &str = "Many languages rely on a garbage collector. In contrast, the borrow \
    checker enforces that every value has a single owner, and that references never outlive \
    the data they point to. This design also turns data races into compile errors.";

const UNRELATED: &str = "Sourdough bread needs a lively starter, patient proofing, and a very \
    hot oven. Scoring the loaf lets steam escape and shapes the final crust.";

fn doc(label: &str, text: &str) -> Arc<Document> {
    Arc::new(Document::from_text(label, text, &Tokenizer::default()))
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("docsim-{}-{name}", std::process::id()))
}

// ============================================================
// Chain: Documents -> Pipeline -> Report
// ============================================================

#[tokio::test]
async fn related_documents_outscore_unrelated_ones() {
    let options = CompareOptions::default();

    let related = run(doc("essay", ESSAY), doc("paraphrase", PARAPHRASE), &options)
        .await
        .unwrap();
    let unrelated = run(doc("essay", ESSAY), doc("bread", UNRELATED), &options)
        .await
        .unwrap();

    for metric in Metric::ALL {
        let r = related.scores.get(metric).unwrap();
        let u = unrelated.scores.get(metric).unwrap();
        assert!(r > u, "{metric}: related {r} should beat unrelated {u}");
    }

    // The copied sentence is found as a shared passage
    assert!(related
        .matches
        .iter()
        .any(|m| m.source_text.contains("every value has a single owner")));
    assert!(unrelated.matches.is_empty());
}

#[tokio::test]
async fn single_method_report_has_one_score() {
    let options = CompareOptions {
        metrics: vec![Metric::Jaccard],
        ..CompareOptions::default()
    };
    let report = run(doc("a", ESSAY), doc("b", PARAPHRASE), &options)
        .await
        .unwrap();
    assert_eq!(report.scores.len(), 1);
    assert!(report.scores.get(Metric::Jaccard).is_some());
    assert_eq!(report.scores.best().map(|(m, _)| m), Some(Metric::Jaccard));
}

#[tokio::test]
async fn empty_documents_are_not_errors() {
    let report = run(doc("a", ""), doc("b", ""), &CompareOptions::default())
        .await
        .unwrap();
    for (_, score) in report.scores.iter() {
        assert_eq!(score, 0.0);
    }
    assert!(report.matches.is_empty());
    assert_eq!(report.source_coverage(), 0.0);
}

#[tokio::test]
async fn config_drives_matcher_threshold() {
    let config = Config::default()
        .apply_overrides(&Overrides {
            min_match_len: Some(5),
            ..Overrides::default()
        })
        .unwrap();
    let options = config.compare_options(Metric::ALL.to_vec());
    assert_eq!(options.matcher.min_match_len, 5);

    let report = run(
        doc("a", "the cat sat on the mat"),
        doc("b", "the cat sat near the mat"),
        &options,
    )
    .await
    .unwrap();
    assert_eq!(report.min_match_len, 5);
    assert_eq!(report.matches.len(), 2);
}

// ============================================================
// Chain: Files -> Documents -> Report files
// ============================================================

#[tokio::test]
async fn load_compare_and_write_reports() {
    let src_path = temp_path("source.txt");
    let cmp_path = temp_path("comparison.txt");
    std::fs::write(&src_path, ESSAY).unwrap();
    std::fs::write(&cmp_path, PARAPHRASE).unwrap();

    let tokenizer = Tokenizer::default();
    let source = Arc::new(Document::load(&src_path, &tokenizer).unwrap());
    let comparison = Arc::new(Document::load(&cmp_path, &tokenizer).unwrap());

    let options = CompareOptions {
        matcher: MatcherConfig {
            min_match_len: 20,
            ..MatcherConfig::default()
        },
        ..CompareOptions::default()
    };
    let report = run(source, comparison, &options).await.unwrap();
    assert!(!report.matches.is_empty());

    // JSON round-trip
    let json_path = temp_path("report.json");
    write_report(&report, &json_path).unwrap();
    let raw = std::fs::read_to_string(&json_path).unwrap();
    assert!(raw.contains("\"Cosine Similarity\""));
    let restored: ComparisonReport = serde_json::from_str(&raw).unwrap();
    assert_eq!(restored.matches, report.matches);
    assert_eq!(restored.source, report.source);

    // Markdown
    let md_path = temp_path("report.md");
    write_report(&report, &md_path).unwrap();
    let md = std::fs::read_to_string(&md_path).unwrap();
    assert!(md.contains("# Document Similarity Report"));
    assert!(md.contains("N-gram Similarity"));
    assert!(md.contains("single owner"));

    for path in [src_path, cmp_path, json_path, md_path] {
        let _ = std::fs::remove_file(path);
    }
}

#[test]
fn write_report_to_missing_directory_fails() {
    let report = ComparisonReport {
        source: docsim::report::DocumentSummary {
            label: "a".to_string(),
            chars: 0,
            tokens: 0,
        },
        comparison: docsim::report::DocumentSummary {
            label: "b".to_string(),
            chars: 0,
            tokens: 0,
        },
        ngram_size: 3,
        min_match_len: 30,
        scores: Default::default(),
        matches: Default::default(),
        generated_at: "2026-01-01T00:00:00+00:00".to_string(),
    };
    let path = std::env::temp_dir()
        .join("docsim-no-such-dir")
        .join("nested")
        .join("report.md");
    assert!(write_report(&report, &path).is_err());
}

// ============================================================
// Output helpers
// ============================================================

#[test]
fn truncate_chars_respects_multibyte() {
    assert_eq!(truncate_chars("héllo wörld", 5), "héllo...");
    assert_eq!(truncate_chars("short", 10), "short");
}
