//! End-to-end scenarios through the public API

use seolens_core::analyzers::{images, links, meta, performance};
use seolens_core::{
    AnalysisOptions, AnalysisResult, Category, Feedback, Issue, PageData, Severity,
    analyze_html, run_complete_analysis_at, standardize_analysis_result,
};

const TIMESTAMP: &str = "2024-01-01T00:00:00.000Z";

const WELL_FORMED: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Async Rust Guide: Tokio Runtime Basics</title>
    <meta name="description" content="Learn how the tokio runtime schedules async tasks, with worked examples covering spawning, joining and cancellation in depth.">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <meta http-equiv="Content-Security-Policy" content="default-src 'self'">
    <meta http-equiv="X-Frame-Options" content="DENY">
    <link rel="canonical" href="https://example.com/guide">
    <script type="application/ld+json">{"@context": "https://schema.org", "@type": "Article"}</script>
</head>
<body>
    <h1>Async Rust Guide</h1>
    <h2>Spawning tasks</h2>
    <p>The tokio runtime drives futures to completion on a pool of worker threads.</p>
    <img src="/diagram.webp" alt="Runtime diagram" width="640" height="480">
    <a href="/docs">Runtime docs</a>
    <a href="/examples">Runtime examples</a>
    <a href="/faq">Runtime questions</a>
    <a href="https://tokio.rs">Tokio website</a>
</body>
</html>"#;

#[test]
fn meta_with_nothing_present_scores_43() {
    let result = meta::analyze(&PageData::default());
    assert_eq!(result.score, 43);
}

#[test]
fn performance_without_metrics_scores_zero() {
    let result = performance::analyze(&PageData::default());
    assert_eq!(result.score, 0);
    assert_eq!(result.issues.len(), 1);
    assert_eq!(result.issues[0].severity, Severity::Info);
}

#[test]
fn no_images_scores_100_with_empty_data() {
    let result = images::analyze(&PageData::default());
    assert_eq!(result.score, 100);
    assert!(result.issues.is_empty());
    assert_eq!(result.data, serde_json::json!({"images": []}));
}

#[test]
fn no_links_scores_80() {
    let result = links::analyze(&PageData::default());
    assert_eq!(result.score, 80);
}

#[test]
fn default_options_give_nine_categories() {
    let report = run_complete_analysis_at(&PageData::default(), &AnalysisOptions::default(), TIMESTAMP);
    let keys: Vec<&str> = report.categories.keys().map(Category::key).collect();
    assert_eq!(
        keys,
        [
            "meta",
            "keywords",
            "images",
            "headings",
            "links",
            "content",
            "mobile",
            "security",
            "structured-data"
        ]
    );
}

#[test]
fn standardizer_keeps_existing_feedbacks() {
    let mut result = AnalysisResult::from_issues(
        vec![Issue::warning("a", 5, "First"), Issue::critical("b", 5, "Second")],
        serde_json::json!({}),
        "",
    );
    let existing = vec![Feedback {
        message: "Already there".to_string(),
        status: Severity::Good,
    }];
    result.feedbacks = Some(existing.clone());

    let standardized = standardize_analysis_result(result);
    assert_eq!(standardized.feedbacks, Some(existing));
}

#[test]
fn well_formed_https_page_scores_well() {
    let options = AnalysisOptions {
        custom_keywords: vec!["tokio".to_string()],
        ..AnalysisOptions::default()
    };
    let report = analyze_html(WELL_FORMED, "https://example.com/guide", None, &options).unwrap();

    let security = &report.categories[&Category::Security];
    assert_eq!(security.score, 100, "unexpected issues: {:?}", security.issues);

    let structured = &report.categories[&Category::StructuredData];
    assert_eq!(structured.score, 100);

    let links = &report.categories[&Category::Links];
    assert!(links.issues.iter().all(|issue| issue.id != "no-links"));

    let meta = &report.categories[&Category::Meta];
    assert_eq!(meta.score, 100, "unexpected issues: {:?}", meta.issues);

    assert!(report.overall_score > 50);
}

#[test]
fn report_json_shape() {
    let report = analyze_html(
        WELL_FORMED,
        "https://example.com/guide",
        None,
        &AnalysisOptions::default(),
    )
    .unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["url"], "https://example.com/guide");
    assert!(json["timestamp"].as_str().unwrap().ends_with('Z'));
    let meta = &json["categories"]["meta"];
    for field in ["score", "issues", "feedbacks", "data", "info"] {
        assert!(meta.get(field).is_some(), "missing {field}");
    }
}
