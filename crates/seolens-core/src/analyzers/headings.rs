//! Heading hierarchy checks

use serde_json::json;

use super::shares_significant_word;
use crate::types::{AnalysisResult, Issue, PageData};

const INFO: &str = "Headings outline the page for readers and crawlers. Use a single H1 that \
matches the title, then H2 and H3 subheadings without skipping levels.";

const LEVELS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

pub fn analyze(page: &PageData) -> AnalysisResult {
    let mut issues = Vec::new();

    let h1 = page.headings_at("h1");
    let h2_count = page.headings_at("h2").len();
    let h3_count = page.headings_at("h3").len();

    if h1.is_empty() {
        issues.push(
            Issue::critical("missing-h1", 15, "Page has no H1 heading")
                .recommend("Add a single H1 describing the page's main topic"),
        );
    } else if h1.len() > 1 {
        issues.push(
            Issue::warning(
                "multiple-h1",
                8,
                format!("Page has {} H1 headings (recommended: 1)", h1.len()),
            )
            .recommend("Keep one H1 and demote the others to H2"),
        );
    }

    if h2_count == 0 {
        issues.push(
            Issue::warning("missing-h2", 10, "Page has no H2 subheadings")
                .recommend("Split the content into sections with H2 headings"),
        );
    }

    if h2_count > 0 && h1.is_empty() {
        issues.push(
            Issue::warning("h2-without-h1", 8, "H2 headings are used without an H1")
                .recommend("Introduce the sections with an H1 heading"),
        );
    }

    if h3_count > 0 && h2_count == 0 {
        issues.push(
            Issue::warning("h3-without-h2", 6, "H3 headings are used without an H2")
                .recommend("Do not skip heading levels"),
        );
    }

    let h1_matches_title = !h1.is_empty() && shares_significant_word(&h1.join(" "), &page.title);
    if !h1.is_empty() && !h1_matches_title {
        issues.push(
            Issue::warning(
                "h1-title-mismatch",
                10,
                "The H1 shares no keywords with the page title",
            )
            .recommend("Align the H1 with the title's main keywords"),
        );
    }

    let counts: serde_json::Map<String, serde_json::Value> = LEVELS
        .iter()
        .map(|level| (level.to_string(), json!(page.headings_at(level).len())))
        .collect();

    let data = json!({
        "counts": counts,
        "h1": h1,
        "h1MatchesTitle": h1_matches_title,
    });

    AnalysisResult::from_issues(issues, data, INFO)
}
