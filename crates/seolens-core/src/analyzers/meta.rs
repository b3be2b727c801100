//! Title, description, canonical and viewport checks

use serde_json::json;

use crate::types::{AnalysisResult, Issue, PageData};

const INFO: &str = "Meta tags tell search engines what a page is about. The title and \
description are shown in search results, the canonical URL prevents duplicate content and \
the viewport tag enables mobile rendering.";

pub fn analyze(page: &PageData) -> AnalysisResult {
    let mut issues = Vec::new();

    let title = page.title.trim();
    let title_length = title.chars().count();
    if title.is_empty() {
        issues.push(
            Issue::critical("missing-title", 20, "Page is missing a title tag")
                .recommend("Add a descriptive title between 30 and 60 characters"),
        );
    } else if title_length < 30 {
        issues.push(
            Issue::warning(
                "title-too-short",
                10,
                format!("Title is too short ({title_length} chars, recommended: 30-60)"),
            )
            .recommend("Expand the title with the page's main topic"),
        );
    } else if title_length > 60 {
        issues.push(
            Issue::warning(
                "title-too-long",
                8,
                format!("Title is too long ({title_length} chars, recommended: 30-60)"),
            )
            .recommend("Shorten the title so it is not truncated in search results"),
        );
    }

    let description = page.meta("description");
    let description_length = description.map(|d| d.chars().count()).unwrap_or(0);
    match description {
        None => issues.push(
            Issue::critical("missing-description", 15, "Page is missing a meta description")
                .recommend("Add a meta description between 120 and 160 characters"),
        ),
        Some(_) if description_length < 120 => issues.push(
            Issue::warning(
                "description-too-short",
                8,
                format!(
                    "Meta description is too short ({description_length} chars, recommended: 120-160)"
                ),
            )
            .recommend("Summarize the page in one or two full sentences"),
        ),
        Some(_) if description_length > 160 => issues.push(
            Issue::warning(
                "description-too-long",
                5,
                format!(
                    "Meta description is too long ({description_length} chars, recommended: 120-160)"
                ),
            )
            .recommend("Trim the description so it is not truncated in search results"),
        ),
        Some(_) => {}
    }

    let canonical = page.meta("canonical");
    if canonical.is_none() {
        issues.push(
            Issue::warning("missing-canonical", 10, "Page has no canonical URL")
                .recommend("Add a link rel=\"canonical\" pointing at the preferred URL"),
        );
    }

    let viewport = page.meta("viewport");
    if viewport.is_none() {
        issues.push(
            Issue::critical("missing-viewport", 12, "Page is missing a viewport meta tag")
                .recommend("Add <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">"),
        );
    }

    let data = json!({
        "title": title,
        "titleLength": title_length,
        "description": description,
        "descriptionLength": description_length,
        "canonical": canonical,
        "viewport": viewport,
    });

    AnalysisResult::from_issues(issues, data, INFO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::test_support::{issue_ids, page, with_meta};
    use crate::types::Severity;

    fn complete_page() -> PageData {
        let mut page = page();
        page.title = "A practical guide to async Rust services".to_string();
        let page = with_meta(
            page,
            "description",
            &"Learn how to structure async Rust services with tokio, from task spawning \
              and cancellation to graceful shutdown and structured logging."
                .to_string(),
        );
        let page = with_meta(page, "canonical", "https://example.com/guide");
        with_meta(page, "viewport", "width=device-width, initial-scale=1")
    }

    #[test]
    fn test_everything_missing_scores_43() {
        let result = analyze(&page());

        assert_eq!(result.score, 43);
        assert_eq!(
            issue_ids(&result),
            vec![
                "missing-title",
                "missing-description",
                "missing-canonical",
                "missing-viewport"
            ]
        );
        let severities: Vec<Severity> = result.issues.iter().map(|i| i.severity).collect();
        assert_eq!(
            severities,
            vec![
                Severity::Critical,
                Severity::Critical,
                Severity::Warning,
                Severity::Critical
            ]
        );
    }

    #[test]
    fn test_complete_page_scores_100() {
        let result = analyze(&complete_page());
        assert!(result.issues.is_empty(), "{:?}", issue_ids(&result));
        assert_eq!(result.score, 100);
    }

    #[test]
    fn test_short_title_and_long_description() {
        let mut page = complete_page();
        page.title = "Short".to_string();
        let page = with_meta(page, "description", &"x".repeat(161));

        let result = analyze(&page);
        assert_eq!(issue_ids(&result), vec!["title-too-short", "description-too-long"]);
        assert_eq!(result.score, 100 - 10 - 5);
    }

    #[test]
    fn test_long_title_and_short_description() {
        let mut page = complete_page();
        page.title = "t".repeat(61);
        let page = with_meta(page, "description", "Too short");

        let result = analyze(&page);
        assert_eq!(issue_ids(&result), vec!["title-too-long", "description-too-short"]);
        assert_eq!(result.score, 100 - 8 - 8);
    }

    #[test]
    fn test_blank_description_counts_as_missing() {
        let page = with_meta(complete_page(), "description", "   ");
        let result = analyze(&page);
        assert_eq!(issue_ids(&result), vec!["missing-description"]);
    }

    #[test]
    fn test_data_reports_lengths() {
        let result = analyze(&complete_page());
        assert_eq!(result.data["titleLength"], 40);
        assert_eq!(result.data["canonical"], "https://example.com/guide");
    }
}
