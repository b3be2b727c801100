//! Anchor text quality and internal/external link balance

use serde_json::json;

use crate::types::{AnalysisResult, Issue, PageData};

const INFO: &str = "Links help crawlers discover pages and understand context. Use descriptive \
anchor text, link to related internal pages and cite relevant external sources.";

const GENERIC_TEXTS: [&str; 6] = ["click here", "read more", "learn more", "more", "link", "here"];

pub fn analyze(page: &PageData) -> AnalysisResult {
    let total = page.links.len();

    if total == 0 {
        let issue = Issue::warning("no-links", 20, "Page contains no links")
            .recommend("Link to related internal pages and useful external resources");
        return AnalysisResult::from_issues(
            vec![issue],
            json!({ "totalLinks": 0, "internalLinks": 0, "externalLinks": 0 }),
            INFO,
        );
    }

    let mut issues = Vec::new();

    let empty_text = page
        .links
        .iter()
        .filter(|link| link.text.trim().is_empty())
        .count();
    if empty_text > 0 {
        issues.push(
            Issue::warning(
                "empty-link-text",
                (empty_text as u32).saturating_mul(3).min(15),
                format!("{empty_text} link(s) have no anchor text"),
            )
            .recommend("Give every link visible, descriptive text or an aria-label"),
        );
    }

    let generic_text = page
        .links
        .iter()
        .filter(|link| GENERIC_TEXTS.contains(&link.text.trim().to_lowercase().as_str()))
        .count();
    if generic_text > 0 {
        issues.push(
            Issue::warning(
                "generic-link-text",
                (generic_text as u32).saturating_mul(2).min(10),
                format!("{generic_text} link(s) use generic text such as \"click here\""),
            )
            .recommend("Describe the link target in the anchor text"),
        );
    }

    if total > 100 {
        issues.push(
            Issue::warning(
                "too-many-links",
                10,
                format!("Page has {total} links (recommended: 100 or fewer)"),
            )
            .recommend("Trim navigation and footer links to the most useful ones"),
        );
    }

    let external = page.links.iter().filter(|link| link.is_external).count();
    let internal = total - external;

    if external == 0 {
        issues.push(
            Issue::info("no-external-links", 5, "Page has no external links")
                .recommend("Cite authoritative external sources where relevant"),
        );
    }

    if internal < 3 {
        issues.push(
            Issue::warning(
                "few-internal-links",
                8,
                format!("Page has only {internal} internal link(s) (recommended: 3+)"),
            )
            .recommend("Link to related pages on the same site"),
        );
    }

    let data = json!({
        "totalLinks": total,
        "internalLinks": internal,
        "externalLinks": external,
        "emptyTextLinks": empty_text,
        "genericTextLinks": generic_text,
    });

    AnalysisResult::from_issues(issues, data, INFO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::test_support::{issue_ids, page};
    use crate::types::LinkData;

    fn link(text: &str, is_external: bool) -> LinkData {
        LinkData {
            text: text.to_string(),
            is_external,
        }
    }

    fn balanced_links() -> Vec<LinkData> {
        vec![
            link("Pricing", false),
            link("Documentation", false),
            link("Blog archive", false),
            link("Tokio project", true),
        ]
    }

    #[test]
    fn test_no_links_scores_80() {
        let result = analyze(&page());
        assert_eq!(result.score, 80);
        assert_eq!(issue_ids(&result), vec!["no-links"]);
        assert_eq!(result.issues[0].severity, crate::types::Severity::Warning);
    }

    #[test]
    fn test_balanced_links_score_100() {
        let mut page = page();
        page.links = balanced_links();
        let result = analyze(&page);
        assert!(result.issues.is_empty());
        assert_eq!(result.data["internalLinks"], 3);
        assert_eq!(result.data["externalLinks"], 1);
    }

    #[test]
    fn test_anchor_text_penalties_are_capped() {
        let mut page = page();
        page.links = balanced_links();
        page.links.extend((0..8).map(|_| link("  ", false)));
        page.links.extend((0..7).map(|_| link("Click Here", false)));

        let result = analyze(&page);
        let impacts: Vec<(&str, u32)> = result
            .issues
            .iter()
            .map(|issue| (issue.id.as_str(), issue.impact))
            .collect();
        assert_eq!(impacts, vec![("empty-link-text", 15), ("generic-link-text", 10)]);
    }

    #[test]
    fn test_only_internal_few_links() {
        let mut page = page();
        page.links = vec![link("Home", false), link("read more", false)];
        let result = analyze(&page);
        assert_eq!(
            issue_ids(&result),
            vec!["generic-link-text", "no-external-links", "few-internal-links"]
        );
        assert_eq!(result.score, 100 - 2 - 5 - 8);
    }

    #[test]
    fn test_too_many_links() {
        let mut page = page();
        page.links = (0..101)
            .map(|i| link(&format!("Article {i}"), i % 2 == 0))
            .collect();
        let result = analyze(&page);
        assert_eq!(issue_ids(&result), vec!["too-many-links"]);
    }
}
