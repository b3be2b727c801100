//! Keyword placement and density
//!
//! Target keywords are either supplied by the caller or extracted as the most
//! frequent significant terms of the page. Each keyword is checked against
//! the title, the meta description, the headings and the body text.

use std::collections::HashMap;

use serde_json::{Value as JsonValue, json};

use crate::types::{AnalysisResult, Issue, PageData};

const INFO: &str = "Keywords should appear in the title, the meta description and at least \
one heading, and occur naturally in the body at a density between 0.5% and 3%.";

/// How many keywords are extracted when none are supplied
const EXTRACTED_KEYWORDS: usize = 5;
const MAX_SUGGESTIONS: usize = 5;

const STOP_WORDS: &[&str] = &[
    "about", "also", "been", "could", "does", "each", "from", "have", "here", "into", "just",
    "like", "more", "only", "other", "over", "should", "some", "such", "than", "that", "their",
    "them", "then", "there", "these", "they", "this", "those", "very", "were", "what", "when",
    "where", "which", "will", "with", "would", "your",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordOptions<'a> {
    /// Caller-supplied target keywords; extraction is used when empty
    pub custom_keywords: &'a [String],
    /// Attach related term suggestions to the result data
    pub include_suggestions: bool,
}

pub fn analyze(page: &PageData, options: KeywordOptions<'_>) -> AnalysisResult {
    let ranked = rank_terms(page);

    let custom: Vec<String> = options
        .custom_keywords
        .iter()
        .map(|keyword| keyword.trim().to_lowercase())
        .filter(|keyword| !keyword.is_empty())
        .collect();
    let (keywords, source) = if custom.is_empty() {
        let extracted = ranked
            .iter()
            .take(EXTRACTED_KEYWORDS)
            .map(|(term, _)| term.clone())
            .collect::<Vec<_>>();
        (extracted, "extracted")
    } else {
        (custom, "custom")
    };

    let content = page.content.to_lowercase();
    let content_length = page.content.chars().count();
    let title = page.title.to_lowercase();
    let description = page.meta("description").unwrap_or_default().to_lowercase();
    let headings: Vec<String> = page
        .headings
        .values()
        .flatten()
        .map(|heading| heading.to_lowercase())
        .collect();

    let mut issues = Vec::new();
    let mut stats = Vec::new();

    for keyword in &keywords {
        let slug = keyword.split_whitespace().collect::<Vec<_>>().join("-");
        let in_title = title.contains(keyword.as_str());
        let in_description = description.contains(keyword.as_str());
        let in_headings = headings
            .iter()
            .any(|heading| heading.contains(keyword.as_str()));
        let occurrences = content.matches(keyword.as_str()).count();
        let density = if content_length == 0 {
            0.0
        } else {
            (occurrences * keyword.chars().count()) as f64 / content_length as f64 * 100.0
        };

        if !in_title {
            issues.push(
                Issue::warning(
                    format!("keyword-not-in-title-{slug}"),
                    8,
                    format!("Keyword \"{keyword}\" does not appear in the title"),
                )
                .recommend("Work the keyword into the page title"),
            );
        }
        if !in_description {
            issues.push(
                Issue::warning(
                    format!("keyword-not-in-description-{slug}"),
                    6,
                    format!("Keyword \"{keyword}\" does not appear in the meta description"),
                )
                .recommend("Mention the keyword in the meta description"),
            );
        }
        if !in_headings {
            issues.push(
                Issue::warning(
                    format!("keyword-not-in-headings-{slug}"),
                    5,
                    format!("Keyword \"{keyword}\" does not appear in any heading"),
                )
                .recommend("Use the keyword in at least one heading"),
            );
        }
        // Absence outranks density: a missing keyword is not also "low density"
        if occurrences == 0 {
            issues.push(
                Issue::critical(
                    format!("keyword-not-in-content-{slug}"),
                    15,
                    format!("Keyword \"{keyword}\" does not appear in the content"),
                )
                .recommend("Cover the keyword's topic in the body text"),
            );
        } else if density < 0.5 {
            issues.push(
                Issue::warning(
                    format!("keyword-density-low-{slug}"),
                    5,
                    format!("Keyword \"{keyword}\" density is low ({density:.2}%)"),
                )
                .recommend("Use the keyword a little more often (0.5% - 3%)"),
            );
        } else if density > 3.0 {
            issues.push(
                Issue::warning(
                    format!("keyword-density-high-{slug}"),
                    7,
                    format!("Keyword \"{keyword}\" density is high ({density:.2}%)"),
                )
                .recommend("Reduce repetition to avoid keyword stuffing"),
            );
        }

        stats.push(json!({
            "keyword": keyword,
            "occurrences": occurrences,
            "density": (density * 100.0).round() / 100.0,
            "inTitle": in_title,
            "inDescription": in_description,
            "inHeadings": in_headings,
        }));
    }

    let mut data = json!({
        "source": source,
        "keywords": stats,
    });
    if options.include_suggestions {
        let suggestions: Vec<&str> = ranked
            .iter()
            .map(|(term, _)| term.as_str())
            .filter(|term| !keywords.iter().any(|keyword| keyword.as_str() == *term))
            .take(MAX_SUGGESTIONS)
            .collect();
        data["suggestions"] = JsonValue::from(suggestions);
    }

    AnalysisResult::from_issues(issues, data, INFO)
}

/// Significant terms of content and title, most frequent first.
///
/// Ties keep the order of first appearance.
fn rank_terms(page: &PageData) -> Vec<(String, usize)> {
    let mut ranked: Vec<(String, usize)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    let tokens = page
        .content
        .split_whitespace()
        .chain(page.title.split_whitespace())
        .map(normalize_token)
        .filter(|token| is_candidate(token));

    for token in tokens {
        let existing = positions.get(&token).copied();
        match existing {
            Some(index) => ranked[index].1 += 1,
            None => {
                positions.insert(token.clone(), ranked.len());
                ranked.push((token, 1));
            }
        }
    }

    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

fn normalize_token(token: &str) -> String {
    token
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect::<String>()
        .to_lowercase()
}

fn is_candidate(token: &str) -> bool {
    token.chars().count() > 3
        && !token.chars().all(|c| c.is_numeric())
        && !STOP_WORDS.contains(&token)
}
