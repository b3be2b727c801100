//! Rule-based page analyzers
//!
//! Each analyzer is a pure function of [`PageData`](crate::types::PageData)
//! returning an [`AnalysisResult`]. Analyzers never fail: missing input
//! degrades to a low score plus an explanatory issue.

pub mod content;
pub mod headings;
pub mod images;
pub mod keywords;
pub mod links;
pub mod meta;
pub mod mobile;
pub mod performance;
pub mod security;
pub mod social;
pub mod structured_data;

use std::collections::HashSet;

use crate::types::{AnalysisResult, Feedback};

/// Guarantee that a result carries a `feedbacks` list.
///
/// When feedbacks are absent, one is derived per issue with the issue's
/// severity as its status. Existing feedbacks are left untouched.
pub fn standardize_analysis_result(mut result: AnalysisResult) -> AnalysisResult {
    if result.feedbacks.is_none() {
        let feedbacks = result
            .issues
            .iter()
            .map(|issue| Feedback {
                message: issue.message.clone(),
                status: issue.severity,
            })
            .collect();
        result.feedbacks = Some(feedbacks);
    }
    result
}

/// Lowercase words longer than three characters, punctuation stripped
pub(crate) fn significant_words(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| c.is_alphanumeric())
                .collect::<String>()
                .to_lowercase()
        })
        .filter(|word| word.chars().count() > 3)
        .collect()
}

/// True when the two texts share at least one significant word
pub(crate) fn shares_significant_word(left: &str, right: &str) -> bool {
    let left: HashSet<String> = significant_words(left).into_iter().collect();
    significant_words(right)
        .iter()
        .any(|word| left.contains(word))
}

/// File extension of a URL path, lowercased, ignoring query and fragment
pub(crate) fn url_extension(src: &str) -> Option<String> {
    let path = src.split(['?', '#']).next().unwrap_or_default();
    let file = path.rsplit('/').next().unwrap_or_default();
    file.rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::types::PageData;

    /// Page builder for analyzer tests
    pub fn page() -> PageData {
        PageData {
            url: "https://example.com/guide".to_string(),
            ..PageData::default()
        }
    }

    pub fn with_meta(mut page: PageData, key: &str, value: &str) -> PageData {
        page.meta_tags.insert(key.to_string(), value.to_string());
        page
    }

    pub fn with_headings(mut page: PageData, level: &str, texts: &[&str]) -> PageData {
        page.headings.insert(
            level.to_string(),
            texts.iter().map(|text| text.to_string()).collect(),
        );
        page
    }

    pub fn issue_ids(result: &crate::types::AnalysisResult) -> Vec<&str> {
        result.issues.iter().map(|issue| issue.id.as_str()).collect()
    }
}
