//! Body text quality: length, readability, structure and duplication

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::json;

use super::{shares_significant_word, significant_words};
use crate::types::{AnalysisResult, Issue, PageData};

const INFO: &str = "Search engines favour substantial, readable, well-structured content. \
Long pages should be broken up with subheadings and lists, and sentences kept short.";

static RE_SENTENCE_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+").expect("invalid sentence regex"));
static RE_PARAGRAPH_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n").expect("invalid paragraph regex"));
static RE_SUBHEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<h[2-6][\s>]").expect("invalid subheading regex"));
static RE_LIST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<(?:ul|ol)[\s>]").expect("invalid list regex"));

pub fn analyze(page: &PageData) -> AnalysisResult {
    let mut issues = Vec::new();
    let content = page.content.as_str();

    let word_count = content.split_whitespace().count();
    if word_count < 300 {
        issues.push(
            Issue::critical(
                "thin-content",
                20,
                format!("Thin content: only {word_count} words (recommended: 600+)"),
            )
            .recommend("Expand the page with substantive, original content"),
        );
    } else if word_count < 600 {
        issues.push(
            Issue::warning(
                "short-content",
                10,
                format!("Content is fairly short ({word_count} words, recommended: 600+)"),
            )
            .recommend("Add more depth to cover the topic thoroughly"),
        );
    }

    let sentences: Vec<&str> = RE_SENTENCE_END
        .split(content)
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
        .collect();
    let avg_words_per_sentence = if sentences.is_empty() {
        0.0
    } else {
        word_count as f64 / sentences.len() as f64
    };
    if avg_words_per_sentence > 25.0 {
        issues.push(
            Issue::warning(
                "long-sentences",
                8,
                format!(
                    "Sentences average {avg_words_per_sentence:.1} words (recommended: 25 or fewer)"
                ),
            )
            .recommend("Split long sentences to improve readability"),
        );
    }

    let long_paragraphs = RE_PARAGRAPH_BREAK
        .split(content)
        .filter(|paragraph| paragraph.split_whitespace().count() > 150)
        .count();
    if long_paragraphs > 0 {
        issues.push(
            Issue::warning(
                "long-paragraphs",
                (long_paragraphs as u32).saturating_mul(2).min(10),
                format!("{long_paragraphs} paragraph(s) exceed 150 words"),
            )
            .recommend("Break long paragraphs into smaller chunks"),
        );
    }

    // A title without significant words has nothing to match, so it never mismatches
    let title_has_keywords = !significant_words(&page.title).is_empty();
    let title_overlap = title_has_keywords && shares_significant_word(&page.title, content);
    if title_has_keywords && !title_overlap {
        issues.push(
            Issue::critical(
                "title-content-mismatch",
                15,
                "None of the title's keywords appear in the body content",
            )
            .recommend("Make sure the content covers the topic promised by the title"),
        );
    }

    let unique_sentences: HashSet<String> = sentences
        .iter()
        .map(|sentence| sentence.to_lowercase())
        .collect();
    let unique_ratio = if sentences.is_empty() {
        1.0
    } else {
        unique_sentences.len() as f64 / sentences.len() as f64
    };
    if unique_ratio < 0.8 {
        issues.push(
            Issue::warning(
                "repetitive-content",
                10,
                format!(
                    "Only {:.0}% of sentences are unique; content looks repetitive",
                    unique_ratio * 100.0
                ),
            )
            .recommend("Remove duplicated sentences and boilerplate"),
        );
    }

    let has_subheadings = RE_SUBHEADING.is_match(&page.html_content);
    if !has_subheadings && word_count > 300 {
        issues.push(
            Issue::warning("no-subheadings", 8, "Long content has no subheadings")
                .recommend("Structure the content with H2 and H3 subheadings"),
        );
    }

    let has_lists = RE_LIST.is_match(&page.html_content);
    if !has_lists && word_count > 500 {
        issues.push(
            Issue::info("no-lists", 5, "Long content has no bulleted or numbered lists")
                .recommend("Use lists to make key points easy to scan"),
        );
    }

    let data = json!({
        "wordCount": word_count,
        "sentenceCount": sentences.len(),
        "avgWordsPerSentence": (avg_words_per_sentence * 10.0).round() / 10.0,
        "longParagraphs": long_paragraphs,
        "uniqueSentenceRatio": (unique_ratio * 100.0).round() / 100.0,
        "titleOverlap": title_overlap,
        "hasSubheadings": has_subheadings,
        "hasLists": has_lists,
    });

    AnalysisResult::from_issues(issues, data, INFO)
}
