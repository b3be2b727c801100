//! Runs the analyzers and folds their scores into one weighted report

use std::collections::BTreeMap;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::analyzers::{
    self, content, headings, images, keywords, links, meta, mobile, performance, security, social,
    structured_data,
};
use crate::types::{AnalysisResult, Category, CompleteAnalysisResults, PageData};

/// Switches for one analysis run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisOptions {
    /// Score Core Web Vitals (only when the page carries metrics)
    pub include_performance: bool,
    /// Attach related keyword suggestions to the keywords category data
    pub include_keyword_suggestions: bool,
    /// Score Open Graph and Twitter card tags
    pub include_social_analysis: bool,
    /// Accepted for API compatibility; there is no competitor data to compare against
    pub include_competitor_analysis: bool,
    /// Target keywords; extracted from the page when empty
    pub custom_keywords: Vec<String>,
}

/// Analyze a page, stamping the report with the current time
pub fn run_complete_analysis(page: &PageData, options: &AnalysisOptions) -> CompleteAnalysisResults {
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    run_complete_analysis_at(page, options, timestamp)
}

/// Analyze a page with a caller-supplied timestamp
pub fn run_complete_analysis_at(
    page: &PageData,
    options: &AnalysisOptions,
    timestamp: impl Into<String>,
) -> CompleteAnalysisResults {
    if options.include_competitor_analysis {
        debug!("competitor analysis requested but not available; ignoring");
    }

    let mut categories = BTreeMap::new();

    categories.insert(Category::Meta, meta::analyze(page));
    categories.insert(
        Category::Keywords,
        keywords::analyze(
            page,
            keywords::KeywordOptions {
                custom_keywords: &options.custom_keywords,
                include_suggestions: options.include_keyword_suggestions,
            },
        ),
    );
    categories.insert(Category::Images, images::analyze(page));
    categories.insert(Category::Headings, headings::analyze(page));
    categories.insert(Category::Links, links::analyze(page));
    categories.insert(Category::Content, content::analyze(page));

    if options.include_performance {
        if page.performance_metrics.is_some() {
            categories.insert(Category::Performance, performance::analyze(page));
        } else {
            debug!("performance analysis requested but page has no metrics; skipping");
        }
    }
    if options.include_social_analysis {
        categories.insert(Category::Social, social::analyze(page));
    }

    categories.insert(Category::Mobile, mobile::analyze(page));
    categories.insert(Category::Security, security::analyze(page));
    categories.insert(Category::StructuredData, structured_data::analyze(page));

    let categories: BTreeMap<Category, AnalysisResult> = categories
        .into_iter()
        .map(|(category, result)| {
            debug!(
                category = category.key(),
                score = result.score,
                issues = result.issues.len(),
                "category analyzed"
            );
            (category, analyzers::standardize_analysis_result(result))
        })
        .collect();

    let overall_score = overall_score(&categories);
    info!(url = %page.url, overall_score, categories = categories.len(), "analysis complete");

    CompleteAnalysisResults {
        url: page.url.clone(),
        timestamp: timestamp.into(),
        overall_score,
        categories,
    }
}

/// Weighted mean of the present category scores, rounded to the nearest integer
pub fn overall_score(categories: &BTreeMap<Category, AnalysisResult>) -> u8 {
    let (weighted, total_weight) = categories.iter().fold(
        (0.0_f64, 0.0_f64),
        |(weighted, total_weight), (category, result)| {
            let weight = category.weight();
            (weighted + f64::from(result.score) * weight, total_weight + weight)
        },
    );

    if total_weight <= 0.0 {
        return 0;
    }

    (weighted / total_weight).round().clamp(0.0, 100.0) as u8
}
