//! Common types used across seolens

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// Everything the analyzers know about a page, extracted up front
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageData {
    pub url: String,
    pub title: String,
    /// Free-form meta values keyed by name, property or http-equiv
    pub meta_tags: BTreeMap<String, String>,
    /// Heading texts keyed by level ("h1".."h6"), in document order
    pub headings: BTreeMap<String, Vec<String>>,
    pub images: Vec<ImageData>,
    pub links: Vec<LinkData>,
    /// Plain text, paragraphs separated by blank lines
    pub content: String,
    /// Raw markup, searched for literal markers
    pub html_content: String,
    pub performance_metrics: Option<PerformanceMetrics>,
}

impl PageData {
    /// Look up a meta value, treating blank values as absent
    pub fn meta(&self, key: &str) -> Option<&str> {
        self.meta_tags
            .get(key)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    /// Headings of one level, empty when the level is missing
    pub fn headings_at(&self, level: &str) -> &[String] {
        self.headings.get(level).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageData {
    pub src: String,
    pub alt: String,
    pub dimensions: Option<Dimensions>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LinkData {
    pub text: String,
    pub is_external: bool,
}

/// Pre-measured loading metrics. Timings are in milliseconds, size in KB.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PerformanceMetrics {
    pub lcp: f64,
    pub fid: f64,
    pub cls: f64,
    pub ttfb: f64,
    pub page_size: f64,
    pub request_count: f64,
}

/// Severity of a detected issue, also used as the status of a feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Severity {
    Critical,
    Warning,
    Info,
    Good,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Warning => "warning",
            Severity::Info => "info",
            Severity::Good => "good",
        }
    }
}

impl From<&str> for Severity {
    /// Unrecognized severities are downgraded to `Info`
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "critical" => Severity::Critical,
            "warning" => Severity::Warning,
            "good" => Severity::Good,
            _ => Severity::Info,
        }
    }
}

impl From<String> for Severity {
    fn from(value: String) -> Self {
        Severity::from(value.as_str())
    }
}

/// A single detected problem and the points it costs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub id: String,
    pub message: String,
    pub severity: Severity,
    pub impact: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

impl Issue {
    pub fn new(
        id: impl Into<String>,
        severity: Severity,
        impact: u32,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            message: message.into(),
            severity,
            impact,
            recommendation: None,
        }
    }

    pub fn critical(id: impl Into<String>, impact: u32, message: impl Into<String>) -> Self {
        Self::new(id, Severity::Critical, impact, message)
    }

    pub fn warning(id: impl Into<String>, impact: u32, message: impl Into<String>) -> Self {
        Self::new(id, Severity::Warning, impact, message)
    }

    pub fn info(id: impl Into<String>, impact: u32, message: impl Into<String>) -> Self {
        Self::new(id, Severity::Info, impact, message)
    }

    pub fn recommend(mut self, recommendation: impl Into<String>) -> Self {
        self.recommendation = Some(recommendation.into());
        self
    }
}

/// UI-facing form of an issue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub message: String,
    pub status: Severity,
}

/// Output of a single analyzer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub score: u8,
    #[serde(default)]
    pub issues: Vec<Issue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedbacks: Option<Vec<Feedback>>,
    #[serde(default)]
    pub data: JsonValue,
    #[serde(default)]
    pub info: String,
}

impl AnalysisResult {
    /// Build a result by folding issue impacts into a score.
    ///
    /// Every analyzer starts from 100 and loses each issue's impact; the
    /// total is clamped to 0..=100 once at the end.
    pub fn from_issues(issues: Vec<Issue>, data: JsonValue, info: impl Into<String>) -> Self {
        let penalty: u64 = issues.iter().map(|issue| u64::from(issue.impact)).sum();
        let score = 100u64.saturating_sub(penalty).min(100) as u8;

        Self {
            score,
            issues,
            feedbacks: None,
            data,
            info: info.into(),
        }
    }
}

/// One analyzer slot in the aggregated report
///
/// Declaration order is the report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Meta,
    Keywords,
    Images,
    Headings,
    Links,
    Content,
    Performance,
    Social,
    Mobile,
    Security,
    StructuredData,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::Meta,
        Category::Keywords,
        Category::Images,
        Category::Headings,
        Category::Links,
        Category::Content,
        Category::Performance,
        Category::Social,
        Category::Mobile,
        Category::Security,
        Category::StructuredData,
    ];

    /// Key used in JSON output
    pub fn key(&self) -> &'static str {
        match self {
            Category::Meta => "meta",
            Category::Keywords => "keywords",
            Category::Images => "images",
            Category::Headings => "headings",
            Category::Links => "links",
            Category::Content => "content",
            Category::Performance => "performance",
            Category::Social => "social",
            Category::Mobile => "mobile",
            Category::Security => "security",
            Category::StructuredData => "structured-data",
        }
    }

    /// Weight of this category in the overall score
    pub fn weight(&self) -> f64 {
        match self {
            Category::Meta => 1.5,
            Category::Content => 2.0,
            Category::Keywords => 1.5,
            Category::Headings => 1.0,
            Category::Images => 1.0,
            Category::Links => 1.0,
            Category::Performance => 1.5,
            Category::Mobile => 1.5,
            Category::Security => 1.0,
            Category::Social => 0.5,
            Category::StructuredData => 1.0,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Aggregated report for one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteAnalysisResults {
    pub url: String,
    pub timestamp: String,
    pub overall_score: u8,
    pub categories: BTreeMap<Category, AnalysisResult>,
}
