//! JSON request contract for analysis endpoints and tools
//!
//! A request names exactly one source, a URL to fetch or inline HTML, plus
//! optional [`AnalysisOptions`]. The response is a
//! [`CompleteAnalysisResults`] serialized as JSON.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::aggregator::{AnalysisOptions, run_complete_analysis};
use crate::error::RequestError;
use crate::parser;
use crate::types::{CompleteAnalysisResults, PerformanceMetrics};

/// Placeholder address for inline HTML submitted without a URL
pub const INLINE_URL: &str = "about:blank";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyzeRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<AnalysisOptions>,
}

/// Where the page to analyze comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyzeSource {
    Url(Url),
    Html(String),
}

impl AnalyzeRequest {
    /// Validate that exactly one of `url` and `html` is present
    pub fn source(&self) -> Result<AnalyzeSource, RequestError> {
        let url = self.url.as_deref().map(str::trim).filter(|u| !u.is_empty());
        let html = self.html.as_deref().filter(|h| !h.trim().is_empty());

        match (url, html) {
            (None, None) => Err(RequestError::MissingSource),
            (Some(_), Some(_)) => Err(RequestError::AmbiguousSource),
            (None, Some(html)) => Ok(AnalyzeSource::Html(html.to_string())),
            (Some(url), None) => {
                let parsed = Url::parse(url).map_err(|e| RequestError::InvalidUrl {
                    url: url.to_string(),
                    reason: e.to_string(),
                })?;
                if !matches!(parsed.scheme(), "http" | "https") {
                    return Err(RequestError::UnsupportedScheme(parsed.scheme().to_string()));
                }
                Ok(AnalyzeSource::Url(parsed))
            }
        }
    }

    pub fn options(&self) -> AnalysisOptions {
        self.options.clone().unwrap_or_default()
    }
}

/// Extract and analyze an HTML document served from `url`
pub fn analyze_html(
    html: &str,
    url: &str,
    metrics: Option<PerformanceMetrics>,
    options: &AnalysisOptions,
) -> Result<CompleteAnalysisResults> {
    let mut page = parser::extract_page_data(html, url)?;
    page.performance_metrics = metrics;
    Ok(run_complete_analysis(&page, options))
}

/// Resolve a request's source and analyze it
///
/// Requires the `fetch` feature (needs reqwest)
#[cfg(feature = "fetch")]
pub async fn analyze_request(
    request: &AnalyzeRequest,
    metrics: Option<PerformanceMetrics>,
    timeout: std::time::Duration,
) -> Result<CompleteAnalysisResults> {
    let options = request.options();
    match request.source()? {
        AnalyzeSource::Url(url) => {
            let html = parser::fetch_html(url.as_str(), timeout).await?;
            analyze_html(&html, url.as_str(), metrics, &options)
        }
        AnalyzeSource::Html(html) => analyze_html(&html, INLINE_URL, metrics, &options),
    }
}
