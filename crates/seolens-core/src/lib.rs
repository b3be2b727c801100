//! # seolens-core
//!
//! Core library for rule-based on-page SEO analysis.
//!
//! This library provides:
//! - HTML parsing into a [`PageData`] snapshot
//! - Eleven independent analyzers (meta, content, keywords, headings, images,
//!   links, mobile, security, social, structured data, performance)
//! - A weighted aggregator producing a [`CompleteAnalysisResults`] report
//!
//! ## Features
//!
//! - `default`: Parsing and analysis, no network access
//! - `fetch`: Fetch pages over HTTP before analysis
//!
//! ## Example
//!
//! ```
//! use seolens_core::{AnalysisOptions, parser, run_complete_analysis};
//!
//! # fn example() -> anyhow::Result<()> {
//! let html = r#"
//!     <html><head><title>Example</title></head>
//!     <body><h1>Example</h1><p>Hello world</p></body></html>
//! "#;
//!
//! let page = parser::extract_page_data(html, "https://example.com")?;
//! let report = run_complete_analysis(&page, &AnalysisOptions::default());
//! assert!(report.overall_score <= 100);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod aggregator;
pub mod analyzers;
pub mod api;
pub mod error;
pub mod parser;
pub mod types;

// Re-export commonly used types
pub use types::{
    AnalysisResult, Category, CompleteAnalysisResults, Dimensions, Feedback, ImageData, Issue,
    LinkData, PageData, PerformanceMetrics, Severity,
};

pub use aggregator::{AnalysisOptions, overall_score, run_complete_analysis, run_complete_analysis_at};
pub use analyzers::standardize_analysis_result;
pub use api::{AnalyzeRequest, AnalyzeSource, analyze_html};
pub use error::RequestError;
pub use parser::{extract_page_data, sanitize_html};

#[cfg(feature = "fetch")]
pub use api::analyze_request;

#[cfg(feature = "fetch")]
pub use parser::fetch_html;
