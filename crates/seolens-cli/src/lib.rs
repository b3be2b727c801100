//! Argument handling and report rendering for the `seolens` binary
//!
//! Kept out of `main.rs` so the pieces can be unit tested without spawning
//! the CLI.

use std::fmt::Write as FmtWrite;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use seolens_core::{
    AnalysisOptions, AnalyzeRequest, CompleteAnalysisResults, PerformanceMetrics, Severity,
};

pub const APP_NAME: &str = "seolens";

#[derive(Debug, Parser)]
#[command(name = APP_NAME, version)]
#[command(about = "Score a web page against on-page SEO rules")]
pub struct Args {
    /// Page to fetch and analyze
    #[arg(value_name = "URL", conflicts_with_all = ["html_file", "request"])]
    pub url: Option<String>,

    /// Analyze a local HTML document instead of fetching a URL
    #[arg(long, value_name = "FILE", conflicts_with = "request")]
    pub html_file: Option<PathBuf>,

    /// Read a JSON analyze request ({"url"|"html", "options"})
    #[arg(long, value_name = "FILE")]
    pub request: Option<PathBuf>,

    /// Score Core Web Vitals (needs --metrics-file)
    #[arg(long)]
    pub performance: bool,

    /// JSON file with lcp, fid, cls, ttfb, pageSize and requestCount
    #[arg(long, value_name = "FILE")]
    pub metrics_file: Option<PathBuf>,

    /// Score Open Graph and Twitter card tags
    #[arg(long)]
    pub social: bool,

    /// Target keywords, comma separated
    #[arg(long, value_delimiter = ',', value_name = "KEYWORDS")]
    pub keywords: Vec<String>,

    /// Attach related keyword suggestions
    #[arg(long)]
    pub suggestions: bool,

    /// Request competitor analysis (accepted, has no effect)
    #[arg(long)]
    pub competitors: bool,

    /// Print the full report as JSON
    #[arg(long)]
    pub json: bool,

    /// Fetch timeout in seconds
    #[arg(long, env = "SEOLENS_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout: u64,

    /// Log analyzer details to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Assemble the analyze request from the source arguments and option flags
///
/// Flags only ever switch options on; keywords given on the command line
/// replace those from a request file.
pub fn build_request(args: &Args) -> Result<AnalyzeRequest> {
    let mut request = match (&args.request, &args.html_file) {
        (Some(path), _) => {
            let raw = read_file(path)?;
            serde_json::from_str::<AnalyzeRequest>(&raw)
                .with_context(|| format!("invalid analyze request in {}", path.display()))?
        }
        (None, Some(path)) => AnalyzeRequest {
            html: Some(read_file(path)?),
            ..AnalyzeRequest::default()
        },
        (None, None) => AnalyzeRequest {
            url: args.url.clone(),
            ..AnalyzeRequest::default()
        },
    };

    let mut options = request.options.take().unwrap_or_default();
    apply_flags(&mut options, args);
    request.options = Some(options);

    Ok(request)
}

fn apply_flags(options: &mut AnalysisOptions, args: &Args) {
    options.include_performance |= args.performance;
    options.include_social_analysis |= args.social;
    options.include_keyword_suggestions |= args.suggestions;
    options.include_competitor_analysis |= args.competitors;

    let keywords: Vec<String> = args
        .keywords
        .iter()
        .map(|keyword| keyword.trim().to_string())
        .filter(|keyword| !keyword.is_empty())
        .collect();
    if !keywords.is_empty() {
        options.custom_keywords = keywords;
    }
}

pub fn load_metrics(path: Option<&Path>) -> Result<Option<PerformanceMetrics>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let raw = read_file(path)?;
    let metrics = serde_json::from_str(&raw)
        .with_context(|| format!("invalid performance metrics in {}", path.display()))?;
    Ok(Some(metrics))
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

const DIVIDER: &str = "─────────────────────────────────────────────────────────────";
const LABEL_WIDTH: usize = 16;

fn push_section_header(buf: &mut String, icon: &str, title: &str) {
    let _ = writeln!(buf, "{DIVIDER}");
    let _ = writeln!(buf, "{icon} {title}");
    let _ = writeln!(buf, "{DIVIDER}");
}

fn push_key_value(buf: &mut String, label: &str, value: &str) {
    if value.is_empty() {
        return;
    }
    let _ = writeln!(buf, "• {:<width$} : {}", label, value, width = LABEL_WIDTH);
}

fn score_icon(score: u8) -> &'static str {
    match score {
        80..=100 => "✅",
        50..=79 => "⚠️",
        _ => "❌",
    }
}

fn severity_marker(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "✗",
        Severity::Warning => "!",
        Severity::Info => "i",
        Severity::Good => "✓",
    }
}

/// Human-readable report: a summary block, then one section per category
pub fn render_report(results: &CompleteAnalysisResults) -> String {
    let mut output = String::new();

    push_section_header(
        &mut output,
        score_icon(results.overall_score),
        &format!("SEO report: {}", results.url),
    );
    push_key_value(
        &mut output,
        "Overall score",
        &format!("{}/100", results.overall_score),
    );
    push_key_value(&mut output, "Analyzed at", &results.timestamp);
    push_key_value(&mut output, "Categories", &results.categories.len().to_string());
    let _ = writeln!(&mut output);

    for (category, result) in &results.categories {
        push_section_header(
            &mut output,
            score_icon(result.score),
            &format!("{category}: {}/100", result.score),
        );

        if result.issues.is_empty() {
            let _ = writeln!(&mut output, "No issues found.");
        }
        for issue in &result.issues {
            let _ = writeln!(
                &mut output,
                "  [{}] {} ({})",
                severity_marker(issue.severity),
                issue.message,
                issue.severity.as_str()
            );
            if let Some(recommendation) = issue.recommendation.as_deref() {
                let _ = writeln!(&mut output, "    ↳ {recommendation}");
            }
        }
        let _ = writeln!(&mut output);
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use seolens_core::{PageData, run_complete_analysis_at};

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once(APP_NAME).chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn test_url_argument_becomes_request_url() {
        let request = build_request(&args(&["https://example.com"])).unwrap();
        assert_eq!(request.url.as_deref(), Some("https://example.com"));
        assert!(request.html.is_none());
        assert_eq!(request.options, Some(AnalysisOptions::default()));
    }

    #[test]
    fn test_flags_switch_options_on() {
        let request = build_request(&args(&[
            "https://example.com",
            "--performance",
            "--social",
            "--suggestions",
            "--competitors",
            "--keywords",
            "rust, tokio ,,",
        ]))
        .unwrap();

        let options = request.options();
        assert!(options.include_performance);
        assert!(options.include_social_analysis);
        assert!(options.include_keyword_suggestions);
        assert!(options.include_competitor_analysis);
        assert_eq!(options.custom_keywords, vec!["rust", "tokio"]);
    }

    #[test]
    fn test_conflicting_sources_rejected() {
        let parsed = Args::try_parse_from([
            APP_NAME,
            "https://example.com",
            "--html-file",
            "page.html",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_timeout_defaults_to_thirty_seconds() {
        assert_eq!(args(&["https://example.com"]).timeout, 30);
        assert_eq!(args(&["https://example.com", "--timeout", "5"]).timeout, 5);
    }

    #[test]
    fn test_missing_metrics_file_is_none() {
        assert_eq!(load_metrics(None).unwrap(), None);
        assert!(load_metrics(Some(Path::new("/nonexistent/metrics.json"))).is_err());
    }

    #[test]
    fn test_score_icons() {
        assert_eq!(score_icon(100), "✅");
        assert_eq!(score_icon(80), "✅");
        assert_eq!(score_icon(79), "⚠️");
        assert_eq!(score_icon(49), "❌");
    }

    #[test]
    fn test_render_report_lists_categories_and_issues() {
        let results = run_complete_analysis_at(
            &PageData::default(),
            &AnalysisOptions::default(),
            "2024-01-01T00:00:00.000Z",
        );
        let report = render_report(&results);

        assert!(report.contains("Overall score"));
        assert!(report.contains("2024-01-01T00:00:00.000Z"));
        assert!(report.contains("structured-data: "));
        assert!(report.contains("Page is missing a title tag"));
    }
}
