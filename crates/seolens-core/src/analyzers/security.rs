//! Transport and markup security checks
//!
//! Header checks look for literal markers in the page markup (for example a
//! `<meta http-equiv="Content-Security-Policy">` tag) rather than real
//! response headers.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::json;
use url::Url;

use crate::types::{AnalysisResult, Issue, PageData};

const INFO: &str = "Secure pages are served over HTTPS, declare a content security policy, \
refuse to be framed by other sites and avoid loading outdated JavaScript libraries.";

/// Known-vulnerable library markers, checked in order; the first hit wins
const VULNERABLE_LIBRARIES: &[(&str, &str)] = &[
    ("jquery-1.", "jQuery 1.x"),
    ("jquery-2.0", "jQuery 2.0"),
    ("jquery-2.1", "jQuery 2.1"),
    ("bootstrap-3.", "Bootstrap 3.x"),
    ("angular.js-1.0", "AngularJS 1.0"),
    ("angular.js-1.1", "AngularJS 1.1"),
    ("angular.js-1.2", "AngularJS 1.2"),
    ("angular.js-1.3", "AngularJS 1.3"),
    ("angular.js-1.4", "AngularJS 1.4"),
    ("angular.js-1.5", "AngularJS 1.5"),
];

static RE_INSECURE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"http://([^\s"'<>)]*)"#).expect("invalid insecure url regex"));

pub fn analyze(page: &PageData) -> AnalysisResult {
    let mut issues = Vec::new();
    let html = page.html_content.as_str();

    let https = is_https(&page.url);
    if !https {
        issues.push(
            Issue::critical("no-https", 25, "Page is not served over HTTPS")
                .recommend("Install a TLS certificate and redirect HTTP to HTTPS"),
        );
    }

    let has_csp = html.contains("Content-Security-Policy");
    if !has_csp {
        issues.push(
            Issue::warning("missing-csp", 10, "No Content-Security-Policy found")
                .recommend("Declare a Content-Security-Policy to restrict script sources"),
        );
    }

    let has_frame_options = html.contains("X-Frame-Options");
    if !has_frame_options {
        issues.push(
            Issue::warning("missing-x-frame-options", 8, "No X-Frame-Options found")
                .recommend("Set X-Frame-Options: DENY or SAMEORIGIN to prevent clickjacking"),
        );
    }

    let mixed_content = https && has_mixed_content(html);
    if mixed_content {
        issues.push(
            Issue::critical(
                "mixed-content",
                15,
                "HTTPS page references resources over plain HTTP",
            )
            .recommend("Load every resource over HTTPS"),
        );
    }

    let vulnerable_library = VULNERABLE_LIBRARIES
        .iter()
        .find(|(marker, _)| html.contains(marker))
        .map(|(_, name)| *name);
    if let Some(name) = vulnerable_library {
        issues.push(
            Issue::critical(
                "vulnerable-library",
                15,
                format!("Page loads {name}, which has known vulnerabilities"),
            )
            .recommend("Upgrade to a supported release of the library"),
        );
    }

    let data = json!({
        "https": https,
        "contentSecurityPolicy": has_csp,
        "xFrameOptions": has_frame_options,
        "mixedContent": mixed_content,
        "vulnerableLibrary": vulnerable_library,
    });

    AnalysisResult::from_issues(issues, data, INFO)
}

fn is_https(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => parsed.scheme() == "https",
        Err(_) => url.trim().to_ascii_lowercase().starts_with("https://"),
    }
}

/// Any `http://` reference that does not point at the local machine
fn has_mixed_content(html: &str) -> bool {
    RE_INSECURE_URL.captures_iter(html).any(|captures| {
        let target = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
        !(target.starts_with("localhost") || target.starts_with("127.0.0.1"))
    })
}
