//! Core Web Vitals and page weight
//!
//! Metrics are measured elsewhere and handed in through
//! [`PerformanceMetrics`](crate::types::PerformanceMetrics). Without them the
//! category scores 0.

use serde_json::json;

use crate::types::{AnalysisResult, Issue, PageData, PerformanceMetrics};

const INFO: &str = "Fast pages rank and convert better. Largest Contentful Paint, First Input \
Delay and Cumulative Layout Shift are the Core Web Vitals; server response time, page weight \
and request count drive them.";

pub fn analyze(page: &PageData) -> AnalysisResult {
    let Some(metrics) = page.performance_metrics else {
        let issue = Issue::info(
            "missing-performance-data",
            100,
            "No performance metrics were collected for this page",
        )
        .recommend("Measure the page with a lab or field tool and pass the metrics in");
        return AnalysisResult::from_issues(vec![issue], json!({}), INFO);
    };

    let mut issues = Vec::new();
    check_web_vitals(&metrics, &mut issues);
    check_page_weight(&metrics, &mut issues);

    let data = json!({
        "lcp": metrics.lcp,
        "fid": metrics.fid,
        "cls": metrics.cls,
        "ttfb": metrics.ttfb,
        "pageSize": metrics.page_size,
        "requestCount": metrics.request_count,
    });

    AnalysisResult::from_issues(issues, data, INFO)
}

fn check_web_vitals(metrics: &PerformanceMetrics, issues: &mut Vec<Issue>) {
    if metrics.lcp > 4000.0 {
        issues.push(
            Issue::critical(
                "slow-lcp",
                15,
                format!("Largest Contentful Paint is {:.0}ms (poor: > 4000ms)", metrics.lcp),
            )
            .recommend("Optimize the hero image and remove render-blocking resources"),
        );
    } else if metrics.lcp > 2500.0 {
        issues.push(
            Issue::warning(
                "slow-lcp",
                8,
                format!(
                    "Largest Contentful Paint is {:.0}ms (good: 2500ms or less)",
                    metrics.lcp
                ),
            )
            .recommend("Preload the largest above-the-fold element"),
        );
    }

    if metrics.fid > 300.0 {
        issues.push(
            Issue::critical(
                "slow-fid",
                12,
                format!("First Input Delay is {:.0}ms (poor: > 300ms)", metrics.fid),
            )
            .recommend("Break up long JavaScript tasks"),
        );
    } else if metrics.fid > 100.0 {
        issues.push(
            Issue::warning(
                "slow-fid",
                6,
                format!("First Input Delay is {:.0}ms (good: 100ms or less)", metrics.fid),
            )
            .recommend("Defer non-critical JavaScript"),
        );
    }

    if metrics.cls > 0.25 {
        issues.push(
            Issue::critical(
                "high-cls",
                12,
                format!("Cumulative Layout Shift is {:.2} (poor: > 0.25)", metrics.cls),
            )
            .recommend("Reserve space for images, ads and embeds"),
        );
    } else if metrics.cls > 0.1 {
        issues.push(
            Issue::warning(
                "high-cls",
                6,
                format!("Cumulative Layout Shift is {:.2} (good: 0.1 or less)", metrics.cls),
            )
            .recommend("Set explicit sizes on media elements"),
        );
    }

    if metrics.ttfb > 1000.0 {
        issues.push(
            Issue::critical(
                "slow-ttfb",
                10,
                format!("Time to First Byte is {:.0}ms (poor: > 1000ms)", metrics.ttfb),
            )
            .recommend("Cache responses and move the server closer to users"),
        );
    } else if metrics.ttfb > 600.0 {
        issues.push(
            Issue::warning(
                "slow-ttfb",
                5,
                format!("Time to First Byte is {:.0}ms (good: 600ms or less)", metrics.ttfb),
            )
            .recommend("Use a CDN or server-side caching"),
        );
    }
}

fn check_page_weight(metrics: &PerformanceMetrics, issues: &mut Vec<Issue>) {
    if metrics.page_size > 5000.0 {
        issues.push(
            Issue::critical(
                "large-page",
                10,
                format!("Page weighs {:.0}KB (poor: > 5000KB)", metrics.page_size),
            )
            .recommend("Compress images and remove unused scripts"),
        );
    } else if metrics.page_size > 2000.0 {
        issues.push(
            Issue::warning(
                "large-page",
                5,
                format!("Page weighs {:.0}KB (good: 2000KB or less)", metrics.page_size),
            )
            .recommend("Compress assets and lazy-load below-the-fold media"),
        );
    }

    // The request-count bands stack: a page over 100 requests pays all three.
    if metrics.request_count > 30.0 {
        issues.push(
            Issue::info(
                "many-requests",
                5,
                format!("Page makes {:.0} requests (recommended: 30 or fewer)", metrics.request_count),
            )
            .recommend("Bundle scripts and styles"),
        );
    }
    if metrics.request_count > 60.0 {
        issues.push(
            Issue::warning(
                "too-many-requests",
                10,
                format!("Page makes {:.0} requests (over 60)", metrics.request_count),
            )
            .recommend("Remove unnecessary third-party resources"),
        );
    }
    if metrics.request_count > 100.0 {
        issues.push(
            Issue::critical(
                "excessive-requests",
                15,
                format!("Page makes {:.0} requests (over 100)", metrics.request_count),
            )
            .recommend("Audit every request and drop what is not needed"),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::test_support::{issue_ids, page};
    use crate::types::Severity;

    fn fast() -> PerformanceMetrics {
        PerformanceMetrics {
            lcp: 1800.0,
            fid: 40.0,
            cls: 0.02,
            ttfb: 200.0,
            page_size: 900.0,
            request_count: 20.0,
        }
    }

    fn with_metrics(metrics: PerformanceMetrics) -> PageData {
        let mut page = page();
        page.performance_metrics = Some(metrics);
        page
    }

    #[test]
    fn test_missing_metrics_scores_zero() {
        let result = analyze(&page());
        assert_eq!(result.score, 0);
        assert_eq!(issue_ids(&result), vec!["missing-performance-data"]);
        assert_eq!(result.issues[0].severity, Severity::Info);
        assert_eq!(result.data, json!({}));
    }

    #[test]
    fn test_fast_page_scores_100() {
        let result = analyze(&with_metrics(fast()));
        assert!(result.issues.is_empty());
        assert_eq!(result.score, 100);
        assert_eq!(result.data["pageSize"], 900.0);
    }

    #[test]
    fn test_needs_improvement_band() {
        let result = analyze(&with_metrics(PerformanceMetrics {
            lcp: 3000.0,
            fid: 150.0,
            cls: 0.15,
            ttfb: 800.0,
            page_size: 2500.0,
            request_count: 20.0,
        }));
        assert!(result.issues.iter().all(|i| i.severity == Severity::Warning));
        assert_eq!(result.score, 100 - 8 - 6 - 6 - 5 - 5);
    }

    #[test]
    fn test_poor_band() {
        let result = analyze(&with_metrics(PerformanceMetrics {
            lcp: 4500.0,
            fid: 350.0,
            cls: 0.3,
            ttfb: 1200.0,
            page_size: 6000.0,
            request_count: 20.0,
        }));
        assert!(result.issues.iter().all(|i| i.severity == Severity::Critical));
        assert_eq!(result.score, 100 - 15 - 12 - 12 - 10 - 10);
    }

    #[test]
    fn test_request_count_penalties_stack() {
        let result = analyze(&with_metrics(PerformanceMetrics {
            request_count: 150.0,
            ..fast()
        }));
        assert_eq!(
            issue_ids(&result),
            vec!["many-requests", "too-many-requests", "excessive-requests"]
        );
        assert_eq!(result.score, 100 - 5 - 10 - 15);

        let result = analyze(&with_metrics(PerformanceMetrics {
            request_count: 61.0,
            ..fast()
        }));
        assert_eq!(result.score, 100 - 5 - 10);
    }
}
