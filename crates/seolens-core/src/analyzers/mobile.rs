//! Mobile friendliness heuristics over the viewport tag and raw markup

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::json;

use crate::types::{AnalysisResult, Issue, PageData};

const INFO: &str = "Most searches happen on phones. Pages need a responsive viewport, readable \
font sizes, no horizontal scrolling and tap targets large enough for fingers.";

static RE_SMALL_FONT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)font-size\s*:\s*(?:8|9|10)px").expect("invalid font-size regex")
});
static RE_SMALL_TAP_TARGET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<(?:button|input)\b[^>]*\bwidth\s*:\s*(?:[0-9]|[1-3][0-9])px")
        .expect("invalid tap target regex")
});

pub fn analyze(page: &PageData) -> AnalysisResult {
    let mut issues = Vec::new();
    let html = page.html_content.as_str();

    let viewport = page.meta("viewport");
    match viewport {
        None => issues.push(
            Issue::critical("missing-viewport", 20, "Page has no viewport meta tag")
                .recommend("Add <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">"),
        ),
        Some(content) if !content.contains("width=device-width") => issues.push(
            Issue::critical(
                "viewport-not-responsive",
                15,
                "Viewport does not set width=device-width",
            )
            .recommend("Use width=device-width in the viewport meta tag"),
        ),
        Some(_) => {}
    }

    if page.links.len() > 20 {
        issues.push(
            Issue::info(
                "touch-elements",
                5,
                format!(
                    "Page has {} links; make sure touch targets are well spaced",
                    page.links.len()
                ),
            )
            .recommend("Keep at least 8px between tap targets"),
        );
    }

    let horizontal_overflow = html.contains("overflow-x");
    if horizontal_overflow {
        issues.push(
            Issue::warning(
                "horizontal-scroll",
                10,
                "Styles use overflow-x, which often signals horizontal scrolling on mobile",
            )
            .recommend("Make wide elements responsive instead of scrollable"),
        );
    }

    let small_fonts = RE_SMALL_FONT.is_match(html);
    if small_fonts {
        issues.push(
            Issue::warning("small-font-size", 8, "Text uses font sizes of 10px or smaller")
                .recommend("Use a base font size of at least 16px"),
        );
    }

    let small_tap_targets = RE_SMALL_TAP_TARGET.is_match(html);
    if small_tap_targets {
        issues.push(
            Issue::warning(
                "small-tap-targets",
                10,
                "Buttons or inputs are narrower than 40px",
            )
            .recommend("Make tap targets at least 48x48px"),
        );
    }

    let data = json!({
        "viewport": viewport,
        "linkCount": page.links.len(),
        "horizontalOverflow": horizontal_overflow,
        "smallFonts": small_fonts,
        "smallTapTargets": small_tap_targets,
    });

    AnalysisResult::from_issues(issues, data, INFO)
}
