//! Image alt text, dimensions and format checks

use serde_json::json;

use super::url_extension;
use crate::types::{AnalysisResult, Issue, PageData};

const INFO: &str = "Images need descriptive alt text for accessibility and image search, \
explicit dimensions to avoid layout shifts, and modern formats such as WebP or AVIF.";

const MODERN_FORMATS: [&str; 2] = ["webp", "avif"];

pub fn analyze(page: &PageData) -> AnalysisResult {
    let mut issues = Vec::new();
    let mut breakdown = Vec::with_capacity(page.images.len());

    for (index, image) in page.images.iter().enumerate() {
        let mut image_issues = Vec::new();
        let alt = image.alt.trim();

        if alt.is_empty() {
            image_issues.push(
                Issue::warning(
                    format!("missing-alt-{index}"),
                    5,
                    format!("Image {} is missing alt text", image.src),
                )
                .recommend("Describe the image in its alt attribute"),
            );
        } else if alt.chars().count() < 5 {
            image_issues.push(
                Issue::info(
                    format!("short-alt-{index}"),
                    2,
                    format!("Image {} has very short alt text \"{alt}\"", image.src),
                )
                .recommend("Make the alt text more descriptive"),
            );
        }

        if image.dimensions.is_none() {
            image_issues.push(
                Issue::warning(
                    format!("missing-dimensions-{index}"),
                    3,
                    format!("Image {} has no width/height", image.src),
                )
                .recommend("Set width and height attributes to prevent layout shifts"),
            );
        }

        let modern = url_extension(&image.src)
            .is_some_and(|ext| MODERN_FORMATS.contains(&ext.as_str()));
        if !modern {
            image_issues.push(
                Issue::info(
                    format!("legacy-format-{index}"),
                    3,
                    format!("Image {} is not served as WebP or AVIF", image.src),
                )
                .recommend("Convert the image to WebP or AVIF"),
            );
        }

        breakdown.push(json!({
            "src": image.src,
            "alt": image.alt,
            "issues": image_issues.iter().map(|issue| issue.id.as_str()).collect::<Vec<_>>(),
        }));
        issues.extend(image_issues);
    }

    let has_logo = page
        .images
        .iter()
        .any(|image| image.alt.to_lowercase().contains("logo"));
    if page.images.len() > 10 && !has_logo {
        issues.push(
            Issue::info("missing-logo", 2, "No image is labelled as the site logo")
                .recommend("Give the logo image an alt text containing \"logo\""),
        );
    }

    AnalysisResult::from_issues(issues, json!({ "images": breakdown }), INFO)
}
