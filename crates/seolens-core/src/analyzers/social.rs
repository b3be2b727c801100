//! Open Graph and Twitter card tags

use serde_json::json;

use super::url_extension;
use crate::types::{AnalysisResult, Issue, PageData};

const INFO: &str = "Open Graph and Twitter card tags control how a page looks when it is shared \
on social networks. Twitter falls back to Open Graph values when its own tags are missing.";

const SHAREABLE_IMAGE_FORMATS: [&str; 3] = ["jpg", "jpeg", "png"];

pub fn analyze(page: &PageData) -> AnalysisResult {
    let mut issues = Vec::new();

    let og_title = page.meta("og:title");
    let og_description = page.meta("og:description");
    let og_image = page.meta("og:image");
    let og_url = page.meta("og:url");
    let og_type = page.meta("og:type");
    let twitter_card = page.meta("twitter:card");
    let twitter_title = page.meta("twitter:title");
    let twitter_description = page.meta("twitter:description");
    let twitter_image = page.meta("twitter:image");

    if og_title.is_none() {
        issues.push(
            Issue::warning("missing-og-title", 8, "Missing og:title tag")
                .recommend("Add <meta property=\"og:title\"> with the share title"),
        );
    }
    if og_description.is_none() {
        issues.push(
            Issue::warning("missing-og-description", 6, "Missing og:description tag")
                .recommend("Add <meta property=\"og:description\"> with a short summary"),
        );
    }
    if og_image.is_none() {
        issues.push(
            Issue::warning("missing-og-image", 10, "Missing og:image tag")
                .recommend("Add an og:image of at least 1200x630px"),
        );
    }
    if og_url.is_none() {
        issues.push(
            Issue::info("missing-og-url", 4, "Missing og:url tag")
                .recommend("Add og:url with the canonical URL"),
        );
    }
    if og_type.is_none() {
        issues.push(
            Issue::info("missing-og-type", 4, "Missing og:type tag")
                .recommend("Add og:type, for example \"website\" or \"article\""),
        );
    }

    if twitter_card.is_none() {
        issues.push(
            Issue::warning("missing-twitter-card", 6, "Missing twitter:card tag")
                .recommend("Add <meta name=\"twitter:card\" content=\"summary_large_image\">"),
        );
    }
    if twitter_title.is_none() && og_title.is_none() {
        issues.push(
            Issue::warning(
                "missing-twitter-title",
                6,
                "Missing twitter:title and no og:title to fall back on",
            )
            .recommend("Add twitter:title or og:title"),
        );
    }
    if twitter_description.is_none() && og_description.is_none() {
        issues.push(
            Issue::warning(
                "missing-twitter-description",
                4,
                "Missing twitter:description and no og:description to fall back on",
            )
            .recommend("Add twitter:description or og:description"),
        );
    }
    if twitter_image.is_none() && og_image.is_none() {
        issues.push(
            Issue::warning(
                "missing-twitter-image",
                8,
                "Missing twitter:image and no og:image to fall back on",
            )
            .recommend("Add twitter:image or og:image"),
        );
    }

    if let Some(image) = og_image {
        let shareable = url_extension(image)
            .is_some_and(|ext| SHAREABLE_IMAGE_FORMATS.contains(&ext.as_str()));
        if !shareable {
            issues.push(
                Issue::info(
                    "og-image-format",
                    4,
                    "og:image is not a JPG or PNG; some networks will not render it",
                )
                .recommend("Serve the share image as JPG or PNG"),
            );
        }
    }

    let data = json!({
        "openGraph": {
            "title": og_title,
            "description": og_description,
            "image": og_image,
            "url": og_url,
            "type": og_type,
        },
        "twitter": {
            "card": twitter_card,
            "title": twitter_title.or(og_title),
            "description": twitter_description.or(og_description),
            "image": twitter_image.or(og_image),
        },
    });

    AnalysisResult::from_issues(issues, data, INFO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::test_support::{issue_ids, page, with_meta};

    fn open_graph_page() -> PageData {
        let page = with_meta(page(), "og:title", "Async Rust guide");
        let page = with_meta(page, "og:description", "Everything about tokio");
        let page = with_meta(page, "og:image", "https://example.com/share.png");
        let page = with_meta(page, "og:url", "https://example.com/guide");
        let page = with_meta(page, "og:type", "article");
        with_meta(page, "twitter:card", "summary_large_image")
    }

    #[test]
    fn test_open_graph_covers_twitter() {
        let result = analyze(&open_graph_page());
        assert!(result.issues.is_empty(), "{:?}", issue_ids(&result));
        assert_eq!(result.data["twitter"]["title"], "Async Rust guide");
    }

    #[test]
    fn test_no_social_tags() {
        let result = analyze(&page());
        assert_eq!(result.issues.len(), 9);
        assert_eq!(result.score, 100 - 8 - 6 - 10 - 4 - 4 - 6 - 6 - 4 - 8);
    }

    #[test]
    fn test_twitter_tags_without_open_graph() {
        let page = with_meta(page(), "twitter:card", "summary");
        let page = with_meta(page, "twitter:title", "Title");
        let page = with_meta(page, "twitter:description", "Description");
        let page = with_meta(page, "twitter:image", "https://example.com/t.png");
        let result = analyze(&page);
        assert_eq!(
            issue_ids(&result),
            vec![
                "missing-og-title",
                "missing-og-description",
                "missing-og-image",
                "missing-og-url",
                "missing-og-type"
            ]
        );
    }

    #[test]
    fn test_og_image_format() {
        let page = with_meta(open_graph_page(), "og:image", "https://example.com/share.webp");
        assert_eq!(issue_ids(&analyze(&page)), vec!["og-image-format"]);

        let page = with_meta(open_graph_page(), "og:image", "https://example.com/share.JPEG?v=1");
        assert!(analyze(&page).issues.is_empty());
    }
}
