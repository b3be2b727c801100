//! Structured data detection (JSON-LD, Microdata, RDFa)

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::json;

use crate::types::{AnalysisResult, Issue, PageData};

const INFO: &str = "Structured data describes page entities in a machine-readable way and \
unlocks rich results. JSON-LD using common schema.org types is the preferred format.";

/// schema.org types search engines commonly turn into rich results
const COMMON_SCHEMA_TYPES: [&str; 10] = [
    "Organization",
    "WebSite",
    "WebPage",
    "Article",
    "Product",
    "LocalBusiness",
    "BreadcrumbList",
    "FAQPage",
    "Person",
    "Event",
];

static RE_RDFA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:typeof|property)=").expect("invalid RDFa regex"));
static RE_SCHEMA_TYPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""@type"\s*:\s*(?:"([^"]+)"|\[([^\]]*)\])"#).expect("invalid schema type regex")
});
static RE_QUOTED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""([^"]+)""#).expect("invalid quoted string regex"));

pub fn analyze(page: &PageData) -> AnalysisResult {
    let mut issues = Vec::new();
    let html = page.html_content.as_str();

    let json_ld = html.contains("application/ld+json");
    let microdata = html.contains("itemscope") || html.contains("itemprop");
    let rdfa = RE_RDFA.is_match(html);

    let mut types: Vec<String> = Vec::new();
    for captures in RE_SCHEMA_TYPE.captures_iter(html) {
        // "@type" is either one string or an array of strings
        let found: Vec<&str> = match (captures.get(1), captures.get(2)) {
            (Some(single), _) => vec![single.as_str()],
            (None, Some(list)) => RE_QUOTED
                .captures_iter(list.as_str())
                .filter_map(|quoted| quoted.get(1).map(|m| m.as_str()))
                .collect(),
            (None, None) => Vec::new(),
        };
        for schema_type in found {
            let schema_type = schema_type.trim().to_string();
            if !schema_type.is_empty() && !types.contains(&schema_type) {
                types.push(schema_type);
            }
        }
    }
    let recognized: Vec<&str> = types
        .iter()
        .map(|schema_type| short_type_name(schema_type))
        .filter(|name| COMMON_SCHEMA_TYPES.contains(name))
        .collect();

    if !json_ld && !microdata && !rdfa {
        issues.push(
            Issue::warning("no-structured-data", 15, "No structured data found")
                .recommend("Describe the page with schema.org JSON-LD"),
        );
    } else if !json_ld {
        issues.push(
            Issue::info(
                "no-json-ld",
                5,
                "Structured data found, but not in the recommended JSON-LD format",
            )
            .recommend("Migrate Microdata or RDFa to JSON-LD"),
        );
    } else if recognized.is_empty() {
        issues.push(
            Issue::info(
                "no-recognized-schema-type",
                8,
                "JSON-LD does not use any common schema.org type",
            )
            .recommend(format!("Use one of: {}", COMMON_SCHEMA_TYPES.join(", "))),
        );
    }

    let data = json!({
        "formats": {
            "jsonLd": json_ld,
            "microdata": microdata,
            "rdfa": rdfa,
        },
        "types": types,
        "recognizedTypes": recognized,
    });

    AnalysisResult::from_issues(issues, data, INFO)
}

/// "https://schema.org/Product" and "schema:Product" both become "Product"
fn short_type_name(schema_type: &str) -> &str {
    schema_type
        .rsplit(['/', '#', ':'])
        .next()
        .unwrap_or(schema_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::test_support::{issue_ids, page};

    fn with_html(html: &str) -> PageData {
        let mut page = page();
        page.html_content = html.to_string();
        page
    }

    #[test]
    fn test_json_ld_with_common_type() {
        let page = with_html(
            r#"<script type="application/ld+json">
               {"@context": "https://schema.org", "@type": "Article", "headline": "Hi"}
               </script>"#,
        );
        let result = analyze(&page);
        assert!(result.issues.is_empty());
        assert_eq!(result.data["recognizedTypes"], json!(["Article"]));
    }

    #[test]
    fn test_no_structured_data() {
        let result = analyze(&with_html("<p>Hello</p>"));
        assert_eq!(issue_ids(&result), vec!["no-structured-data"]);
        assert_eq!(result.score, 85);
    }

    #[test]
    fn test_microdata_only() {
        let result = analyze(&with_html(
            r#"<div itemscope itemtype="https://schema.org/Person"><span itemprop="name">Ann</span></div>"#,
        ));
        assert_eq!(issue_ids(&result), vec!["no-json-ld"]);
        assert_eq!(result.score, 95);
    }

    #[test]
    fn test_rdfa_only() {
        let result = analyze(&with_html(r#"<div vocab="https://schema.org/" typeof="Person"></div>"#));
        assert_eq!(issue_ids(&result), vec!["no-json-ld"]);
    }

    #[test]
    fn test_json_ld_with_unusual_type() {
        let page = with_html(
            r#"<script type="application/ld+json">{"@type": "Recipe", "name": "Soup"}</script>"#,
        );
        let result = analyze(&page);
        assert_eq!(issue_ids(&result), vec!["no-recognized-schema-type"]);
        assert_eq!(result.score, 92);
        assert_eq!(result.data["types"], json!(["Recipe"]));
    }

    #[test]
    fn test_array_valued_type_is_recognized() {
        let page = with_html(
            r#"<script type="application/ld+json">{"@type":["Article","NewsArticle"]}</script>"#,
        );
        let result = analyze(&page);

        assert!(result.issues.is_empty(), "{:?}", issue_ids(&result));
        assert_eq!(result.score, 100);
        assert_eq!(result.data["types"], json!(["Article", "NewsArticle"]));
        assert_eq!(result.data["recognizedTypes"], json!(["Article"]));
    }

    #[test]
    fn test_array_of_unusual_types_is_not_recognized() {
        let page = with_html(
            r#"<script type="application/ld+json">{"@type": [ "Recipe", "schema:HowTo" ]}</script>"#,
        );
        let result = analyze(&page);
        assert_eq!(issue_ids(&result), vec!["no-recognized-schema-type"]);
        assert_eq!(result.data["types"], json!(["Recipe", "schema:HowTo"]));
    }

    #[test]
    fn test_full_iri_types_are_recognized() {
        let page = with_html(
            r#"<script type="application/ld+json">{"@type": "https://schema.org/Product"}</script>"#,
        );
        assert!(analyze(&page).issues.is_empty());
    }
}
