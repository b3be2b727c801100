//! HTML fetching and page extraction

use std::collections::BTreeMap;

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::types::{Dimensions, ImageData, LinkData, PageData};

/// Elements whose text forms a paragraph of page content
const BLOCK_ELEMENTS: [&str; 15] = [
    "p", "li", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote", "pre", "td", "th", "dt", "dd",
    "figcaption",
];

/// Fetch HTML content from a URL
///
/// Requires the `fetch` feature (needs reqwest)
#[cfg(feature = "fetch")]
pub async fn fetch_html(url: &str, timeout: std::time::Duration) -> Result<String> {
    use anyhow::Context;

    let client = reqwest::Client::builder()
        .user_agent(format!(
            "Mozilla/5.0 (compatible; seolens/{})",
            env!("CARGO_PKG_VERSION")
        ))
        .timeout(timeout)
        .build()?;

    let response = client
        .get(url)
        .send()
        .await
        .context("Failed to fetch URL")?
        .error_for_status()
        .context("Server returned an error status")?;

    let html = response
        .text()
        .await
        .context("Failed to read response body")?;
    tracing::debug!(url, bytes = html.len(), "fetched page");
    Ok(html)
}

/// Extract everything the analyzers need from an HTML document
///
/// `url` is the address the document was served from; it decides which
/// links count as external. Performance metrics are never present in markup
/// and are left empty.
pub fn extract_page_data(html: &str, url: &str) -> Result<PageData> {
    let document = Html::parse_document(html);
    let base = Url::parse(url).ok();

    let title = document
        .select(&selector("title")?)
        .next()
        .map(|element| collapse_whitespace(&element.text().collect::<String>()))
        .unwrap_or_default();

    let page = PageData {
        url: url.to_string(),
        title,
        meta_tags: extract_meta_tags(&document)?,
        headings: extract_headings(&document)?,
        images: extract_images(&document)?,
        links: extract_links(&document, base.as_ref())?,
        content: extract_content(html)?,
        html_content: html.to_string(),
        performance_metrics: None,
    };

    tracing::debug!(
        url,
        meta_tags = page.meta_tags.len(),
        images = page.images.len(),
        links = page.links.len(),
        "extracted page data"
    );
    Ok(page)
}

fn extract_meta_tags(document: &Html) -> Result<BTreeMap<String, String>> {
    let mut tags = BTreeMap::new();

    for element in document.select(&selector("meta[content]")?) {
        let attributes = element.value();
        let key = attributes
            .attr("name")
            .or_else(|| attributes.attr("property"))
            .or_else(|| attributes.attr("http-equiv"));
        if let (Some(key), Some(content)) = (key, attributes.attr("content")) {
            // The first declaration wins, as in browsers
            tags.entry(key.trim().to_ascii_lowercase())
                .or_insert_with(|| content.trim().to_string());
        }
    }

    if let Some(href) = document
        .select(&selector("link[rel='canonical'][href]")?)
        .next()
        .and_then(|element| element.value().attr("href"))
    {
        tags.insert("canonical".to_string(), href.trim().to_string());
    }

    Ok(tags)
}

fn extract_headings(document: &Html) -> Result<BTreeMap<String, Vec<String>>> {
    let mut headings = BTreeMap::new();
    for level in ["h1", "h2", "h3", "h4", "h5", "h6"] {
        let texts: Vec<String> = document
            .select(&selector(level)?)
            .map(|element| collapse_whitespace(&element.text().collect::<String>()))
            .filter(|text| !text.is_empty())
            .collect();
        if !texts.is_empty() {
            headings.insert(level.to_string(), texts);
        }
    }
    Ok(headings)
}

fn extract_images(document: &Html) -> Result<Vec<ImageData>> {
    Ok(document
        .select(&selector("img")?)
        .map(|element| {
            let attributes = element.value();
            let dimension = |name: &str| {
                attributes
                    .attr(name)
                    .and_then(|value| value.trim().trim_end_matches("px").parse::<u32>().ok())
            };
            let dimensions = match (dimension("width"), dimension("height")) {
                (Some(width), Some(height)) => Some(Dimensions { width, height }),
                _ => None,
            };

            ImageData {
                src: attributes
                    .attr("src")
                    .or_else(|| attributes.attr("data-src"))
                    .unwrap_or_default()
                    .trim()
                    .to_string(),
                alt: attributes.attr("alt").unwrap_or_default().trim().to_string(),
                dimensions,
            }
        })
        .collect())
}

fn extract_links(document: &Html, base: Option<&Url>) -> Result<Vec<LinkData>> {
    Ok(document
        .select(&selector("a[href]")?)
        .map(|element| {
            let href = element.value().attr("href").unwrap_or_default();
            let mut text = collapse_whitespace(&element.text().collect::<String>());
            if text.is_empty() {
                text = element
                    .value()
                    .attr("aria-label")
                    .or_else(|| element.value().attr("title"))
                    .unwrap_or_default()
                    .trim()
                    .to_string();
            }

            LinkData {
                text,
                is_external: is_external_link(href, base),
            }
        })
        .collect())
}

/// A link is external when it resolves to a web host other than the page's
pub fn is_external_link(href: &str, base: Option<&Url>) -> bool {
    let resolved = match base {
        Some(base) => base.join(href.trim()),
        None => Url::parse(href.trim()),
    };

    match resolved {
        Ok(target) if matches!(target.scheme(), "http" | "https") => {
            let target_host = target.host_str().map(strip_www);
            let page_host = base.and_then(Url::host_str).map(strip_www);
            target_host.is_some() && target_host != page_host
        }
        _ => false,
    }
}

fn strip_www(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}

/// Block-level text of the sanitized document, one paragraph per block
fn extract_content(html: &str) -> Result<String> {
    let document = Html::parse_document(&sanitize_html(html));
    let blocks = selector(&BLOCK_ELEMENTS.join(", "))?;

    let paragraphs: Vec<String> = document
        .select(&blocks)
        .filter(|element| !has_block_ancestor(element))
        .map(|element| collapse_whitespace(&element.text().collect::<String>()))
        .filter(|text| !text.is_empty())
        .collect();

    if !paragraphs.is_empty() {
        return Ok(paragraphs.join("\n\n"));
    }

    let body = selector("body")?;
    Ok(document
        .select(&body)
        .next()
        .map(|element| collapse_whitespace(&element.text().collect::<String>()))
        .unwrap_or_default())
}

fn has_block_ancestor(element: &ElementRef) -> bool {
    element.ancestors().any(|node| {
        node.value()
            .as_element()
            .is_some_and(|ancestor| BLOCK_ELEMENTS.contains(&ancestor.name()))
    })
}

fn selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| anyhow::anyhow!("unable to parse selector {selector}: {e}"))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Sanitize HTML by removing script, style, and other non-content elements
pub fn sanitize_html(html: &str) -> String {
    static RE_TAG_BLOCKS: Lazy<Vec<Regex>> = Lazy::new(|| {
        [
            r"(?is)<script[^>]*?>[\s\S]*?</script>",
            r"(?is)<style[^>]*?>[\s\S]*?</style>",
            r"(?is)<noscript[^>]*?>[\s\S]*?</noscript>",
            r"(?is)<template[^>]*?>[\s\S]*?</template>",
        ]
        .into_iter()
        .map(|pattern| Regex::new(pattern).expect("invalid block regex"))
        .collect()
    });
    static RE_COMMENT: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?is)<!--.*?-->").expect("invalid comment regex"));

    let mut clean = html.to_string();
    for re in RE_TAG_BLOCKS.iter() {
        clean = re.replace_all(&clean, "").into_owned();
    }

    RE_COMMENT.replace_all(&clean, "").into_owned()
}
