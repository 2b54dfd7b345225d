//! Regex-based HTML text extraction helpers.

use std::sync::LazyLock;

use regex::Regex;

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("valid title regex"));
static META_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<meta\b[^>]*>").expect("valid meta regex"));
static PARAGRAPH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<p\b[^>]*>(.*?)</p>").expect("valid paragraph regex"));
static NOISE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(script|style|noscript)\b[^>]*>.*?</(script|style|noscript)>")
        .expect("valid noise regex")
});
static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)([a-z][a-z0-9:_-]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
        .expect("valid attribute regex")
});
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<[^>]+>").expect("valid tags regex"));

/// Strip tags, decode common entities, and collapse whitespace.
pub(crate) fn clean_text(input: &str) -> String {
    let no_tags = TAG_RE.replace_all(input, "");
    decode_entities(&no_tags)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn decode_entities(input: &str) -> String {
    input
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

pub(crate) fn extract_title(html: &str) -> String {
    if let Some(og) = find_meta_content(html, "property", "og:title") {
        return og;
    }
    TITLE_RE
        .captures(html)
        .and_then(|cap| cap.get(1))
        .map(|m| clean_text(m.as_str()))
        .unwrap_or_default()
}

/// Body text built from `<p>` elements, one paragraph per line.
///
/// Falls back to the meta description when the page has no paragraphs.
pub(crate) fn extract_body_text(html: &str) -> String {
    let without_noise = NOISE_RE.replace_all(html, " ");
    let paragraphs: Vec<String> = PARAGRAPH_RE
        .captures_iter(&without_noise)
        .filter_map(|cap| cap.get(1).map(|m| clean_text(m.as_str())))
        .filter(|p| !p.is_empty())
        .collect();

    if paragraphs.is_empty() {
        return find_meta_content(html, "name", "description").unwrap_or_default();
    }
    paragraphs.join("\n")
}

pub(crate) fn extract_top_image(html: &str) -> Option<String> {
    find_meta_content(html, "property", "og:image")
}

/// Content of the first `<meta>` whose `attr` equals `value` (case-insensitive).
pub(crate) fn find_meta_content(html: &str, attr: &str, value: &str) -> Option<String> {
    META_TAG_RE.find_iter(html).find_map(|m| {
        let tag = m.as_str();
        let matches = extract_attr(tag, attr).is_some_and(|v| v.eq_ignore_ascii_case(value));
        if !matches {
            return None;
        }
        extract_attr(tag, "content")
            .map(|c| clean_text(&c))
            .filter(|c| !c.is_empty())
    })
}

fn extract_attr(tag: &str, attr: &str) -> Option<String> {
    ATTR_RE
        .captures_iter(tag)
        .find(|cap| cap.get(1).is_some_and(|name| name.as_str().eq_ignore_ascii_case(attr)))
        .and_then(|cap| cap.get(2).or_else(|| cap.get(3)))
        .map(|m| m.as_str().trim().to_string())
}
