use crate::parsers::text;
use scraper::{Html, Selector};
use std::collections::BTreeSet;
use url::Url;

/// Normalized text of the first element matching `selector`, empty if none
pub fn first_text(doc: &Html, selector: &Selector) -> String {
    doc.select(selector)
        .next()
        .map(|e| text::join_fragments(e.text()))
        .unwrap_or_default()
}

/// Attribute value of the first element matching `selector`, empty if none
pub fn first_attr(doc: &Html, selector: &Selector, attr: &str) -> String {
    doc.select(selector)
        .next()
        .and_then(|e| e.value().attr(attr))
        .map(|v| v.trim().to_string())
        .unwrap_or_default()
}

/// Distinct non-empty texts of every element matching `selector`
pub fn all_texts(doc: &Html, selector: &Selector) -> BTreeSet<String> {
    doc.select(selector)
        .map(|e| text::join_fragments(e.text()))
        .filter(|t| !t.is_empty())
        .collect()
}

/// `href`s of matching anchors in document order, resolved against `page_url`
pub fn links(doc: &Html, selector: &Selector, page_url: &Url) -> Vec<String> {
    let links = doc
        .select(selector)
        .filter_map(|e| e.value().attr("href"))
        .map(|href| match page_url.join(href) {
            Ok(resolved) => resolved.to_string(),
            Err(_) => href.to_string(),
        })
        .collect::<Vec<String>>();

    ::log::debug!("HTML parser found {} breadcrumb links", links.len());
    links
}

pub fn any_match(doc: &Html, selector: &Selector) -> bool {
    doc.select(selector).next().is_some()
}

/// True when any matching image points at the placeholder asset
pub fn has_placeholder_image(doc: &Html, selector: &Selector, asset: &str) -> bool {
    doc.select(selector)
        .filter_map(|e| e.value().attr("src"))
        .any(|src| {
            // ignore cache-busting query strings
            let path = src.split(['?', '#']).next().unwrap_or(src);
            text::names_asset(path, asset)
        })
}
