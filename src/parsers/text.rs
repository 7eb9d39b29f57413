/// Collapses every run of whitespace into a single space and trims both ends
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Joins text fragments of a node and normalizes the result
pub fn join_fragments<'a>(fragments: impl IntoIterator<Item = &'a str>) -> String {
    let joined = fragments.into_iter().collect::<Vec<_>>().join(" ");
    normalize_whitespace(&joined)
}

/// True when the last segments of `path` are exactly `asset`, ignoring ASCII case.
/// `/img/na.gif` names `na.gif`; `/img/banana.gif` does not.
pub fn names_asset(path: &str, asset: &str) -> bool {
    let path = path.to_ascii_lowercase();
    let asset = asset.to_ascii_lowercase();
    match path.strip_suffix(&asset) {
        Some(rest) => rest.is_empty() || rest.ends_with('/') || asset.starts_with('/'),
        None => false,
    }
}
