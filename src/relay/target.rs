//! Credential check and upstream URL construction.

/// Decide whether a path credential authorizes relaying.
///
/// An empty configured key disables the relay: every request is denied, no
/// matter what credential it carries. Otherwise the comparison is exact —
/// no trimming, no case folding.
pub fn authorize(shared_key: &str, credential: &str) -> bool {
    !shared_key.is_empty() && credential == shared_key
}

/// Compose the upstream URL from the configured base, the path tail and the
/// raw query string.
///
/// The tail is spliced in verbatim. Traversal sequences or stray
/// percent-escapes reach the upstream as literal path segments; callers are
/// trusted once the shared key matches. `base` is expected to carry no
/// trailing slash (config loading strips them).
pub fn target_url(base: &str, tail: &str, raw_query: Option<&str>) -> String {
    match raw_query {
        Some(query) if !query.is_empty() => format!("{base}/{tail}?{query}"),
        _ => format!("{base}/{tail}"),
    }
}
