//! Join request URLs onto the configured prefix.

/// Prefix `url` with `prefix` unless it already carries it.
///
/// Leading slashes are stripped from `url` and trailing slashes from
/// `prefix`, then the two are joined with a single `/`. A URL that already
/// starts with the prefix (as configured, or in its joined form) is returned
/// unchanged, so applying this twice is the same as applying it once.
pub fn fix_url(prefix: &str, url: &str) -> String {
    let trimmed = prefix.trim_end_matches('/');
    let joined_prefix = format!("{}/", trimmed);
    if url.starts_with(prefix) || url.starts_with(&joined_prefix) {
        return url.to_string();
    }
    let fixed = format!("{}{}", joined_prefix, url.trim_start_matches('/'));
    tracing::debug!(from = url, to = %fixed, "fixing url");
    fixed
}
