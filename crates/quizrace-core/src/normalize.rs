//! Answer comparison.

/// Returns `true` if `raw` matches `expected` after normalization.
///
/// The response has all whitespace removed (leading, trailing and internal)
/// and is compared case-insensitively against three literal variants of the
/// expected answer: as written, with a trailing `?`, and with a trailing `.`.
/// The expected answer itself is not normalized.
pub fn is_correct(raw: &str, expected: &str) -> bool {
    let response = normalize_response(raw);
    let expected = expected.to_lowercase();

    match response.strip_prefix(expected.as_str()) {
        Some("") | Some("?") | Some(".") => true,
        _ => false,
    }
}

/// Strips whitespace and lowercases a raw response.
pub fn normalize_response(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}
