//! Postal code canonicalisation.
//!
//! Rink rows store Czech postal codes as `"XXX YY"`. User input may omit
//! the separator, put it elsewhere, or pad with whitespace.

/// Strips all whitespace and, when exactly five characters remain, reinserts
/// a single space after the third. Any other length is returned stripped.
///
/// Total and pure: empty input yields an empty string.
#[must_use]
pub fn normalize_postal_code(raw: &str) -> String {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

    if compact.chars().count() != 5 {
        return compact;
    }

    let (head, tail) = match compact.char_indices().nth(3) {
        Some((idx, _)) => compact.split_at(idx),
        None => return compact,
    };
    format!("{head} {tail}")
}
