//! Year tokens with an unknown ones digit.

use crate::models::Year;
use crate::services::patterns::{UNCERTAINTY_MARKERS, library};

/// Resolve a year token whose ones digit may be unknown.
///
/// Four consecutive digits are taken as-is (`1998?` is 1998). Otherwise
/// the token must be 1-3 digits followed only by uncertainty markers, and
/// the missing ones digit becomes `0` (`199?` is 1990, `19-?` is 190).
/// Returns `None` for anything else.
pub fn resolve_unknown_ones(token: &str) -> Option<Year> {
    let token = token.trim();
    if let Some(digits) = library().four_digits(token) {
        return digits.parse().ok();
    }

    let digit_len = token
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(token.len());
    if digit_len == 0 || digit_len > 3 {
        return None;
    }

    let (digits, markers) = token.split_at(digit_len);
    if !markers.chars().all(|c| UNCERTAINTY_MARKERS.contains(&c)) {
        return None;
    }
    format!("{digits}0").parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_ones_rounds_down() {
        assert_eq!(resolve_unknown_ones("199?"), Some(1990));
        assert_eq!(resolve_unknown_ones("186-"), Some(1860));
        assert_eq!(resolve_unknown_ones("19*"), Some(190));
    }

    #[test]
    fn test_repeated_markers() {
        assert_eq!(resolve_unknown_ones("19-?"), Some(190));
        assert_eq!(resolve_unknown_ones("1-?"), Some(10));
    }

    #[test]
    fn test_complete_year_kept() {
        assert_eq!(resolve_unknown_ones("1998?"), Some(1998));
        assert_eq!(resolve_unknown_ones("1998"), Some(1998));
    }

    #[test]
    fn test_implicit_missing_digit() {
        assert_eq!(resolve_unknown_ones("186"), Some(1860));
    }

    #[test]
    fn test_rejects_noise() {
        assert_eq!(resolve_unknown_ones(""), None);
        assert_eq!(resolve_unknown_ones("?"), None);
        assert_eq!(resolve_unknown_ones("19x"), None);
        assert_eq!(resolve_unknown_ones("19-1"), None);
    }
}
