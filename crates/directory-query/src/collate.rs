//! Locale-style string ordering for company names.
//!
//! Names compare case-insensitively first. Names equal under case folding
//! are ordered lowercase-before-uppercase at the first differing character,
//! so `acme < Acme < acne`. Identical names compare equal.

use std::cmp::Ordering;

/// Compare two names for display ordering.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let folded_a = a.chars().flat_map(char::to_lowercase);
    let folded_b = b.chars().flat_map(char::to_lowercase);
    folded_a.cmp(folded_b).then_with(|| case_order(a, b))
}

fn case_order(a: &str, b: &str) -> Ordering {
    for (x, y) in a.chars().zip(b.chars()) {
        if x == y {
            continue;
        }
        return match (x.is_lowercase(), y.is_lowercase()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => x.cmp(&y),
        };
    }
    a.chars().count().cmp(&b.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_case_first() {
        assert_eq!(compare_names("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_names("Zebra", "apple"), Ordering::Greater);
        // Plain byte order would put every uppercase letter first.
        assert!("Zebra" < "apple");
    }

    #[test]
    fn lowercase_breaks_case_ties() {
        assert_eq!(compare_names("acme", "Acme"), Ordering::Less);
        assert_eq!(compare_names("Acme", "acme"), Ordering::Greater);
        assert_eq!(compare_names("Acme", "acne"), Ordering::Less);
    }

    #[test]
    fn identical_names_are_equal() {
        assert_eq!(compare_names("Acme", "Acme"), Ordering::Equal);
        assert_eq!(compare_names("", ""), Ordering::Equal);
    }

    #[test]
    fn prefixes_sort_first() {
        assert_eq!(compare_names("Acme", "Acme Labs"), Ordering::Less);
    }
}
