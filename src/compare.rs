//! Two-level line comparison.
//!
//! Lines compare by their typed key value first (numeric, month or human,
//! when such a mode is active) and fall back to byte-wise lexicographic
//! comparison of the normalized keys. The fallback keeps the order total:
//! two lines compare `Equal` only when their normalized keys are identical.

use std::cmp::Ordering;

use crate::config::{SortConfig, SortMode};
use crate::key::{extract_key, human_value, month_value, normalize_key, numeric_value};

/// Compare two lines in ascending key order, ignoring `config.reverse`.
///
/// Callers that need the configured direction apply the reversal
/// themselves: the in-memory sorter mirrors its output instead, while the
/// merger and checker go through [`compare_directed`].
pub fn compare_lines(a: &str, b: &str, config: &SortConfig) -> Ordering {
    let ka = normalize_key(extract_key(a, config.key_column), config.ignore_blanks);
    let kb = normalize_key(extract_key(b, config.key_column), config.ignore_blanks);

    let typed = match config.mode {
        SortMode::Lexicographic => Ordering::Equal,
        SortMode::Numeric => total_f64_cmp(numeric_value(ka), numeric_value(kb)),
        SortMode::Month => month_value(ka).cmp(&month_value(kb)),
        SortMode::HumanNumeric => total_f64_cmp(human_value(ka), human_value(kb)),
    };

    typed.then_with(|| ka.cmp(kb))
}

/// Compare two lines in the configured output direction.
pub fn compare_directed(a: &str, b: &str, config: &SortConfig) -> Ordering {
    let ord = compare_lines(a, b, config);
    if config.reverse {
        ord.reverse()
    } else {
        ord
    }
}

/// Whether two lines are duplicates under `-u`: the comparator reports
/// `Equal`, i.e. typed values match and the normalized keys are identical.
pub fn lines_equivalent(a: &str, b: &str, config: &SortConfig) -> bool {
    compare_lines(a, b, config) == Ordering::Equal
}

/// Key values never parse to NaN (the grammar admits digits only), so the
/// partial order on f64 is total here; Equal is an unreachable fallback.
fn total_f64_cmp(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SortConfigBuilder;

    fn config(mode: SortMode) -> SortConfig {
        SortConfigBuilder::new()
            .mode(mode)
            .build()
            .expect("Failed to build test config")
    }

    #[test]
    fn test_lexicographic_order() {
        let cfg = config(SortMode::Lexicographic);
        assert_eq!(compare_lines("apple", "banana", &cfg), Ordering::Less);
        assert_eq!(compare_lines("banana", "apple", &cfg), Ordering::Greater);
        assert_eq!(compare_lines("apple", "apple", &cfg), Ordering::Equal);
    }

    #[test]
    fn test_numeric_order() {
        let cfg = config(SortMode::Numeric);
        assert_eq!(compare_lines("9", "10", &cfg), Ordering::Less);
        assert_eq!(compare_lines("100", "20", &cfg), Ordering::Greater);
        assert_eq!(compare_lines("-1", "1", &cfg), Ordering::Less);
    }

    #[test]
    fn test_numeric_tie_breaks_on_key() {
        let cfg = config(SortMode::Numeric);
        // Both parse to 0.0; the raw keys decide.
        assert_eq!(compare_lines("abc", "xyz", &cfg), Ordering::Less);
        // Same value, different spelling: not Equal.
        assert_eq!(compare_lines("1.0", "1.00", &cfg), Ordering::Less);
    }

    #[test]
    fn test_month_order() {
        let cfg = config(SortMode::Month);
        assert_eq!(compare_lines("Jan", "Feb", &cfg), Ordering::Less);
        assert_eq!(compare_lines("Dec", "Nov", &cfg), Ordering::Greater);
        // Unknown months map to 0 and sort before real ones.
        assert_eq!(compare_lines("Foo", "Jan", &cfg), Ordering::Less);
    }

    #[test]
    fn test_human_order() {
        let cfg = config(SortMode::HumanNumeric);
        // 1Ki = 1024 < 1500 < 2K = 2000
        assert_eq!(compare_lines("1Ki", "1500", &cfg), Ordering::Less);
        assert_eq!(compare_lines("1500", "2K", &cfg), Ordering::Less);
        assert_eq!(compare_lines("2K", "1Ki", &cfg), Ordering::Greater);
    }

    #[test]
    fn test_key_column_comparison() {
        let cfg = SortConfigBuilder::new()
            .mode(SortMode::Month)
            .key_column(2)
            .build()
            .expect("Failed to build test config");
        assert_eq!(compare_lines("a\tJan", "a\tFeb", &cfg), Ordering::Less);
        // Key equal, whole lines differ: still Equal for the comparator.
        assert_eq!(compare_lines("a\tJan", "b\tJan", &cfg), Ordering::Equal);
    }

    #[test]
    fn test_ignore_blanks() {
        let cfg = SortConfigBuilder::new()
            .ignore_blanks()
            .build()
            .expect("Failed to build test config");
        assert_eq!(compare_lines("  apple  ", "apple", &cfg), Ordering::Equal);
    }

    #[test]
    fn test_directed_reverse() {
        let cfg = SortConfigBuilder::new()
            .reverse()
            .build()
            .expect("Failed to build test config");
        assert_eq!(compare_directed("a", "b", &cfg), Ordering::Greater);
        assert_eq!(compare_directed("b", "a", &cfg), Ordering::Less);
        assert_eq!(compare_directed("a", "a", &cfg), Ordering::Equal);
    }

    #[test]
    fn test_lines_equivalent() {
        let cfg = config(SortMode::Numeric);
        assert!(lines_equivalent("5", "5", &cfg));
        assert!(!lines_equivalent("5", "5.0", &cfg));
        assert!(!lines_equivalent("5", "6", &cfg));
    }
}
