//! Stable in-memory sorting of a batch of lines.

use crate::compare::{compare_lines, lines_equivalent};
use crate::config::SortConfig;

/// Sort a batch of lines in place and return it.
///
/// The sort is stable: lines whose keys compare equal keep their input
/// order. With `unique`, each group of consecutive key-equal lines is
/// collapsed to its first member. With `reverse`, the ascending result is
/// mirrored as the final step, so the unique survivor is still the first
/// line of its group in ascending order.
pub fn sort_lines(mut lines: Vec<String>, config: &SortConfig) -> Vec<String> {
    lines.sort_by(|a, b| compare_lines(a, b, config));

    if config.unique {
        lines.dedup_by(|curr, prev| lines_equivalent(prev, curr, config));
    }

    if config.reverse {
        lines.reverse();
    }

    lines
}
