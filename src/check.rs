//! Order checking: verify a sequence is already sorted without sorting it.

use std::cmp::Ordering;
use std::io::BufRead;

use crate::compare::compare_directed;
use crate::config::SortConfig;
use crate::error::{SortError, SortResult};

/// Scan `input` and verify every adjacent pair satisfies the configured
/// order. The first violating pair produces a [`SortError::Disorder`]
/// carrying the source name, the 1-based line number of the second line of
/// the pair and that line's text. Empty and single-line inputs succeed
/// trivially. Duplicates are never a violation; only order is checked.
pub fn run_check<R: BufRead>(input: R, source_name: &str, config: &SortConfig) -> SortResult<()> {
    let mut prev: Option<String> = None;
    let mut line_number = 0usize;

    for line in input.lines() {
        let line = line.map_err(|e| SortError::read_failed(&e))?;
        line_number += 1;

        if let Some(prev) = &prev {
            if compare_directed(prev, &line, config) == Ordering::Greater {
                return Err(SortError::disorder(source_name, line_number, &line));
            }
        }

        prev = Some(line);
    }

    Ok(())
}
