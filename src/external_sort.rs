//! Memory-bounded ingestion: in-memory sort when the input fits, external
//! merge sort when it does not.
//!
//! Lines are buffered until the next line would push the accounted byte
//! cost past the budget; the buffer is then sorted and spilled as a run.
//! Inputs that never reach the budget are sorted and emitted without
//! touching the disk at all.

use std::io::{BufRead, Write};

use crate::config::SortConfig;
use crate::error::{SortError, SortResult};
use crate::memory_sort::sort_lines;
use crate::merge::merge_runs;
use crate::run::{Run, RunStore};

/// Byte budget for buffered lines before spilling to disk.
pub const MAX_MEMORY_BYTES: usize = 100 * 1024 * 1024;

/// Accounted overhead per buffered line on top of its byte length,
/// approximating the in-memory cost of a heap-allocated `String`.
pub const LINE_OVERHEAD_BYTES: usize = 32;

/// Tracks the accounted cost of buffered lines against a fixed budget.
pub struct MemoryBudget {
    limit: usize,
    used: usize,
}

impl MemoryBudget {
    pub fn new(limit: usize) -> Self {
        Self { limit, used: 0 }
    }

    /// Accounted cost of one line.
    pub fn line_cost(line: &str) -> usize {
        line.len() + LINE_OVERHEAD_BYTES
    }

    /// Whether accepting `line` would push the running total past the
    /// budget. The line that trips this is still buffered afterwards, so
    /// the buffer overshoots by at most one line.
    pub fn would_exceed(&self, line: &str) -> bool {
        self.used + Self::line_cost(line) > self.limit
    }

    pub fn charge(&mut self, line: &str) {
        self.used += Self::line_cost(line);
    }

    pub fn reset(&mut self) {
        self.used = 0;
    }
}

/// Sorting engine with a configurable memory budget.
pub struct ExternalSorter {
    budget_limit: usize,
}

impl ExternalSorter {
    /// Create a sorter with the default budget.
    pub fn new() -> Self {
        Self {
            budget_limit: MAX_MEMORY_BYTES,
        }
    }

    /// Create a sorter with an explicit byte budget.
    pub fn with_budget(budget_limit: usize) -> Self {
        Self { budget_limit }
    }

    /// Read all lines from `input`, sort them per `config` and write the
    /// newline-terminated result to `output`.
    pub fn sort<R: BufRead, W: Write>(
        &self,
        input: R,
        mut output: W,
        config: &SortConfig,
    ) -> SortResult<()> {
        let mut budget = MemoryBudget::new(self.budget_limit);
        let mut buffer: Vec<String> = Vec::new();
        let mut store: Option<RunStore> = None;
        let mut runs: Vec<Run> = Vec::new();

        for line in input.lines() {
            let line = line.map_err(|e| SortError::read_failed(&e))?;

            if budget.would_exceed(&line) && !buffer.is_empty() {
                if store.is_none() {
                    store = Some(RunStore::new()?);
                }
                if let Some(store) = &mut store {
                    let sorted = sort_lines(std::mem::take(&mut buffer), config);
                    runs.push(store.create_run(&sorted)?);
                }
                budget.reset();
            }

            budget.charge(&line);
            buffer.push(line);
        }

        match store {
            // The input never crossed the budget: one in-memory sort, no
            // runs, no merge phase.
            None => {
                for line in sort_lines(buffer, config) {
                    output.write_all(line.as_bytes())?;
                    output.write_all(b"\n")?;
                }
            }
            Some(mut store) => {
                if !buffer.is_empty() {
                    let sorted = sort_lines(std::mem::take(&mut buffer), config);
                    runs.push(store.create_run(&sorted)?);
                }
                merge_runs(runs, &mut store, config, &mut output)?;
            }
        }

        output.flush()?;
        Ok(())
    }
}

impl Default for ExternalSorter {
    fn default() -> Self {
        Self::new()
    }
}

/// Sort `input` to `output` under the default memory budget.
pub fn run_sort<R: BufRead, W: Write>(input: R, output: W, config: &SortConfig) -> SortResult<()> {
    ExternalSorter::new().sort(input, output, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SortConfigBuilder, SortMode};
    use std::io::Cursor;

    fn sort_with(input: &str, config: &SortConfig, budget: usize) -> String {
        let mut output = Vec::new();
        ExternalSorter::with_budget(budget)
            .sort(Cursor::new(input), &mut output, config)
            .expect("sort");
        String::from_utf8(output).expect("utf8")
    }

    #[test]
    fn test_in_memory_path() {
        let cfg = SortConfigBuilder::new().build().expect("config");
        let out = sort_with("banana\napple\ncherry\n", &cfg, MAX_MEMORY_BYTES);
        assert_eq!(out, "apple\nbanana\ncherry\n");
    }

    #[test]
    fn test_external_path_tiny_budget() {
        // A budget this small spills after every line; output must match
        // the in-memory result regardless.
        let cfg = SortConfigBuilder::new().build().expect("config");
        let out = sort_with("banana\napple\ncherry\n", &cfg, 1);
        assert_eq!(out, "apple\nbanana\ncherry\n");
    }

    #[test]
    fn test_paths_agree() {
        let cfg = SortConfigBuilder::new()
            .mode(SortMode::Numeric)
            .build()
            .expect("config");
        let input: String = (0..200).rev().map(|v| format!("{v}\n")).collect();
        let in_memory = sort_with(&input, &cfg, MAX_MEMORY_BYTES);
        let external = sort_with(&input, &cfg, 64);
        assert_eq!(in_memory, external);
    }

    #[test]
    fn test_external_unique() {
        let cfg = SortConfigBuilder::new().unique().build().expect("config");
        let out = sort_with("b\na\na\nc\nb\n", &cfg, 1);
        assert_eq!(out, "a\nb\nc\n");
    }

    #[test]
    fn test_external_reverse() {
        let cfg = SortConfigBuilder::new().reverse().build().expect("config");
        let out = sort_with("b\nd\na\nc\n", &cfg, 1);
        assert_eq!(out, "d\nc\nb\na\n");
    }

    #[test]
    fn test_idempotence() {
        let cfg = SortConfigBuilder::new()
            .mode(SortMode::HumanNumeric)
            .build()
            .expect("config");
        let once = sort_with("2K\n1500\n1Ki\n10\n", &cfg, 24);
        let twice = sort_with(&once, &cfg, 24);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_input() {
        let cfg = SortConfigBuilder::new().build().expect("config");
        assert_eq!(sort_with("", &cfg, MAX_MEMORY_BYTES), "");
        assert_eq!(sort_with("", &cfg, 1), "");
    }

    #[test]
    fn test_budget_accounting() {
        let mut budget = MemoryBudget::new(100);
        // Cost is length plus fixed overhead.
        assert_eq!(MemoryBudget::line_cost("abcd"), 4 + LINE_OVERHEAD_BYTES);
        assert!(!budget.would_exceed("abcd"));
        budget.charge("abcd");
        // 36 of 100 used; a second line still fits.
        assert!(!budget.would_exceed("abcd"));
        budget.charge("abcd");
        // 72 of 100 used; a third would cross the limit.
        assert!(budget.would_exceed("abcd"));
        budget.reset();
        assert!(!budget.would_exceed("abcd"));
    }

    #[test]
    fn test_round_trip_multiset_external() {
        let cfg = SortConfigBuilder::new().build().expect("config");
        let input = "c\na\nb\na\nc\nb\n";
        let out = sort_with(input, &cfg, 1);
        assert_eq!(out, "a\na\nb\nb\nc\nc\n");
    }
}
