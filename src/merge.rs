//! K-way merge of sorted runs.
//!
//! Runs are merged through a comparator-driven min-heap seeded with each
//! run's front line. The heap never holds more than one entry per open
//! run. When the number of runs exceeds [`MERGE_FAN_IN`], batches are
//! first reduced to intermediate runs so only a bounded number of files
//! is open at once.

use std::io::Write;

use crate::compare::{compare_directed, lines_equivalent};
use crate::config::SortConfig;
use crate::error::SortResult;
use crate::heap::MinHeap;
use crate::run::{Run, RunStore};

/// Maximum number of runs merged in a single pass.
pub const MERGE_FAN_IN: usize = 16;

/// Front line of one run plus the index of the run it came from.
struct MergeEntry {
    line: String,
    source: usize,
}

/// Merge sorted runs into `output`, applying uniqueness filtering when
/// configured. `store` receives the intermediate runs of reduction passes.
pub fn merge_runs<W: Write>(
    mut runs: Vec<Run>,
    store: &mut RunStore,
    config: &SortConfig,
    output: &mut W,
) -> SortResult<()> {
    // Reduce until one final pass can hold every remaining run open.
    // Duplicates survive reduction passes untouched; only the final,
    // output-producing pass filters them, so the global last-emitted
    // rule sees every candidate line.
    while runs.len() > MERGE_FAN_IN {
        let mut reduced = Vec::with_capacity(runs.len() / MERGE_FAN_IN + 1);
        while !runs.is_empty() {
            let rest = runs.split_off(runs.len().min(MERGE_FAN_IN));
            let batch = std::mem::replace(&mut runs, rest);
            let mut writer = store.run_writer()?;
            merge_batch(batch, config, false, |line| writer.write_line(line))?;
            reduced.push(writer.finish()?);
        }
        runs = reduced;
    }

    merge_batch(runs, config, config.unique, |line| {
        output
            .write_all(line.as_bytes())
            .and_then(|_| output.write_all(b"\n"))
            .map_err(Into::into)
    })
}

/// Merge one batch of runs, emitting lines through `emit`.
fn merge_batch<F>(
    mut runs: Vec<Run>,
    config: &SortConfig,
    unique: bool,
    mut emit: F,
) -> SortResult<()>
where
    F: FnMut(&str) -> SortResult<()>,
{
    let mut last_emitted: Option<String> = None;

    // A lone run is already ordered: stream it through, keeping only the
    // adjacent-duplicate filter.
    if let [run] = runs.as_mut_slice() {
        while let Some(line) = run.next_line()? {
            if !is_duplicate(unique, &last_emitted, &line, config) {
                emit(&line)?;
                if unique {
                    last_emitted = Some(line);
                }
            }
        }
        return Ok(());
    }

    let mut heap = MinHeap::new(|a: &MergeEntry, b: &MergeEntry| {
        compare_directed(&a.line, &b.line, config)
    });

    for (idx, run) in runs.iter_mut().enumerate() {
        if let Some(line) = run.next_line()? {
            heap.push(MergeEntry { line, source: idx });
        }
    }

    while let Some(MergeEntry { line, source }) = heap.pop() {
        if let Some(next) = runs[source].next_line()? {
            heap.push(MergeEntry { line: next, source });
        }

        if !is_duplicate(unique, &last_emitted, &line, config) {
            emit(&line)?;
            if unique {
                last_emitted = Some(line);
            }
        }
    }

    Ok(())
}

fn is_duplicate(
    unique: bool,
    last_emitted: &Option<String>,
    line: &str,
    config: &SortConfig,
) -> bool {
    unique
        && last_emitted
            .as_deref()
            .is_some_and(|prev| lines_equivalent(prev, line, config))
}
