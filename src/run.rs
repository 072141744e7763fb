//! On-disk runs: sorted batches of lines spilled out of memory.
//!
//! All run files live in one `TempDir` owned by the [`RunStore`], so every
//! file is removed when the store goes out of scope, on success and on
//! unwinding alike. Each [`Run`] additionally deletes its own file as soon
//! as it is dropped, which frees disk space while a long merge is still
//! holding the store open.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use tempfile::TempDir;

use crate::error::{SortError, SortResult};

/// Owns the temporary directory that all runs of one invocation live in.
pub struct RunStore {
    temp_dir: TempDir,
    next_id: usize,
}

impl RunStore {
    /// Create a store backed by a fresh temporary directory.
    pub fn new() -> SortResult<Self> {
        let temp_dir = tempfile::Builder::new()
            .prefix("sort-")
            .tempdir()
            .map_err(|e| SortError::run_write_failed(&e))?;
        Ok(Self { temp_dir, next_id: 0 })
    }

    /// Persist an already-sorted batch of lines as a new run and open it
    /// for reading.
    pub fn create_run(&mut self, lines: &[String]) -> SortResult<Run> {
        let mut writer = self.run_writer()?;
        for line in lines {
            writer.write_line(line)?;
        }
        writer.finish()
    }

    /// Open a writer for a run whose lines are produced incrementally,
    /// as during an intermediate merge pass.
    pub fn run_writer(&mut self) -> SortResult<RunWriter> {
        let path = self
            .temp_dir
            .path()
            .join(format!("run_{:06}.txt", self.next_id));
        self.next_id += 1;

        let file = File::create(&path).map_err(|e| SortError::run_write_failed(&e))?;
        Ok(RunWriter {
            path,
            writer: BufWriter::new(file),
        })
    }
}

/// Write half of a run's lifecycle: newline-terminated records going to a
/// uniquely named file inside the store's directory.
pub struct RunWriter {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl RunWriter {
    pub fn write_line(&mut self, line: &str) -> SortResult<()> {
        self.writer
            .write_all(line.as_bytes())
            .and_then(|_| self.writer.write_all(b"\n"))
            .map_err(|e| SortError::run_write_failed(&e))
    }

    /// Flush, close and reopen the file for sequential reading.
    pub fn finish(mut self) -> SortResult<Run> {
        self.writer
            .flush()
            .map_err(|e| SortError::run_write_failed(&e))?;
        drop(self.writer);

        let file = File::open(&self.path).map_err(|e| SortError::run_write_failed(&e))?;
        Ok(Run {
            path: self.path,
            reader: BufReader::new(file),
        })
    }
}

/// A sorted, externally persisted batch of lines with forward-only read
/// access. Read by exactly one cursor; the backing file is deleted on drop.
pub struct Run {
    path: PathBuf,
    reader: BufReader<File>,
}

impl Run {
    /// Advance the cursor and return the next line, or `None` once the run
    /// is exhausted.
    pub fn next_line(&mut self) -> SortResult<Option<String>> {
        let mut line = String::new();
        let bytes = self.reader.read_line(&mut line)?;
        if bytes == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
        }
        Ok(Some(line))
    }
}

impl Drop for Run {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}
