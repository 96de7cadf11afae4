//! File-backed instrument list adapter.
//!
//! Reads a ranked ticker list (one ticker per line, rank order preserved,
//! `#` comments and blank lines ignored) and serves index ranges from it.

use crate::domain::error::MeanrevError;
use crate::ports::ticker_port::TickerListPort;
use std::fs;
use std::path::PathBuf;

pub struct FileTickerAdapter {
    path: PathBuf,
}

impl FileTickerAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_all(&self) -> Result<Vec<String>, MeanrevError> {
        let content = fs::read_to_string(&self.path).map_err(|e| MeanrevError::Data {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;

        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(|line| line.to_uppercase())
            .collect())
    }
}

impl TickerListPort for FileTickerAdapter {
    fn tickers(&self, from: usize, to: usize) -> Result<Vec<String>, MeanrevError> {
        let all = self.read_all()?;
        let from = from.min(all.len());
        let to = to.min(all.len()).max(from);
        Ok(all[from..to].to_vec())
    }
}
