//! Per-file size comparison against the previous release.

use std::fs;
use std::path::{Path, PathBuf};

use super::tolerance::Tolerance;
use crate::utils::errors::Result;

/// One file's measured size against its expected size. Immutable once built.
#[derive(Debug, Clone)]
pub struct FileComparison {
    path: PathBuf,
    expected_bytes: u64,
    actual_bytes: u64,
}

impl FileComparison {
    /// Stat `path` and pair its size with `expected_bytes`. A failed stat is
    /// propagated, never silently treated as an empty file.
    pub fn measure(path: &Path, expected_bytes: u64) -> Result<Self> {
        let actual_bytes = fs::metadata(path)?.len();
        Ok(Self {
            path: path.to_path_buf(),
            expected_bytes,
            actual_bytes,
        })
    }

    pub fn expected_bytes(&self) -> u64 {
        self.expected_bytes
    }

    pub fn actual_bytes(&self) -> u64 {
        self.actual_bytes
    }

    /// Signed size change, actual minus expected.
    pub fn difference(&self) -> i64 {
        self.actual_bytes as i64 - self.expected_bytes as i64
    }

    /// Size change as a percentage of the expected size. Zero when the
    /// expected size is zero, pairing with the no-regression verdict.
    pub fn percent_difference(&self) -> f64 {
        if self.expected_bytes == 0 {
            return 0.0;
        }
        self.difference() as f64 * 100.0 / self.expected_bytes as f64
    }

    /// True iff the file shrank below the tolerance's acceptable floor.
    pub fn too_small(&self, tolerance: Tolerance) -> bool {
        self.actual_bytes < tolerance.minimum_acceptable(self.expected_bytes)
    }

    /// Fixed-format line consumed by downstream log scraping. Do not change
    /// the wording or precision.
    pub fn message(&self) -> String {
        format!(
            "{} (expected {} bytes and got {} bytes - difference of {} bytes ({:.2}%))",
            self.path.display(),
            self.expected_bytes,
            self.actual_bytes,
            self.difference(),
            self.percent_difference()
        )
    }
}
