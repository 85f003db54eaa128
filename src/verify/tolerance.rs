//! Size-drop tolerance arithmetic.

use crate::utils::errors::{Result, VerifierError};

/// Maximum acceptable percentage shrinkage, validated into [0, 100].
///
/// Two predicates live here. `is_drop` is the generic percent-change check;
/// `minimum_acceptable` is the rounded byte floor the file comparison uses.
/// They agree everywhere except exactly at the threshold, where the floor
/// form lets an at-threshold file pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tolerance {
    percent: u32,
}

impl Tolerance {
    pub fn new(percent: u32) -> Result<Self> {
        if percent > 100 {
            return Err(VerifierError::Config(format!(
                "Drop tolerance percentage must be between 0 and 100, got {}",
                percent
            )));
        }
        Ok(Self { percent })
    }

    pub fn percent(&self) -> u32 {
        self.percent
    }

    /// True iff `current` is a drop of at least this tolerance below
    /// `baseline`. Equal values or growth are never a drop. A zero baseline
    /// means there is nothing to regress from, so never a drop.
    pub fn is_drop(&self, current: u64, baseline: u64) -> bool {
        if baseline == 0 {
            return false;
        }

        let percent_change = (current as f64 - baseline as f64) * 100.0 / baseline as f64;
        percent_change < 0.0 && percent_change.abs() >= self.percent as f64
    }

    /// Smallest byte count that still passes against `expected`:
    /// `round(expected * (100 - percent) / 100)`.
    pub fn minimum_acceptable(&self, expected: u64) -> u64 {
        (expected as f64 * ((100 - self.percent) as f64 / 100.0)).round() as u64
    }
}

impl Default for Tolerance {
    /// The pipeline-wide default of a 10% allowed drop.
    fn default() -> Self {
        Self { percent: 10 }
    }
}
