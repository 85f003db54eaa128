//! Step verification engine.
//!
//! Three sequential phases: output directory exists, expected files exist,
//! file sizes have not regressed past tolerance. A missing directory
//! short-circuits the run before the reference manifest is ever fetched.

pub mod compare;
pub mod report;
pub mod tolerance;

use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};

use crate::manifest::store::ManifestStore;
use crate::manifest::ManifestKey;
use crate::utils::errors::{Result, VerifierError};
use compare::FileComparison;
use report::Report;
use tolerance::Tolerance;

/// A post-step verification check.
///
/// `StepVerifier` covers the generic three-phase check; steps that need
/// extra gates implement this trait themselves and reuse the provided
/// `run` rendering.
pub trait Verifier {
    fn step_name(&self) -> &str;

    fn verify(&mut self) -> Result<Report>;

    /// Run the verification, render the report, and derive the exit status.
    fn run(&mut self) -> Result<ExitCode> {
        let report = self.verify()?;
        if report.has_errors() {
            report.print_errors();
            return Ok(ExitCode::FAILURE);
        }

        println!("{} ran correctly!", self.step_name());
        if report.has_info() {
            report.print_info();
        }
        Ok(ExitCode::SUCCESS)
    }
}

/// The generic three-phase verifier used by every pipeline step.
pub struct StepVerifier {
    step: String,
    output_dir: PathBuf,
    release_number: u32,
    tolerance: Tolerance,
    manifests: ManifestStore,
}

impl StepVerifier {
    pub fn new(
        step: impl Into<String>,
        output_dir: impl Into<PathBuf>,
        release_number: u32,
        tolerance: Tolerance,
        manifests: ManifestStore,
    ) -> Result<Self> {
        if release_number < 1 {
            return Err(VerifierError::Config(
                "Release number must be at least 1; there is no release 0 baseline".to_string(),
            ));
        }

        Ok(Self {
            step: step.into(),
            output_dir: output_dir.into(),
            release_number,
            tolerance,
            manifests,
        })
    }

    /// The current release's manifest is only published after this gate, so
    /// both the expected-file list and the size baseline come from the
    /// previous release.
    fn baseline_key(&self) -> ManifestKey {
        ManifestKey::new(self.release_number - 1, self.step.clone())
    }

    fn check_output_dir_exists(&self) -> Report {
        let mut report = Report::new();
        if !self.output_dir.exists() {
            report.add_error(format!(
                "{} does not exist; Expected {} output files at this location",
                self.output_dir.display(),
                self.step
            ));
        }
        report
    }

    fn check_files_exist(&mut self) -> Result<Report> {
        let mut report = Report::new();
        for name in self.baseline_file_names()? {
            let path = self.output_dir.join(&name);
            if !path.exists() {
                report.add_error(format!("File {} does not exist", path.display()));
            }
        }
        Ok(report)
    }

    fn check_file_sizes(&mut self) -> Result<Report> {
        let key = self.baseline_key();
        let mut report = Report::new();

        for name in self.baseline_file_names()? {
            let path = self.output_dir.join(&name);
            if !path.exists() {
                // Already reported in the presence phase.
                debug!("Skipping size check for missing file {}", path.display());
                continue;
            }

            let expected = self.manifests.get(&key)?.expected_size(&name);
            match FileComparison::measure(&path, expected) {
                Ok(comparison) => {
                    if comparison.too_small(self.tolerance) {
                        report.add_error(comparison.message());
                    } else {
                        report.add_info(comparison.message());
                    }
                }
                Err(e) => {
                    report.add_error(format!(
                        "File {} could not be sized: {}",
                        path.display(),
                        e
                    ));
                }
            }
        }

        Ok(report)
    }

    fn baseline_file_names(&mut self) -> Result<Vec<String>> {
        let key = self.baseline_key();
        let manifest = self.manifests.get(&key)?;
        Ok(manifest.file_names().map(str::to_string).collect())
    }
}

impl Verifier for StepVerifier {
    fn step_name(&self) -> &str {
        &self.step
    }

    fn verify(&mut self) -> Result<Report> {
        info!(
            "Verifying {} output for release {} in {}",
            self.step,
            self.release_number,
            self.output_dir.display()
        );

        let mut report = self.check_output_dir_exists();
        if report.has_errors() {
            return Ok(report);
        }

        report.merge(self.check_files_exist()?);
        report.merge(self.check_file_sizes()?);
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::store::tests::MockStore;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn verifier_with(
        output_dir: &Path,
        work_dir: &Path,
        mock: MockStore,
        tolerance_percent: u32,
    ) -> StepVerifier {
        let manifests = ManifestStore::new(
            Box::new(mock),
            "release-archive",
            "files_and_sizes.txt",
            work_dir,
        );
        StepVerifier::new(
            "OrthoPairs",
            output_dir,
            90,
            Tolerance::new(tolerance_percent).unwrap(),
            manifests,
        )
        .unwrap()
    }

    #[test]
    fn test_missing_directory_short_circuits() -> Result<()> {
        let work = TempDir::new()?;
        let mock = MockStore::serving("100\ta.txt\n");
        let fetches = mock.fetch_counter();
        let mut verifier = verifier_with(Path::new("/no/such/output"), work.path(), mock, 10);

        let report = verifier.verify()?;
        assert_eq!(report.error_messages().len(), 1);
        assert!(report.info_messages().is_empty());
        assert_eq!(
            report.error_messages()[0],
            "/no/such/output does not exist; Expected OrthoPairs output files at this location"
        );
        // Phases 2-3 never ran, so the manifest was never fetched.
        assert_eq!(*fetches.borrow(), 0);
        Ok(())
    }

    #[test]
    fn test_missing_file_does_not_block_other_checks() -> Result<()> {
        let work = TempDir::new()?;
        let output = TempDir::new()?;
        fs::write(output.path().join("a.txt"), vec![0u8; 100])?;

        let mock = MockStore::serving("100\ta.txt\n50\tb.txt\n");
        let mut verifier = verifier_with(output.path(), work.path(), mock, 10);

        let report = verifier.verify()?;
        assert_eq!(
            report.error_messages(),
            [format!(
                "File {} does not exist",
                output.path().join("b.txt").display()
            )]
        );
        assert_eq!(
            report.info_messages(),
            [format!(
                "{} (expected 100 bytes and got 100 bytes - difference of 0 bytes (0.00%))",
                output.path().join("a.txt").display()
            )]
        );
        Ok(())
    }

    #[test]
    fn test_size_regression_reported() -> Result<()> {
        let work = TempDir::new()?;
        let output = TempDir::new()?;
        fs::write(output.path().join("a.txt"), vec![0u8; 80])?;

        let mock = MockStore::serving("100\ta.txt\n");
        let mut verifier = verifier_with(output.path(), work.path(), mock, 10);

        let report = verifier.verify()?;
        assert!(report.has_errors());
        assert_eq!(
            report.error_messages(),
            [format!(
                "{} (expected 100 bytes and got 80 bytes - difference of -20 bytes (-20.00%))",
                output.path().join("a.txt").display()
            )]
        );
        Ok(())
    }

    #[test]
    fn test_at_threshold_size_passes() -> Result<()> {
        let work = TempDir::new()?;
        let output = TempDir::new()?;
        fs::write(output.path().join("a.txt"), vec![0u8; 90])?;

        let mock = MockStore::serving("100\ta.txt\n");
        let mut verifier = verifier_with(output.path(), work.path(), mock, 10);

        let report = verifier.verify()?;
        assert!(!report.has_errors());
        assert_eq!(report.info_messages().len(), 1);
        Ok(())
    }

    #[test]
    fn test_manifest_fetched_once_across_phases() -> Result<()> {
        let work = TempDir::new()?;
        let output = TempDir::new()?;
        fs::write(output.path().join("a.txt"), vec![0u8; 100])?;
        fs::write(output.path().join("b.txt"), vec![0u8; 50])?;

        let mock = MockStore::serving("100\ta.txt\n50\tb.txt\n");
        let fetches = mock.fetch_counter();
        let mut verifier = verifier_with(output.path(), work.path(), mock, 10);

        let report = verifier.verify()?;
        assert!(!report.has_errors());
        assert_eq!(*fetches.borrow(), 1);
        Ok(())
    }

    #[test]
    fn test_fetch_failure_is_fatal() -> Result<()> {
        let work = TempDir::new()?;
        let output = TempDir::new()?;

        let mut verifier = verifier_with(output.path(), work.path(), MockStore::failing(), 10);
        let err = verifier.verify().unwrap_err();
        assert!(matches!(err, VerifierError::Retrieval { .. }));
        Ok(())
    }

    #[test]
    fn test_zero_expected_size_passes() -> Result<()> {
        // Expected size 0 means no regression is possible.
        let work = TempDir::new()?;
        let output = TempDir::new()?;
        fs::write(output.path().join("a.txt"), vec![0u8; 100])?;
        fs::write(work.path().join("files_and_sizes.txt"), "0\ta.txt\n")?;

        let mock = MockStore::serving("");
        let mut verifier = verifier_with(output.path(), work.path(), mock, 10);

        let report = verifier.verify()?;
        assert!(!report.has_errors());
        assert_eq!(
            report.info_messages(),
            [format!(
                "{} (expected 0 bytes and got 100 bytes - difference of 100 bytes (0.00%))",
                output.path().join("a.txt").display()
            )]
        );
        Ok(())
    }

    #[test]
    fn test_release_zero_rejected() {
        let manifests = ManifestStore::new(
            Box::new(MockStore::serving("")),
            "release-archive",
            "files_and_sizes.txt",
            ".",
        );
        let result = StepVerifier::new(
            "OrthoPairs",
            "/tmp/out",
            0,
            Tolerance::default(),
            manifests,
        );
        assert!(matches!(result, Err(VerifierError::Config(_))));
    }
}
