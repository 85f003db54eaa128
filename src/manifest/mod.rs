//! Reference manifest types.
//!
//! Each release step publishes a `files_and_sizes.txt` listing every file it
//! produced with its size in bytes, one `<size>\t<name>` record per line.
//! The verifier reads the previous release's copy as its baseline.

pub mod store;

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::warn;

use crate::utils::errors::Result;

/// Identity of one reference manifest: which release, which step.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ManifestKey {
    pub release_number: u32,
    pub step: String,
}

impl ManifestKey {
    pub fn new(release_number: u32, step: impl Into<String>) -> Self {
        Self {
            release_number,
            step: step.into(),
        }
    }

    /// Archive key of the manifest object for this release and step.
    pub fn remote_key(&self, file_name: &str) -> String {
        format!(
            "private/releases/{}/{}/data/{}",
            self.release_number, self.step, file_name
        )
    }
}

impl fmt::Display for ManifestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "release {} step {}", self.release_number, self.step)
    }
}

/// Parsed manifest: file name -> expected size in bytes. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    sizes: HashMap<String, u64>,
    // File names in the order the manifest listed them, for stable reports.
    names: Vec<String>,
}

impl Manifest {
    /// Parse tab-separated `<size>\t<name>` records. Lines that do not split
    /// into at least two fields, or whose size field is not an integer, are
    /// skipped with a warning.
    pub fn parse(content: &str) -> Self {
        let mut sizes = HashMap::new();
        let mut names = Vec::new();

        for (line_number, line) in content.lines().enumerate() {
            if line.is_empty() {
                continue;
            }

            let mut fields = line.splitn(3, '\t');
            let size_field = fields.next().unwrap_or_default();
            let name = match fields.next() {
                Some(name) if !name.is_empty() => name,
                _ => {
                    warn!("Skipping manifest line {}: no file name", line_number + 1);
                    continue;
                }
            };
            let size: u64 = match size_field.trim().parse() {
                Ok(size) => size,
                Err(_) => {
                    warn!(
                        "Skipping manifest line {}: unparsable size {:?}",
                        line_number + 1,
                        size_field
                    );
                    continue;
                }
            };

            if sizes.insert(name.to_string(), size).is_none() {
                names.push(name.to_string());
            }
        }

        Self { sizes, names }
    }

    /// Read and parse a manifest from a local file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(Self::parse(&content))
    }

    /// Expected size for `name`. Names the manifest does not list resolve to
    /// 0: with no baseline there is no regression to detect.
    pub fn expected_size(&self, name: &str) -> u64 {
        self.sizes.get(name).copied().unwrap_or(0)
    }

    /// File names in manifest order.
    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
