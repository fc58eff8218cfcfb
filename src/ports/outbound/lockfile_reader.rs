use crate::sbom_generation::domain::Package;
use crate::shared::Result;
use std::collections::HashMap;
use std::path::Path;

/// Contents of a parsed Gemfile.lock
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LockfileParseResult {
    /// Every locked spec in file order; platform variants repeat an identity
    pub packages: Vec<Package>,
    /// Gem name to the gem names it depends on
    pub dependency_map: HashMap<String, Vec<String>>,
    /// Gems listed under DEPENDENCIES, i.e. declared in the Gemfile
    pub top_level: Vec<String>,
}

/// LockfileReader port for reading the resolved dependency snapshot
///
/// This port abstracts the file system operations needed to locate and
/// parse `Gemfile.lock` (or `gems.locked`) in a project directory.
pub trait LockfileReader {
    /// Reads and parses the lockfile of the specified project directory
    ///
    /// # Errors
    /// Returns an error if:
    /// - No lockfile exists (`SbomError::LockfileNotFound`)
    /// - The file cannot be read or parsed
    fn read_and_parse_lockfile(&self, project_path: &Path) -> Result<LockfileParseResult>;
}
