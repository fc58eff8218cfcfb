use crate::shared::Result;
use std::path::Path;

/// DocumentReader port for loading previously generated SBOM files
pub trait DocumentReader {
    fn document_exists(&self, path: &Path) -> bool;

    /// # Errors
    /// Returns `SbomError::DocumentNotFound` when the file is missing, or a
    /// read error for symlinks, oversized files and I/O failures
    fn read_document(&self, path: &Path) -> Result<String>;
}
