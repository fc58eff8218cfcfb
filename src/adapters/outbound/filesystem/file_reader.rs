use super::gemfile_lock_parser::parse_lockfile;
use super::gemfile_parser::parse_gemfile_groups;
use crate::ports::outbound::{
    DocumentReader, GemGroups, LockfileParseResult, LockfileReader, ProjectConfigReader,
};
use crate::shared::error::SbomError;
use crate::shared::security::{safe_read_to_string, validate_regular_file};
use crate::shared::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Lockfile names Bundler accepts, in lookup order
const LOCKFILE_NAMES: [&str; 2] = ["Gemfile.lock", "gems.locked"];

/// Gemfile names Bundler accepts, in lookup order
const GEMFILE_NAMES: [&str; 2] = ["Gemfile", "gems.rb"];

/// FileSystemReader adapter for reading project files
///
/// Implements the LockfileReader, ProjectConfigReader and DocumentReader
/// ports. Every read rejects symlinks and files above the size limit.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }

    fn validate_project_path(&self, project_path: &Path) -> Result<()> {
        if !project_path.is_dir() {
            return Err(SbomError::InvalidProjectPath {
                path: project_path.to_path_buf(),
                reason: "Directory does not exist or is not a directory".to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn first_existing(project_path: &Path, names: &[&str]) -> Option<PathBuf> {
        names
            .iter()
            .map(|name| project_path.join(name))
            .find(|path| fs::symlink_metadata(path).is_ok())
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl LockfileReader for FileSystemReader {
    fn read_and_parse_lockfile(&self, project_path: &Path) -> Result<LockfileParseResult> {
        self.validate_project_path(project_path)?;

        let Some(lockfile_path) = Self::first_existing(project_path, &LOCKFILE_NAMES) else {
            return Err(SbomError::LockfileNotFound {
                path: project_path.join(LOCKFILE_NAMES[0]),
                suggestion: format!(
                    "No Gemfile.lock in project directory \"{}\". Run `bundle install` first, \
                     or specify the correct path with the --path option.",
                    project_path.display()
                ),
            }
            .into());
        };

        let content = safe_read_to_string(&lockfile_path, "Gemfile.lock").map_err(|e| {
            SbomError::LockfileParseError {
                path: lockfile_path.clone(),
                details: e.to_string(),
            }
        })?;

        parse_lockfile(&content).map_err(|e| {
            SbomError::LockfileParseError {
                path: lockfile_path,
                details: e.to_string(),
            }
            .into()
        })
    }
}

impl ProjectConfigReader for FileSystemReader {
    fn read_project_name(&self, project_path: &Path) -> Result<String> {
        let canonical = project_path
            .canonicalize()
            .map_err(|e| SbomError::InvalidProjectPath {
                path: project_path.to_path_buf(),
                reason: e.to_string(),
            })?;

        canonical
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                SbomError::InvalidProjectPath {
                    path: canonical.clone(),
                    reason: "Project directory has no name".to_string(),
                }
                .into()
            })
    }

    fn read_gem_groups(&self, project_path: &Path) -> Result<Option<GemGroups>> {
        let Some(gemfile_path) = Self::first_existing(project_path, &GEMFILE_NAMES) else {
            return Ok(None);
        };

        let content = safe_read_to_string(&gemfile_path, "Gemfile")?;
        Ok(Some(parse_gemfile_groups(&content)?))
    }
}

impl DocumentReader for FileSystemReader {
    fn document_exists(&self, path: &Path) -> bool {
        fs::symlink_metadata(path).is_ok()
    }

    fn read_document(&self, path: &Path) -> Result<String> {
        if !self.document_exists(path) {
            return Err(SbomError::DocumentNotFound {
                path: path.to_path_buf(),
                suggestion: "Run `bundle-sbom dump` first, or check the --file path.".to_string(),
            }
            .into());
        }

        let read_error = |details: String| SbomError::FileReadError {
            path: path.to_path_buf(),
            details,
        };
        validate_regular_file(path, "SBOM file").map_err(|e| read_error(e.to_string()))?;
        let bytes = fs::read(path).map_err(|e| read_error(e.to_string()))?;

        // Undecodable content is a parse failure, not an I/O one
        String::from_utf8(bytes).map_err(|e| {
            SbomError::DocumentParseError {
                path: path.to_path_buf(),
                details: format!("File is not valid UTF-8: {}", e),
            }
            .into()
        })
    }
}
