use super::OutputFormat;
use crate::sbom_generation::domain::SbomFormat;
use std::path::PathBuf;

/// SbomRequest - Internal request DTO for the SBOM generation use case
#[derive(Debug, Clone)]
pub struct SbomRequest {
    /// Project directory containing Gemfile.lock
    pub project_path: PathBuf,
    /// Schema of the generated document
    pub sbom_format: SbomFormat,
    /// Encoding of the generated document
    pub output_format: OutputFormat,
    /// Bundler groups whose gems are left out
    pub without_groups: Vec<String>,
}

impl SbomRequest {
    pub fn new(
        project_path: PathBuf,
        sbom_format: SbomFormat,
        output_format: OutputFormat,
        without_groups: Vec<String>,
    ) -> Self {
        Self {
            project_path,
            sbom_format,
            output_format,
            without_groups,
        }
    }

    /// Where the document goes unless an explicit output path is given
    pub fn default_output_path(&self) -> PathBuf {
        self.project_path
            .join(self.output_format.default_filename(self.sbom_format))
    }
}

/// LicenseReportRequest - Internal request DTO for the license report use case
#[derive(Debug, Clone, Default)]
pub struct LicenseReportRequest {
    /// Directory searched for default file names
    pub project_path: PathBuf,
    /// Explicit document path; skips default file probing
    pub file: Option<PathBuf>,
    /// Restricts probing and decoding to one encoding
    pub output_format: Option<OutputFormat>,
    /// Restricts probing and decoding to one schema
    pub sbom_format: Option<SbomFormat>,
}
