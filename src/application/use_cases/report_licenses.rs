use crate::application::dto::{
    LicenseReportRequest, LicenseReportResponse, OutputFormat, DEFAULT_DOCUMENT_CANDIDATES,
};
use crate::application::factories::CodecFactory;
use crate::application::read_models::LicenseReportBuilder;
use crate::ports::outbound::DocumentReader;
use crate::shared::error::SbomError;
use crate::shared::Result;
use std::path::PathBuf;

/// ReportLicensesUseCase - Derives a license report from an existing SBOM file
///
/// # Type Parameters
/// * `DR` - DocumentReader implementation
pub struct ReportLicensesUseCase<DR> {
    document_reader: DR,
}

impl<DR: DocumentReader> ReportLicensesUseCase<DR> {
    pub fn new(document_reader: DR) -> Self {
        Self { document_reader }
    }

    /// Locates, decodes and summarizes a document
    ///
    /// # Errors
    /// - `SbomError::DocumentNotFound` when no candidate file exists
    /// - `SbomError::DocumentParseError` when the file cannot be decoded
    pub fn execute(&self, request: LicenseReportRequest) -> Result<LicenseReportResponse> {
        let path = self.locate_document(&request)?;
        let content = self.document_reader.read_document(&path)?;

        let encoding = OutputFormat::detect(request.output_format, &path, &content);
        let codec = CodecFactory::create(encoding);
        let document = codec
            .decode(&content, request.sbom_format)
            .map_err(|e| SbomError::DocumentParseError {
                path: path.clone(),
                details: e.to_string(),
            })?;

        Ok(LicenseReportResponse {
            report: LicenseReportBuilder::build(&document),
            source_path: path,
        })
    }

    /// Explicit file, else the first existing default file name
    ///
    /// Default names are tried in the order `bom.json`, `bom.xml`,
    /// `bom-cyclonedx.json`, `bom-cyclonedx.xml`, skipping names that
    /// contradict a given schema or encoding.
    fn locate_document(&self, request: &LicenseReportRequest) -> Result<PathBuf> {
        if let Some(file) = &request.file {
            return Ok(file.clone());
        }

        let candidates: Vec<PathBuf> = DEFAULT_DOCUMENT_CANDIDATES
            .iter()
            .filter(|(sbom, _)| request.sbom_format.is_none_or(|s| s == *sbom))
            .filter(|(_, encoding)| request.output_format.is_none_or(|e| e == *encoding))
            .map(|(sbom, encoding)| request.project_path.join(encoding.default_filename(*sbom)))
            .collect();

        if let Some(found) = candidates
            .iter()
            .find(|path| self.document_reader.document_exists(path))
        {
            return Ok(found.clone());
        }

        let names: Vec<String> = candidates
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect();

        Err(SbomError::DocumentNotFound {
            path: candidates
                .into_iter()
                .next()
                .unwrap_or_else(|| request.project_path.clone()),
            suggestion: format!(
                "Looked for {} in {}. Run `bundle-sbom dump` first, or pass --file.",
                names.join(", "),
                request.project_path.display()
            ),
        }
        .into())
    }
}
