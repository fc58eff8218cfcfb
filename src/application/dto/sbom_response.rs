use crate::application::read_models::LicenseReportView;
use crate::sbom_generation::domain::SbomDocument;
use std::path::PathBuf;

/// SbomResponse - Internal response DTO from the SBOM generation use case
#[derive(Debug, Clone)]
pub struct SbomResponse {
    pub document: SbomDocument,
    /// Dependencies dropped by the group filter
    pub excluded_count: usize,
    /// Packages whose license lookup failed and were recorded without licenses
    pub lookup_failures: usize,
}

impl SbomResponse {
    pub fn new(document: SbomDocument, excluded_count: usize, lookup_failures: usize) -> Self {
        Self {
            document,
            excluded_count,
            lookup_failures,
        }
    }
}

/// LicenseReportResponse - Output of the license report use case
#[derive(Debug, Clone)]
pub struct LicenseReportResponse {
    /// Document the report was derived from
    pub source_path: PathBuf,
    pub report: LicenseReportView,
}
