use super::cyclonedx_document::CycloneDxDocument;
use super::license_info::LicensedPackage;
use super::license_report::ReportEntry;
use super::sbom_format::SbomFormat;
use super::sbom_metadata::SbomMetadata;
use super::spdx_document::SpdxDocument;

/// Behaviour shared by both document schemas
pub trait SbomSchema: Sized {
    /// Assembles a document; packages must already be deduplicated
    fn build(packages: &[LicensedPackage], metadata: &SbomMetadata) -> Self;

    /// Normalizes every package into the schema-neutral report form
    fn to_report_entries(&self) -> Vec<ReportEntry>;

    fn package_count(&self) -> usize;
}

/// A document of either schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SbomDocument {
    Spdx(SpdxDocument),
    CycloneDx(CycloneDxDocument),
}

impl SbomDocument {
    pub fn build(
        format: SbomFormat,
        packages: &[LicensedPackage],
        metadata: &SbomMetadata,
    ) -> Self {
        match format {
            SbomFormat::Spdx => SbomDocument::Spdx(SpdxDocument::build(packages, metadata)),
            SbomFormat::CycloneDx => {
                SbomDocument::CycloneDx(CycloneDxDocument::build(packages, metadata))
            }
        }
    }

    pub fn format(&self) -> SbomFormat {
        match self {
            SbomDocument::Spdx(_) => SbomFormat::Spdx,
            SbomDocument::CycloneDx(_) => SbomFormat::CycloneDx,
        }
    }

    pub fn to_report_entries(&self) -> Vec<ReportEntry> {
        match self {
            SbomDocument::Spdx(doc) => doc.to_report_entries(),
            SbomDocument::CycloneDx(doc) => doc.to_report_entries(),
        }
    }

    pub fn package_count(&self) -> usize {
        match self {
            SbomDocument::Spdx(doc) => doc.package_count(),
            SbomDocument::CycloneDx(doc) => doc.package_count(),
        }
    }
}
