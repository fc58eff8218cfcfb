pub mod cyclonedx_document;
pub mod dependency_source;
pub mod license_info;
pub mod license_report;
pub mod package;
pub mod sbom_document;
pub mod sbom_format;
pub mod sbom_metadata;
pub mod spdx_document;

pub use cyclonedx_document::{
    CdxComponent, CdxMetadata, CdxRootComponent, CdxTool, CycloneDxDocument,
};
pub use dependency_source::{DependencySource, ResolvedDependency, DEFAULT_GROUP};
pub use license_info::{LicenseLookup, LicenseSet, LicensedPackage, NOASSERTION};
pub use license_report::{LicenseTally, ReportEntry};
pub use package::{Package, PackageName, Version};
pub use sbom_document::{SbomDocument, SbomSchema};
pub use sbom_format::SbomFormat;
pub use sbom_metadata::SbomMetadata;
pub use spdx_document::{CreationInfo, ExternalRef, SpdxDocument, SpdxPackage};
