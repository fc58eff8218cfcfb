mod document_builder;
mod group_filter;
mod group_resolver;
mod license_analyzer;
mod sbom_generator;

pub use document_builder::{DependencySelection, DocumentBuilder};
pub use group_filter::GroupFilter;
pub use group_resolver::{GroupResolution, GroupResolver};
pub use license_analyzer::LicenseAnalyzer;
pub use sbom_generator::{SbomGenerator, TIMESTAMP_FORMAT, TOOL_NAME};
