/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, gem registries, console).
pub mod document_reader;
pub mod license_repository;
pub mod lockfile_reader;
pub mod output_presenter;
pub mod progress_reporter;
pub mod project_config_reader;
pub mod report_formatter;
pub mod sbom_codec;

pub use document_reader::DocumentReader;
pub use license_repository::{GemLicenseMetadata, LicenseRepository};
pub use lockfile_reader::{LockfileParseResult, LockfileReader};
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use project_config_reader::{GemGroups, ProjectConfigReader};
pub use report_formatter::ReportFormatter;
pub use sbom_codec::SbomCodec;
