/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod output_format;
mod sbom_request;
mod sbom_response;

pub use output_format::{OutputFormat, DEFAULT_DOCUMENT_CANDIDATES};
pub use sbom_request::{LicenseReportRequest, SbomRequest};
pub use sbom_response::{LicenseReportResponse, SbomResponse};
