use crate::sbom_generation::domain::SbomMetadata;
use chrono::{DateTime, Utc};
use uuid::Uuid;

pub const TOOL_NAME: &str = "bundle-sbom";

/// Creation time layout shared by both schemas
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// SbomGenerator service for generating SBOM metadata
///
/// Pins down the time- and randomness-dependent values of a document.
pub struct SbomGenerator;

impl SbomGenerator {
    /// Generates SBOM metadata with current timestamp and a fresh UUID
    ///
    /// # Arguments
    /// * `tool_name` - Name of the tool generating the SBOM
    /// * `tool_version` - Version of the tool
    /// * `document_name` - Project name the document describes
    pub fn generate_metadata(
        tool_name: &str,
        tool_version: &str,
        document_name: &str,
    ) -> SbomMetadata {
        Self::generate_metadata_at(Utc::now(), tool_name, tool_version, document_name)
    }

    /// Same as `generate_metadata` with an explicit creation time
    pub fn generate_metadata_at(
        now: DateTime<Utc>,
        tool_name: &str,
        tool_version: &str,
        document_name: &str,
    ) -> SbomMetadata {
        SbomMetadata::new(
            now.format(TIMESTAMP_FORMAT).to_string(),
            tool_name.to_string(),
            tool_version.to_string(),
            Uuid::new_v4().to_string(),
            document_name.to_string(),
        )
    }

    /// Generates SBOM metadata with default tool information (bundle-sbom)
    ///
    /// This uses the compile-time version from Cargo.toml
    pub fn generate_default_metadata(document_name: &str) -> SbomMetadata {
        Self::generate_metadata(TOOL_NAME, env!("CARGO_PKG_VERSION"), document_name)
    }
}
