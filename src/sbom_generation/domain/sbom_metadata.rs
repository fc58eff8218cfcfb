/// SbomMetadata value object: everything a document needs besides its packages
///
/// Random and time-dependent values are generated once (see `SbomGenerator`)
/// so that building a document from the same metadata is deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct SbomMetadata {
    timestamp: String,
    tool_name: String,
    tool_version: String,
    document_id: String,
    document_name: String,
}

impl SbomMetadata {
    pub fn new(
        timestamp: String,
        tool_name: String,
        tool_version: String,
        document_id: String,
        document_name: String,
    ) -> Self {
        Self {
            timestamp,
            tool_name,
            tool_version,
            document_id,
            document_name,
        }
    }

    /// UTC creation time, `%Y-%m-%dT%H:%M:%SZ`
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    pub fn tool_version(&self) -> &str {
        &self.tool_version
    }

    /// Random UUID shared by the SPDX namespace and the CycloneDX serial number
    pub fn document_id(&self) -> &str {
        &self.document_id
    }

    /// Project name the document describes
    pub fn document_name(&self) -> &str {
        &self.document_name
    }

    pub fn serial_number(&self) -> String {
        format!("urn:uuid:{}", self.document_id)
    }
}
