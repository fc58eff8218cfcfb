use crate::sbom_generation::domain::{SbomDocument, SbomFormat};
use crate::shared::Result;

/// SbomCodec port: one implementation per text encoding
pub trait SbomCodec {
    /// Serializes a document of either schema
    fn encode(&self, document: &SbomDocument) -> Result<String>;

    /// Parses a document, detecting the schema from the content
    ///
    /// # Arguments
    /// * `content` - Encoded document text
    /// * `schema` - Expected schema; content of the other schema is an error
    ///
    /// # Errors
    /// Returns an error if the content is malformed, misses required
    /// fields, or contradicts `schema`
    fn decode(&self, content: &str, schema: Option<SbomFormat>) -> Result<SbomDocument>;
}
