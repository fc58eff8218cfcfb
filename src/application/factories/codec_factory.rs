use crate::adapters::outbound::codecs::{JsonCodec, XmlCodec};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::SbomCodec;
use crate::sbom_generation::domain::SbomFormat;

/// Factory for creating SBOM codecs
///
/// Selects the encoding adapter for an output format. It belongs in the
/// application layer as it picks infrastructure adapters for the use cases.
pub struct CodecFactory;

impl CodecFactory {
    /// Creates a codec instance for the specified encoding
    ///
    /// # Examples
    /// ```
    /// use bundle_sbom::application::dto::OutputFormat;
    /// use bundle_sbom::application::factories::CodecFactory;
    ///
    /// let codec = CodecFactory::create(OutputFormat::Xml);
    /// ```
    pub fn create(format: OutputFormat) -> Box<dyn SbomCodec> {
        match format {
            OutputFormat::Json => Box::new(JsonCodec::new()),
            OutputFormat::Xml => Box::new(XmlCodec::new()),
        }
    }

    /// Returns the progress message for the specified schema and encoding
    ///
    /// # Examples
    /// ```
    /// use bundle_sbom::application::dto::OutputFormat;
    /// use bundle_sbom::application::factories::CodecFactory;
    /// use bundle_sbom::sbom_generation::domain::SbomFormat;
    ///
    /// let message = CodecFactory::progress_message(SbomFormat::Spdx, OutputFormat::Json);
    /// assert_eq!(message, "📝 Generating SPDX JSON output...");
    /// ```
    pub fn progress_message(sbom: SbomFormat, format: OutputFormat) -> &'static str {
        match (sbom, format) {
            (SbomFormat::Spdx, OutputFormat::Json) => "📝 Generating SPDX JSON output...",
            (SbomFormat::Spdx, OutputFormat::Xml) => "📝 Generating SPDX XML output...",
            (SbomFormat::CycloneDx, OutputFormat::Json) => {
                "📝 Generating CycloneDX JSON output..."
            }
            (SbomFormat::CycloneDx, OutputFormat::Xml) => "📝 Generating CycloneDX XML output...",
        }
    }
}
