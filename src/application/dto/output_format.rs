use crate::sbom_generation::domain::SbomFormat;
use crate::shared::error::SbomError;
use std::path::Path;

/// Text encoding of an SBOM file
///
/// Lives in the application layer: both the CLI and the codecs need it,
/// while the domain only knows schemas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// JSON (default)
    #[default]
    Json,
    /// XML
    Xml,
}

/// Default file names in the order `license` tries them
pub const DEFAULT_DOCUMENT_CANDIDATES: [(SbomFormat, OutputFormat); 4] = [
    (SbomFormat::Spdx, OutputFormat::Json),
    (SbomFormat::Spdx, OutputFormat::Xml),
    (SbomFormat::CycloneDx, OutputFormat::Json),
    (SbomFormat::CycloneDx, OutputFormat::Xml),
];

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Xml => "xml",
        }
    }

    /// Guesses the encoding from a `.json` / `.xml` extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(OutputFormat::Json),
            "xml" => Some(OutputFormat::Xml),
            _ => None,
        }
    }

    /// Guesses the encoding from the first non-whitespace character
    pub fn sniff(content: &str) -> Self {
        match content.trim_start().chars().next() {
            Some('<') => OutputFormat::Xml,
            _ => OutputFormat::Json,
        }
    }

    /// Encoding of a document: explicit choice, then extension, then content
    pub fn detect(explicit: Option<Self>, path: &Path, content: &str) -> Self {
        explicit
            .or_else(|| Self::from_path(path))
            .unwrap_or_else(|| Self::sniff(content))
    }

    /// File name `dump` writes when no output path is given
    pub fn default_filename(&self, sbom: SbomFormat) -> &'static str {
        match (sbom, self) {
            (SbomFormat::Spdx, OutputFormat::Json) => "bom.json",
            (SbomFormat::Spdx, OutputFormat::Xml) => "bom.xml",
            (SbomFormat::CycloneDx, OutputFormat::Json) => "bom-cyclonedx.json",
            (SbomFormat::CycloneDx, OutputFormat::Xml) => "bom-cyclonedx.xml",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = SbomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "xml" => Ok(OutputFormat::Xml),
            _ => Err(SbomError::unsupported_output_format(s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}
