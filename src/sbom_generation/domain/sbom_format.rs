use crate::shared::error::SbomError;

/// SBOM schema a document follows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SbomFormat {
    /// SPDX 2.3 document (default)
    #[default]
    Spdx,
    /// CycloneDX 1.4 bill of materials
    CycloneDx,
}

impl SbomFormat {
    /// Upper-case label used in user-facing messages
    pub fn label(&self) -> &'static str {
        match self {
            SbomFormat::Spdx => "SPDX",
            SbomFormat::CycloneDx => "CYCLONEDX",
        }
    }
}

impl std::str::FromStr for SbomFormat {
    type Err = SbomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "spdx" => Ok(SbomFormat::Spdx),
            "cyclonedx" => Ok(SbomFormat::CycloneDx),
            _ => Err(SbomError::unsupported_sbom_format(s)),
        }
    }
}

impl std::fmt::Display for SbomFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SbomFormat::Spdx => write!(f, "spdx"),
            SbomFormat::CycloneDx => write!(f, "cyclonedx"),
        }
    }
}
