use crate::shared::error::SbomError;
use crate::shared::Result;

/// Maximum length for gem names (security limit)
const MAX_PACKAGE_NAME_LENGTH: usize = 255;

/// Maximum length for gem versions (security limit)
const MAX_VERSION_LENGTH: usize = 100;

/// Package-url type used for every package in the document
pub const PURL_TYPE: &str = "gem";

/// NewType wrapper for a gem name with validation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageName(String);

impl PackageName {
    pub fn new(name: String) -> Result<Self> {
        if name.is_empty() {
            return Err(validation("Package name cannot be empty"));
        }

        if name.len() > MAX_PACKAGE_NAME_LENGTH {
            return Err(validation(format!(
                "Package name is too long ({} bytes). Maximum allowed: {} bytes",
                name.len(),
                MAX_PACKAGE_NAME_LENGTH
            )));
        }

        // Gem names are restricted to letters, digits, '-', '_' and '.'
        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
        {
            return Err(validation(format!(
                "Package name '{}' contains invalid characters. Only alphanumeric, hyphens, underscores and dots are allowed.",
                name
            )));
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PackageName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// NewType wrapper for a gem version with validation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version(String);

impl Version {
    pub fn new(version: String) -> Result<Self> {
        if version.is_empty() {
            return Err(validation("Package version cannot be empty"));
        }

        if version.len() > MAX_VERSION_LENGTH {
            return Err(validation(format!(
                "Package version is too long ({} bytes). Maximum allowed: {} bytes",
                version.len(),
                MAX_VERSION_LENGTH
            )));
        }

        if !version
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '+' || c == '_')
        {
            return Err(validation(format!(
                "Package version '{}' contains invalid characters. Only alphanumeric, dots, hyphens, underscores and plus are allowed.",
                version
            )));
        }

        Ok(Self(version))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn validation(message: impl Into<String>) -> anyhow::Error {
    SbomError::Validation {
        message: message.into(),
    }
    .into()
}

/// Package value object: the identity of one resolved gem
///
/// Identity is the `(name, version)` pair; platform variants of the same
/// release share one identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Package {
    name: PackageName,
    version: Version,
}

impl Package {
    pub fn new(name: String, version: String) -> Result<Self> {
        Ok(Self {
            name: PackageName::new(name)?,
            version: Version::new(version)?,
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn version(&self) -> &str {
        self.version.as_str()
    }

    /// Package URL, e.g. `pkg:gem/rake@13.0.6`
    pub fn purl(&self) -> String {
        format!("pkg:{}/{}@{}", PURL_TYPE, self.name, self.version)
    }
}

impl std::fmt::Display for Package {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.version)
    }
}
