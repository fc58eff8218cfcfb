use super::Package;

/// Sentinel meaning "no claim made" for license and supplier fields
pub const NOASSERTION: &str = "NOASSERTION";

/// Separator used when several license identifiers are joined into one string
pub const LICENSE_SEPARATOR: &str = ", ";

/// Outcome of a license registry query
///
/// An unknown package is an expected answer, not a fault, so it is a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LicenseLookup {
    /// The package is known; the list may still be empty
    Found(Vec<String>),
    /// The registry has no record of this name and version
    NotFound,
}

impl LicenseLookup {
    pub fn into_license_set(self) -> LicenseSet {
        match self {
            LicenseLookup::Found(licenses) => LicenseSet::new(licenses),
            LicenseLookup::NotFound => LicenseSet::default(),
        }
    }
}

/// LicenseSet value object: deduplicated license identifiers in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LicenseSet(Vec<String>);

impl LicenseSet {
    /// Trims each identifier, drops blanks and keeps the first occurrence of duplicates
    pub fn new<I>(licenses: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for license in licenses {
            let trimmed = license.trim();
            if trimmed.is_empty() || unique.iter().any(|l| l == trimmed) {
                continue;
            }
            unique.push(trimmed.to_string());
        }
        Self(unique)
    }

    pub fn ids(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Joined declaration string, or `NOASSERTION` when no license is known
    pub fn declared(&self) -> String {
        if self.0.is_empty() {
            NOASSERTION.to_string()
        } else {
            self.0.join(LICENSE_SEPARATOR)
        }
    }
}

/// A resolved package paired with the licenses found for it
#[derive(Debug, Clone, PartialEq)]
pub struct LicensedPackage {
    package: Package,
    licenses: LicenseSet,
}

impl LicensedPackage {
    pub fn new(package: Package, licenses: LicenseSet) -> Self {
        Self { package, licenses }
    }

    pub fn package(&self) -> &Package {
        &self.package
    }

    pub fn licenses(&self) -> &LicenseSet {
        &self.licenses
    }
}
