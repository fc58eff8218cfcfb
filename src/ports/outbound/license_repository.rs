use crate::sbom_generation::domain::LicenseLookup;
use crate::sbom_generation::policies::LicensePriority;
use crate::shared::Result;
use async_trait::async_trait;

/// Raw license fields of a gem: (license, licenses)
pub type GemLicenseMetadata = (Option<String>, Vec<String>);

/// LicenseRepository port for fetching license information
///
/// Implemented by the installed-gem specification reader and the RubyGems.org
/// client. Implementations must be `Send + Sync`.
#[async_trait]
pub trait LicenseRepository: Send + Sync {
    /// Fetches the raw license fields of a gem version
    ///
    /// # Returns
    /// `None` when the registry has no record of this name and version
    ///
    /// # Errors
    /// Returns an error when the registry could not be queried at all
    /// (I/O failure, network failure, malformed response)
    async fn fetch_license_info(
        &self,
        package_name: &str,
        version: &str,
    ) -> Result<Option<GemLicenseMetadata>>;

    /// Looks up the licenses of a gem version
    ///
    /// Combines the raw fields with the license priority rules.
    async fn lookup_licenses(&self, package_name: &str, version: &str) -> Result<LicenseLookup> {
        Ok(match self.fetch_license_info(package_name, version).await? {
            Some((license, licenses)) => LicenseLookup::Found(
                LicensePriority::merge(license, licenses).ids().to_vec(),
            ),
            None => LicenseLookup::NotFound,
        })
    }
}
