use async_trait::async_trait;
use bundle_sbom::ports::outbound::GemLicenseMetadata;
use bundle_sbom::prelude::*;
use std::collections::HashMap;

/// Mock LicenseRepository for testing
///
/// Unregistered gems are unknown to the registry.
pub struct MockLicenseRepository {
    pub licenses: HashMap<String, GemLicenseMetadata>,
    pub failing: Vec<String>,
}

impl MockLicenseRepository {
    pub fn new() -> Self {
        Self {
            licenses: HashMap::new(),
            failing: Vec::new(),
        }
    }

    pub fn with_license(mut self, package: &str, version: &str, license: &str) -> Self {
        self.licenses.insert(
            format!("{}@{}", package, version),
            (Some(license.to_string()), vec![]),
        );
        self
    }

    pub fn with_licenses(mut self, package: &str, version: &str, licenses: &[&str]) -> Self {
        self.licenses.insert(
            format!("{}@{}", package, version),
            (None, licenses.iter().map(|l| l.to_string()).collect()),
        );
        self
    }

    pub fn with_failure(mut self, package: &str) -> Self {
        self.failing.push(package.to_string());
        self
    }
}

impl Default for MockLicenseRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LicenseRepository for MockLicenseRepository {
    async fn fetch_license_info(
        &self,
        package_name: &str,
        version: &str,
    ) -> Result<Option<GemLicenseMetadata>> {
        if self.failing.iter().any(|p| p == package_name) {
            anyhow::bail!("Mock license repository failure");
        }

        let key = format!("{}@{}", package_name, version);
        Ok(self.licenses.get(&key).cloned())
    }
}
