use super::license_info::{LicensedPackage, NOASSERTION};
use super::license_report::ReportEntry;
use super::sbom_document::SbomSchema;
use super::sbom_metadata::SbomMetadata;
use std::collections::HashSet;

pub const SPDX_DOCUMENT_ID: &str = "SPDXRef-DOCUMENT";
pub const SPDX_VERSION: &str = "SPDX-2.3";
pub const SPDX_DATA_LICENSE: &str = "CC0-1.0";
pub const SPDX_LICENSE_LIST_VERSION: &str = "3.20";
pub const SPDX_NAMESPACE_BASE: &str = "https://spdx.org/spdxdocs/";
pub const SPDX_PACKAGE_ID_PREFIX: &str = "SPDXRef-Package-";
pub const PACKAGE_MANAGER_CATEGORY: &str = "PACKAGE_MANAGER";
pub const PURL_REFERENCE_TYPE: &str = "purl";

/// SPDX 2.3 "manifest" document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpdxDocument {
    pub id: String,
    pub spdx_version: String,
    pub creation_info: CreationInfo,
    pub name: String,
    pub data_license: String,
    pub document_namespace: String,
    pub packages: Vec<SpdxPackage>,
    pub document_describes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreationInfo {
    pub created: String,
    pub creators: Vec<String>,
    pub license_list_version: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpdxPackage {
    pub id: String,
    pub name: String,
    pub version_info: String,
    pub download_location: String,
    pub files_analyzed: bool,
    pub license_concluded: String,
    pub license_declared: String,
    pub copyright_text: String,
    pub supplier: String,
    pub external_refs: Vec<ExternalRef>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalRef {
    pub reference_category: String,
    pub reference_type: String,
    pub reference_locator: String,
}

impl ExternalRef {
    pub fn purl(locator: String) -> Self {
        Self {
            reference_category: PACKAGE_MANAGER_CATEGORY.to_string(),
            reference_type: PURL_REFERENCE_TYPE.to_string(),
            reference_locator: locator,
        }
    }
}

impl SpdxPackage {
    fn from_licensed(licensed: &LicensedPackage, id: String) -> Self {
        let package = licensed.package();
        let declared = licensed.licenses().declared();
        Self {
            id,
            name: package.name().to_string(),
            version_info: package.version().to_string(),
            download_location: NOASSERTION.to_string(),
            files_analyzed: false,
            license_concluded: declared.clone(),
            license_declared: declared,
            copyright_text: NOASSERTION.to_string(),
            supplier: NOASSERTION.to_string(),
            external_refs: vec![ExternalRef::purl(package.purl())],
        }
    }
}

/// `SPDXRef-Package-<name>`, extended with the version when the name is already taken
fn unique_package_id(name: &str, version: &str, taken: &mut HashSet<String>) -> String {
    let base = format!("{}{}", SPDX_PACKAGE_ID_PREFIX, name);
    let mut candidate = base.clone();
    if taken.contains(&candidate) {
        candidate = format!("{}-{}", base, version);
    }
    let mut suffix = 2;
    while taken.contains(&candidate) {
        candidate = format!("{}-{}-{}", base, version, suffix);
        suffix += 1;
    }
    taken.insert(candidate.clone());
    candidate
}

impl SbomSchema for SpdxDocument {
    fn build(packages: &[LicensedPackage], metadata: &SbomMetadata) -> Self {
        let mut taken = HashSet::new();
        let packages: Vec<SpdxPackage> = packages
            .iter()
            .map(|licensed| {
                let id = unique_package_id(
                    licensed.package().name(),
                    licensed.package().version(),
                    &mut taken,
                );
                SpdxPackage::from_licensed(licensed, id)
            })
            .collect();
        let document_describes = packages.iter().map(|p| p.id.clone()).collect();

        Self {
            id: SPDX_DOCUMENT_ID.to_string(),
            spdx_version: SPDX_VERSION.to_string(),
            creation_info: CreationInfo {
                created: metadata.timestamp().to_string(),
                creators: vec![format!("Tool: {}", metadata.tool_name())],
                license_list_version: SPDX_LICENSE_LIST_VERSION.to_string(),
            },
            name: metadata.document_name().to_string(),
            data_license: SPDX_DATA_LICENSE.to_string(),
            document_namespace: format!(
                "{}{}-{}",
                SPDX_NAMESPACE_BASE,
                metadata.document_name(),
                metadata.document_id()
            ),
            packages,
            document_describes,
        }
    }

    fn to_report_entries(&self) -> Vec<ReportEntry> {
        self.packages
            .iter()
            .map(|p| {
                ReportEntry::new(
                    p.name.clone(),
                    p.version_info.clone(),
                    p.license_declared.clone(),
                )
            })
            .collect()
    }

    fn package_count(&self) -> usize {
        self.packages.len()
    }
}
