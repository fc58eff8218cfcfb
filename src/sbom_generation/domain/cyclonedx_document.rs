use super::license_info::{LicensedPackage, LICENSE_SEPARATOR, NOASSERTION};
use super::license_report::ReportEntry;
use super::sbom_document::SbomSchema;
use super::sbom_metadata::SbomMetadata;

pub const BOM_FORMAT: &str = "CycloneDX";
pub const CYCLONEDX_SPEC_VERSION: &str = "1.4";
pub const TOOL_VENDOR: &str = "Bundler";
pub const ROOT_COMPONENT_TYPE: &str = "application";
pub const ROOT_COMPONENT_VERSION: &str = "0.0.0";
pub const LIBRARY_COMPONENT_TYPE: &str = "library";

/// CycloneDX 1.4 "component-graph" document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycloneDxDocument {
    pub bom_format: String,
    pub spec_version: String,
    pub serial_number: String,
    pub version: u32,
    pub metadata: CdxMetadata,
    pub components: Vec<CdxComponent>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CdxMetadata {
    pub timestamp: String,
    pub tools: Vec<CdxTool>,
    pub component: CdxRootComponent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CdxTool {
    pub vendor: String,
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CdxRootComponent {
    pub component_type: String,
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CdxComponent {
    pub component_type: String,
    pub name: String,
    pub version: String,
    pub purl: String,
    /// License ids; `None` when nothing was resolved, never `Some(vec![])`
    pub licenses: Option<Vec<String>>,
}

impl CdxComponent {
    fn from_licensed(licensed: &LicensedPackage) -> Self {
        let package = licensed.package();
        let licenses = licensed.licenses();
        Self {
            component_type: LIBRARY_COMPONENT_TYPE.to_string(),
            name: package.name().to_string(),
            version: package.version().to_string(),
            purl: package.purl(),
            licenses: if licenses.is_empty() {
                None
            } else {
                Some(licenses.ids().to_vec())
            },
        }
    }

    pub fn license_declared(&self) -> String {
        match &self.licenses {
            Some(ids) if !ids.is_empty() => ids.join(LICENSE_SEPARATOR),
            _ => NOASSERTION.to_string(),
        }
    }
}

impl SbomSchema for CycloneDxDocument {
    fn build(packages: &[LicensedPackage], metadata: &SbomMetadata) -> Self {
        Self {
            bom_format: BOM_FORMAT.to_string(),
            spec_version: CYCLONEDX_SPEC_VERSION.to_string(),
            serial_number: metadata.serial_number(),
            version: 1,
            metadata: CdxMetadata {
                timestamp: metadata.timestamp().to_string(),
                tools: vec![CdxTool {
                    vendor: TOOL_VENDOR.to_string(),
                    name: metadata.tool_name().to_string(),
                    version: metadata.tool_version().to_string(),
                }],
                component: CdxRootComponent {
                    component_type: ROOT_COMPONENT_TYPE.to_string(),
                    name: metadata.document_name().to_string(),
                    version: ROOT_COMPONENT_VERSION.to_string(),
                },
            },
            components: packages.iter().map(CdxComponent::from_licensed).collect(),
        }
    }

    fn to_report_entries(&self) -> Vec<ReportEntry> {
        self.components
            .iter()
            .map(|c| ReportEntry::new(c.name.clone(), c.version.clone(), c.license_declared()))
            .collect()
    }

    fn package_count(&self) -> usize {
        self.components.len()
    }
}
