use super::{bom_version_one, ensure_schema, noassertion, normalize_licenses};
use crate::ports::outbound::SbomCodec;
use crate::sbom_generation::domain::{
    CdxComponent, CdxMetadata, CdxRootComponent, CdxTool, CreationInfo, CycloneDxDocument,
    ExternalRef, SbomDocument, SbomFormat, SpdxDocument, SpdxPackage,
};
use crate::sbom_generation::domain::cyclonedx_document::CYCLONEDX_SPEC_VERSION;
use crate::shared::Result;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::{Deserialize, Serialize};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const SPDX_NAMESPACE: &str = "https://spdx.org/spdxdocs/";
const CYCLONEDX_NAMESPACE_BASE: &str = "http://cyclonedx.org/schema/bom/";
const SPDX_ROOT: &str = "SpdxDocument";
const CYCLONEDX_ROOT: &str = "bom";
const CYCLONEDX_BOM_FORMAT: &str = "CycloneDX";

// SPDX layout

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename = "SpdxDocument")]
struct SpdxXml {
    #[serde(rename = "@xmlns", default)]
    xmlns: String,
    #[serde(rename = "SPDXID", default)]
    spdx_id: String,
    #[serde(rename = "spdxVersion", default)]
    spdx_version: String,
    #[serde(default)]
    name: String,
    #[serde(rename = "dataLicense", default)]
    data_license: String,
    #[serde(rename = "documentNamespace", default)]
    document_namespace: String,
    #[serde(rename = "creationInfo", default)]
    creation_info: CreationInfoXml,
    #[serde(rename = "documentDescribes", default)]
    document_describes: Vec<String>,
    #[serde(rename = "package", default)]
    packages: Vec<SpdxPackageXml>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CreationInfoXml {
    #[serde(default)]
    created: String,
    #[serde(rename = "licenseListVersion", default)]
    license_list_version: String,
    #[serde(rename = "creator", default)]
    creators: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SpdxPackageXml {
    #[serde(rename = "SPDXID", default)]
    spdx_id: String,
    #[serde(default)]
    name: String,
    #[serde(rename = "versionInfo", default)]
    version_info: String,
    #[serde(rename = "downloadLocation", default = "noassertion")]
    download_location: String,
    #[serde(rename = "filesAnalyzed", default)]
    files_analyzed: bool,
    #[serde(rename = "licenseConcluded", default = "noassertion")]
    license_concluded: String,
    #[serde(rename = "licenseDeclared", default = "noassertion")]
    license_declared: String,
    #[serde(rename = "copyrightText", default = "noassertion")]
    copyright_text: String,
    #[serde(default = "noassertion")]
    supplier: String,
    #[serde(rename = "externalRef", default)]
    external_refs: Vec<ExternalRefXml>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ExternalRefXml {
    #[serde(rename = "referenceCategory", default)]
    reference_category: String,
    #[serde(rename = "referenceType", default)]
    reference_type: String,
    #[serde(rename = "referenceLocator", default)]
    reference_locator: String,
}

// CycloneDX layout

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename = "bom")]
struct CycloneDxXml {
    #[serde(rename = "@xmlns", default)]
    xmlns: String,
    #[serde(rename = "@serialNumber", default)]
    serial_number: String,
    #[serde(rename = "@version", default = "bom_version_one")]
    version: u32,
    #[serde(default)]
    metadata: CdxMetadataXml,
    #[serde(default)]
    components: CdxComponentsXml,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CdxMetadataXml {
    #[serde(default)]
    timestamp: String,
    #[serde(default)]
    tools: CdxToolsXml,
    #[serde(default)]
    component: CdxRootComponentXml,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CdxToolsXml {
    #[serde(rename = "tool", default)]
    tool: Vec<CdxToolXml>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CdxToolXml {
    #[serde(default)]
    vendor: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    version: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CdxRootComponentXml {
    #[serde(rename = "@type", default)]
    component_type: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    version: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CdxComponentsXml {
    #[serde(rename = "component", default)]
    component: Vec<CdxComponentXml>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CdxComponentXml {
    #[serde(rename = "@type", default)]
    component_type: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    version: String,
    #[serde(default)]
    purl: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    licenses: Option<CdxLicensesXml>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CdxLicensesXml {
    #[serde(rename = "license", default)]
    license: Vec<CdxLicenseXml>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CdxLicenseXml {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

impl From<&SpdxDocument> for SpdxXml {
    fn from(doc: &SpdxDocument) -> Self {
        Self {
            xmlns: SPDX_NAMESPACE.to_string(),
            spdx_id: doc.id.clone(),
            spdx_version: doc.spdx_version.clone(),
            name: doc.name.clone(),
            data_license: doc.data_license.clone(),
            document_namespace: doc.document_namespace.clone(),
            creation_info: CreationInfoXml {
                created: doc.creation_info.created.clone(),
                license_list_version: doc.creation_info.license_list_version.clone(),
                creators: doc.creation_info.creators.clone(),
            },
            document_describes: doc.document_describes.clone(),
            packages: doc
                .packages
                .iter()
                .map(|p| SpdxPackageXml {
                    spdx_id: p.id.clone(),
                    name: p.name.clone(),
                    version_info: p.version_info.clone(),
                    download_location: p.download_location.clone(),
                    files_analyzed: p.files_analyzed,
                    license_concluded: p.license_concluded.clone(),
                    license_declared: p.license_declared.clone(),
                    copyright_text: p.copyright_text.clone(),
                    supplier: p.supplier.clone(),
                    external_refs: p
                        .external_refs
                        .iter()
                        .map(|r| ExternalRefXml {
                            reference_category: r.reference_category.clone(),
                            reference_type: r.reference_type.clone(),
                            reference_locator: r.reference_locator.clone(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

impl From<SpdxXml> for SpdxDocument {
    fn from(xml: SpdxXml) -> Self {
        Self {
            id: xml.spdx_id,
            spdx_version: xml.spdx_version,
            creation_info: CreationInfo {
                created: xml.creation_info.created,
                creators: xml.creation_info.creators,
                license_list_version: xml.creation_info.license_list_version,
            },
            name: xml.name,
            data_license: xml.data_license,
            document_namespace: xml.document_namespace,
            packages: xml
                .packages
                .into_iter()
                .map(|p| SpdxPackage {
                    id: p.spdx_id,
                    name: p.name,
                    version_info: p.version_info,
                    download_location: p.download_location,
                    files_analyzed: p.files_analyzed,
                    license_concluded: p.license_concluded,
                    license_declared: p.license_declared,
                    copyright_text: p.copyright_text,
                    supplier: p.supplier,
                    external_refs: p
                        .external_refs
                        .into_iter()
                        .map(|r| ExternalRef {
                            reference_category: r.reference_category,
                            reference_type: r.reference_type,
                            reference_locator: r.reference_locator,
                        })
                        .collect(),
                })
                .collect(),
            document_describes: xml.document_describes,
        }
    }
}

impl From<&CycloneDxDocument> for CycloneDxXml {
    fn from(doc: &CycloneDxDocument) -> Self {
        Self {
            xmlns: format!("{}{}", CYCLONEDX_NAMESPACE_BASE, doc.spec_version),
            serial_number: doc.serial_number.clone(),
            version: doc.version,
            metadata: CdxMetadataXml {
                timestamp: doc.metadata.timestamp.clone(),
                tools: CdxToolsXml {
                    tool: doc
                        .metadata
                        .tools
                        .iter()
                        .map(|t| CdxToolXml {
                            vendor: t.vendor.clone(),
                            name: t.name.clone(),
                            version: t.version.clone(),
                        })
                        .collect(),
                },
                component: CdxRootComponentXml {
                    component_type: doc.metadata.component.component_type.clone(),
                    name: doc.metadata.component.name.clone(),
                    version: doc.metadata.component.version.clone(),
                },
            },
            components: CdxComponentsXml {
                component: doc
                    .components
                    .iter()
                    .map(|c| CdxComponentXml {
                        component_type: c.component_type.clone(),
                        name: c.name.clone(),
                        version: c.version.clone(),
                        purl: c.purl.clone(),
                        licenses: c.licenses.as_ref().map(|ids| CdxLicensesXml {
                            license: ids
                                .iter()
                                .map(|id| CdxLicenseXml {
                                    id: Some(id.clone()),
                                    name: None,
                                })
                                .collect(),
                        }),
                    })
                    .collect(),
            },
        }
    }
}

impl From<CycloneDxXml> for CycloneDxDocument {
    fn from(xml: CycloneDxXml) -> Self {
        // The schema version travels in the namespace
        let spec_version = xml
            .xmlns
            .strip_prefix(CYCLONEDX_NAMESPACE_BASE)
            .filter(|version| !version.is_empty())
            .unwrap_or(CYCLONEDX_SPEC_VERSION)
            .to_string();

        Self {
            bom_format: CYCLONEDX_BOM_FORMAT.to_string(),
            spec_version,
            serial_number: xml.serial_number,
            version: xml.version,
            metadata: CdxMetadata {
                timestamp: xml.metadata.timestamp,
                tools: xml
                    .metadata
                    .tools
                    .tool
                    .into_iter()
                    .map(|t| CdxTool {
                        vendor: t.vendor,
                        name: t.name,
                        version: t.version,
                    })
                    .collect(),
                component: CdxRootComponent {
                    component_type: xml.metadata.component.component_type,
                    name: xml.metadata.component.name,
                    version: xml.metadata.component.version,
                },
            },
            components: xml
                .components
                .component
                .into_iter()
                .map(|c| CdxComponent {
                    component_type: c.component_type,
                    name: c.name,
                    version: c.version,
                    purl: c.purl,
                    licenses: c.licenses.and_then(|licenses| {
                        normalize_licenses(
                            licenses
                                .license
                                .into_iter()
                                .filter_map(|license| license.id.or(license.name))
                                .collect(),
                        )
                    }),
                })
                .collect(),
        }
    }
}

/// XmlCodec adapter: indented XML with a leading declaration
pub struct XmlCodec;

impl XmlCodec {
    pub fn new() -> Self {
        Self
    }

    fn serialize<T: Serialize>(value: &T) -> Result<String> {
        let mut body = String::new();
        let mut serializer = quick_xml::se::Serializer::new(&mut body);
        serializer.indent(' ', 2);
        value.serialize(serializer)?;
        Ok(format!("{}\n{}\n", XML_DECLARATION, body))
    }

    /// Identifies the schema by the name and namespace of the first element
    fn detect_schema(content: &str) -> Result<SbomFormat> {
        let mut reader = Reader::from_str(content);
        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                    let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                    let format = match name.as_str() {
                        SPDX_ROOT => SbomFormat::Spdx,
                        CYCLONEDX_ROOT => SbomFormat::CycloneDx,
                        other => anyhow::bail!(
                            "Unrecognized root element <{}>; expected <{}> or <{}>",
                            other,
                            SPDX_ROOT,
                            CYCLONEDX_ROOT
                        ),
                    };
                    let namespace = Self::root_namespace(&e)?.unwrap_or_default();
                    let matches = match format {
                        SbomFormat::Spdx => namespace == SPDX_NAMESPACE,
                        SbomFormat::CycloneDx => namespace.starts_with(CYCLONEDX_NAMESPACE_BASE),
                    };
                    if !matches {
                        anyhow::bail!(
                            "Unrecognized namespace '{}' on root element <{}>",
                            namespace,
                            name
                        );
                    }
                    return Ok(format);
                }
                Ok(Event::Eof) => anyhow::bail!("Invalid XML: no root element"),
                Ok(_) => {}
                Err(e) => anyhow::bail!(
                    "Invalid XML at position {}: {}",
                    reader.error_position(),
                    e
                ),
            }
        }
    }

    /// Namespace bound to the root element's own prefix, if declared on it
    fn root_namespace(element: &BytesStart<'_>) -> Result<Option<String>> {
        let key = match element.name().prefix() {
            Some(prefix) => format!("xmlns:{}", String::from_utf8_lossy(prefix.as_ref())),
            None => "xmlns".to_string(),
        };
        let attribute = element.try_get_attribute(key.as_str())?;
        Ok(attribute.map(|a| String::from_utf8_lossy(&a.value).into_owned()))
    }
}

impl Default for XmlCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl SbomCodec for XmlCodec {
    fn encode(&self, document: &SbomDocument) -> Result<String> {
        match document {
            SbomDocument::Spdx(doc) => Self::serialize(&SpdxXml::from(doc)),
            SbomDocument::CycloneDx(doc) => Self::serialize(&CycloneDxXml::from(doc)),
        }
    }

    fn decode(&self, content: &str, schema: Option<SbomFormat>) -> Result<SbomDocument> {
        let found = Self::detect_schema(content)?;
        ensure_schema(schema, found)?;

        let document = match found {
            SbomFormat::Spdx => {
                let xml: SpdxXml = quick_xml::de::from_str(content)
                    .map_err(|e| anyhow::anyhow!("Invalid SPDX document: {}", e))?;
                SbomDocument::Spdx(xml.into())
            }
            SbomFormat::CycloneDx => {
                let xml: CycloneDxXml = quick_xml::de::from_str(content)
                    .map_err(|e| anyhow::anyhow!("Invalid CycloneDX document: {}", e))?;
                SbomDocument::CycloneDx(xml.into())
            }
        };
        Ok(document)
    }
}
