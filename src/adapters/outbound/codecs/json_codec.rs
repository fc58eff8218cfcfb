use super::{bom_version_one, ensure_schema, noassertion, normalize_licenses};
use crate::ports::outbound::SbomCodec;
use crate::sbom_generation::domain::{
    CdxComponent, CdxMetadata, CdxRootComponent, CdxTool, CreationInfo, CycloneDxDocument,
    ExternalRef, SbomDocument, SbomFormat, SpdxDocument, SpdxPackage,
};
use crate::shared::Result;
use serde::{Deserialize, Serialize};

const CYCLONEDX_BOM_FORMAT: &str = "CycloneDX";

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpdxJson {
    #[serde(rename = "SPDXID", default)]
    spdx_id: String,
    #[serde(default)]
    spdx_version: String,
    #[serde(default)]
    creation_info: CreationInfoJson,
    #[serde(default)]
    name: String,
    #[serde(default)]
    data_license: String,
    #[serde(default)]
    document_namespace: String,
    packages: Vec<SpdxPackageJson>,
    #[serde(default)]
    document_describes: Vec<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreationInfoJson {
    #[serde(default)]
    created: String,
    #[serde(default)]
    creators: Vec<String>,
    #[serde(default)]
    license_list_version: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpdxPackageJson {
    #[serde(rename = "SPDXID", default)]
    spdx_id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    version_info: String,
    #[serde(default = "noassertion")]
    download_location: String,
    #[serde(default)]
    files_analyzed: bool,
    #[serde(default = "noassertion")]
    license_concluded: String,
    #[serde(default = "noassertion")]
    license_declared: String,
    #[serde(default = "noassertion")]
    copyright_text: String,
    #[serde(default = "noassertion")]
    supplier: String,
    #[serde(default)]
    external_refs: Vec<ExternalRefJson>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExternalRefJson {
    #[serde(default)]
    reference_category: String,
    #[serde(default)]
    reference_type: String,
    #[serde(default)]
    reference_locator: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CycloneDxJson {
    bom_format: String,
    #[serde(default)]
    spec_version: String,
    #[serde(default)]
    serial_number: String,
    #[serde(default = "bom_version_one")]
    version: u32,
    #[serde(default)]
    metadata: CdxMetadataJson,
    #[serde(default)]
    components: Vec<CdxComponentJson>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CdxMetadataJson {
    #[serde(default)]
    timestamp: String,
    #[serde(default)]
    tools: Vec<CdxToolJson>,
    #[serde(default)]
    component: CdxRootComponentJson,
}

#[derive(Debug, Serialize, Deserialize)]
struct CdxToolJson {
    #[serde(default)]
    vendor: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    version: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CdxRootComponentJson {
    #[serde(rename = "type", default)]
    component_type: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    version: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct CdxComponentJson {
    #[serde(rename = "type", default)]
    component_type: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    version: String,
    #[serde(default)]
    purl: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    licenses: Option<Vec<CdxLicenseChoiceJson>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CdxLicenseChoiceJson {
    license: CdxLicenseJson,
}

/// Written with `id`; `name` is accepted on input for hand-made documents
#[derive(Debug, Serialize, Deserialize)]
struct CdxLicenseJson {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

impl From<&SpdxDocument> for SpdxJson {
    fn from(doc: &SpdxDocument) -> Self {
        Self {
            spdx_id: doc.id.clone(),
            spdx_version: doc.spdx_version.clone(),
            creation_info: CreationInfoJson {
                created: doc.creation_info.created.clone(),
                creators: doc.creation_info.creators.clone(),
                license_list_version: doc.creation_info.license_list_version.clone(),
            },
            name: doc.name.clone(),
            data_license: doc.data_license.clone(),
            document_namespace: doc.document_namespace.clone(),
            packages: doc
                .packages
                .iter()
                .map(|p| SpdxPackageJson {
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
                        .map(|r| ExternalRefJson {
                            reference_category: r.reference_category.clone(),
                            reference_type: r.reference_type.clone(),
                            reference_locator: r.reference_locator.clone(),
                        })
                        .collect(),
                })
                .collect(),
            document_describes: doc.document_describes.clone(),
        }
    }
}

impl From<SpdxJson> for SpdxDocument {
    fn from(json: SpdxJson) -> Self {
        Self {
            id: json.spdx_id,
            spdx_version: json.spdx_version,
            creation_info: CreationInfo {
                created: json.creation_info.created,
                creators: json.creation_info.creators,
                license_list_version: json.creation_info.license_list_version,
            },
            name: json.name,
            data_license: json.data_license,
            document_namespace: json.document_namespace,
            packages: json
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
            document_describes: json.document_describes,
        }
    }
}

impl From<&CycloneDxDocument> for CycloneDxJson {
    fn from(doc: &CycloneDxDocument) -> Self {
        Self {
            bom_format: doc.bom_format.clone(),
            spec_version: doc.spec_version.clone(),
            serial_number: doc.serial_number.clone(),
            version: doc.version,
            metadata: CdxMetadataJson {
                timestamp: doc.metadata.timestamp.clone(),
                tools: doc
                    .metadata
                    .tools
                    .iter()
                    .map(|t| CdxToolJson {
                        vendor: t.vendor.clone(),
                        name: t.name.clone(),
                        version: t.version.clone(),
                    })
                    .collect(),
                component: CdxRootComponentJson {
                    component_type: doc.metadata.component.component_type.clone(),
                    name: doc.metadata.component.name.clone(),
                    version: doc.metadata.component.version.clone(),
                },
            },
            components: doc
                .components
                .iter()
                .map(|c| CdxComponentJson {
                    component_type: c.component_type.clone(),
                    name: c.name.clone(),
                    version: c.version.clone(),
                    purl: c.purl.clone(),
                    licenses: c.licenses.as_ref().map(|ids| {
                        ids.iter()
                            .map(|id| CdxLicenseChoiceJson {
                                license: CdxLicenseJson {
                                    id: Some(id.clone()),
                                    name: None,
                                },
                            })
                            .collect()
                    }),
                })
                .collect(),
        }
    }
}

impl From<CycloneDxJson> for CycloneDxDocument {
    fn from(json: CycloneDxJson) -> Self {
        Self {
            bom_format: json.bom_format,
            spec_version: json.spec_version,
            serial_number: json.serial_number,
            version: json.version,
            metadata: CdxMetadata {
                timestamp: json.metadata.timestamp,
                tools: json
                    .metadata
                    .tools
                    .into_iter()
                    .map(|t| CdxTool {
                        vendor: t.vendor,
                        name: t.name,
                        version: t.version,
                    })
                    .collect(),
                component: CdxRootComponent {
                    component_type: json.metadata.component.component_type,
                    name: json.metadata.component.name,
                    version: json.metadata.component.version,
                },
            },
            components: json
                .components
                .into_iter()
                .map(|c| CdxComponent {
                    component_type: c.component_type,
                    name: c.name,
                    version: c.version,
                    purl: c.purl,
                    licenses: c.licenses.and_then(|choices| {
                        normalize_licenses(
                            choices
                                .into_iter()
                                .filter_map(|choice| choice.license.id.or(choice.license.name))
                                .collect(),
                        )
                    }),
                })
                .collect(),
        }
    }
}

/// JsonCodec adapter: pretty-printed JSON, keys in document order
pub struct JsonCodec;

impl JsonCodec {
    pub fn new() -> Self {
        Self
    }

    /// CycloneDX when `bomFormat` says so, SPDX otherwise
    fn detect_schema(value: &serde_json::Value) -> SbomFormat {
        match value.get("bomFormat").and_then(|v| v.as_str()) {
            Some(CYCLONEDX_BOM_FORMAT) => SbomFormat::CycloneDx,
            _ => SbomFormat::Spdx,
        }
    }
}

impl Default for JsonCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl SbomCodec for JsonCodec {
    fn encode(&self, document: &SbomDocument) -> Result<String> {
        let json = match document {
            SbomDocument::Spdx(doc) => serde_json::to_string_pretty(&SpdxJson::from(doc))?,
            SbomDocument::CycloneDx(doc) => {
                serde_json::to_string_pretty(&CycloneDxJson::from(doc))?
            }
        };
        Ok(json)
    }

    fn decode(&self, content: &str, schema: Option<SbomFormat>) -> Result<SbomDocument> {
        let value: serde_json::Value = serde_json::from_str(content)
            .map_err(|e| anyhow::anyhow!("Invalid JSON: {}", e))?;

        let found = Self::detect_schema(&value);
        ensure_schema(schema, found)?;

        let document = match found {
            SbomFormat::Spdx => {
                let json: SpdxJson = serde_json::from_value(value)
                    .map_err(|e| anyhow::anyhow!("Invalid SPDX document: {}", e))?;
                SbomDocument::Spdx(json.into())
            }
            SbomFormat::CycloneDx => {
                let json: CycloneDxJson = serde_json::from_value(value)
                    .map_err(|e| anyhow::anyhow!("Invalid CycloneDX document: {}", e))?;
                SbomDocument::CycloneDx(json.into())
            }
        };
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sbom_generation::domain::{
        LicenseSet, LicensedPackage, Package, SbomMetadata, NOASSERTION,
    };

    fn sample(format: SbomFormat) -> SbomDocument {
        let metadata = SbomMetadata::new(
            "2024-05-01T12:00:00Z".to_string(),
            "bundle-sbom".to_string(),
            "0.3.0".to_string(),
            "0b6f8a2c-4d0f-4a6e-9a55-2f3b6c9d1e77".to_string(),
            "my-app".to_string(),
        );
        let packages = vec![
            LicensedPackage::new(
                Package::new("json".to_string(), "2.6.3".to_string()).unwrap(),
                LicenseSet::new(vec!["Ruby".to_string(), "BSD-2-Clause".to_string()]),
            ),
            LicensedPackage::new(
                Package::new("internal".to_string(), "0.1.0".to_string()).unwrap(),
                LicenseSet::default(),
            ),
        ];
        SbomDocument::build(format, &packages, &metadata)
    }

    #[test]
    fn test_spdx_round_trip() {
        let codec = JsonCodec::new();
        let doc = sample(SbomFormat::Spdx);
        let decoded = codec.decode(&codec.encode(&doc).unwrap(), None).unwrap();
        assert_eq!(decoded, doc);
    }

    #[test]
    fn test_cyclonedx_round_trip() {
        let codec = JsonCodec::new();
        let doc = sample(SbomFormat::CycloneDx);
        let decoded = codec.decode(&codec.encode(&doc).unwrap(), None).unwrap();
        assert_eq!(decoded, doc);
    }

    #[test]
    fn test_spdx_key_order() {
        let json = JsonCodec::new().encode(&sample(SbomFormat::Spdx)).unwrap();
        let positions: Vec<usize> = [
            "\"SPDXID\"",
            "\"spdxVersion\"",
            "\"creationInfo\"",
            "\"name\"",
            "\"dataLicense\"",
            "\"documentNamespace\"",
            "\"packages\"",
            "\"documentDescribes\"",
        ]
        .iter()
        .map(|key| json.find(key).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(json.contains("\n  \"spdxVersion\": \"SPDX-2.3\""));
    }

    #[test]
    fn test_cyclonedx_omits_absent_licenses() {
        let json = JsonCodec::new().encode(&sample(SbomFormat::CycloneDx)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["bomFormat"], "CycloneDX");
        assert_eq!(value["specVersion"], "1.4");
        assert_eq!(value["version"], 1);
        assert_eq!(value["metadata"]["tools"][0]["vendor"], "Bundler");
        assert_eq!(value["metadata"]["component"]["type"], "application");
        assert_eq!(
            value["components"][0]["licenses"][1]["license"]["id"],
            "BSD-2-Clause"
        );
        assert!(value["components"][1].get("licenses").is_none());
    }

    #[test]
    fn test_decode_minimal_spdx() {
        let content = r#"{"packages": [{"name": "rack", "versionInfo": "3.0.8", "licenseDeclared": "MIT"}]}"#;

        let doc = JsonCodec::new().decode(content, None).unwrap();

        match doc {
            SbomDocument::Spdx(spdx) => {
                assert_eq!(spdx.packages[0].license_declared, "MIT");
                assert_eq!(spdx.packages[0].supplier, NOASSERTION);
                assert!(spdx.name.is_empty());
            }
            SbomDocument::CycloneDx(_) => panic!("expected SPDX"),
        }
    }

    #[test]
    fn test_decode_spdx_without_packages_fails() {
        let err = JsonCodec::new()
            .decode(r#"{"spdxVersion": "SPDX-2.3"}"#, None)
            .unwrap_err();
        assert!(err.to_string().contains("packages"));
    }

    #[test]
    fn test_decode_empty_license_list_is_absent() {
        let content = r#"{"bomFormat": "CycloneDX", "components": [
            {"type": "library", "name": "x", "version": "1", "purl": "pkg:gem/x@1", "licenses": []}
        ]}"#;

        match JsonCodec::new().decode(content, None).unwrap() {
            SbomDocument::CycloneDx(doc) => assert_eq!(doc.components[0].licenses, None),
            SbomDocument::Spdx(_) => panic!("expected CycloneDX"),
        }
    }

    #[test]
    fn test_decode_license_name_fallback() {
        let content = r#"{"bomFormat": "CycloneDX", "components": [
            {"type": "library", "name": "x", "version": "1",
             "licenses": [{"license": {"name": "Custom License"}}]}
        ]}"#;

        match JsonCodec::new().decode(content, None).unwrap() {
            SbomDocument::CycloneDx(doc) => assert_eq!(
                doc.components[0].licenses,
                Some(vec!["Custom License".to_string()])
            ),
            SbomDocument::Spdx(_) => panic!("expected CycloneDX"),
        }
    }

    #[test]
    fn test_decode_schema_mismatch() {
        let codec = JsonCodec::new();
        let json = codec.encode(&sample(SbomFormat::CycloneDx)).unwrap();

        let err = codec.decode(&json, Some(SbomFormat::Spdx)).unwrap_err();
        assert!(err.to_string().contains("Expected a SPDX document"));
    }

    #[test]
    fn test_decode_malformed_json() {
        let err = JsonCodec::new().decode("{ not json", None).unwrap_err();
        assert!(err.to_string().contains("Invalid JSON"));
    }
}
