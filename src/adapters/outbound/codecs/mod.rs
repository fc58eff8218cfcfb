/// Codec adapters: one per document encoding
mod json_codec;
mod xml_codec;

pub use json_codec::JsonCodec;
pub use xml_codec::XmlCodec;

use crate::sbom_generation::domain::{SbomFormat, NOASSERTION};
use crate::shared::Result;

/// Rejects content whose schema contradicts an explicit selection
fn ensure_schema(expected: Option<SbomFormat>, found: SbomFormat) -> Result<()> {
    match expected {
        Some(expected) if expected != found => anyhow::bail!(
            "Expected a {} document but the content is {}",
            expected.label(),
            found.label()
        ),
        _ => Ok(()),
    }
}

fn noassertion() -> String {
    NOASSERTION.to_string()
}

fn bom_version_one() -> u32 {
    1
}

/// Absent and empty license lists both mean "no license resolved"
fn normalize_licenses(ids: Vec<String>) -> Option<Vec<String>> {
    if ids.is_empty() {
        None
    } else {
        Some(ids)
    }
}
