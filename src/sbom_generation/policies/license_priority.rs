use crate::sbom_generation::domain::LicenseSet;

/// LicensePriority policy for combining the license fields a gem declares
///
/// Gem metadata carries a singular `license` and a plural `licenses` field.
/// Either may be missing or blank, and the plural list often repeats the
/// singular value.
///
/// Priority order:
/// 1. `license` (if non-empty)
/// 2. each entry of `licenses`, in declaration order
///
/// Duplicates keep their first position.
pub struct LicensePriority;

impl LicensePriority {
    /// Merges both fields into one ordered, deduplicated set
    ///
    /// # Arguments
    /// * `license` - Singular license field
    /// * `licenses` - Plural license list
    pub fn merge(license: Option<String>, licenses: Vec<String>) -> LicenseSet {
        LicenseSet::new(license.into_iter().chain(licenses))
    }
}
