use super::group_filter::GroupFilter;
use crate::sbom_generation::domain::{
    DependencySource, LicensedPackage, Package, SbomDocument, SbomFormat, SbomMetadata,
};

/// Dependencies chosen for a document, plus what happened along the way
#[derive(Debug, Clone, PartialEq)]
pub struct DependencySelection {
    pub packages: Vec<Package>,
    /// Number of unique dependencies dropped by the group filter
    pub excluded_count: usize,
    /// Groups were requested to be skipped but no group metadata exists
    pub group_filter_skipped: bool,
}

/// DocumentBuilder service: turns resolved dependencies into a document
///
/// License lookup happens between `select_dependencies` and `assemble`,
/// since it needs a repository.
pub struct DocumentBuilder;

impl DocumentBuilder {
    /// Deduplicates by (name, version) then applies the group filter
    pub fn select_dependencies(
        source: &DependencySource,
        filter: &GroupFilter,
    ) -> DependencySelection {
        let unique = source.deduplicated();
        let unique_count = unique.len();

        if filter.is_empty() {
            return DependencySelection {
                packages: unique.into_iter().map(|d| d.package().clone()).collect(),
                excluded_count: 0,
                group_filter_skipped: false,
            };
        }

        if !source.has_group_metadata() {
            return DependencySelection {
                packages: unique.into_iter().map(|d| d.package().clone()).collect(),
                excluded_count: 0,
                group_filter_skipped: true,
            };
        }

        let kept = filter.filter_dependencies(unique);
        DependencySelection {
            excluded_count: unique_count - kept.len(),
            packages: kept.into_iter().map(|d| d.package().clone()).collect(),
            group_filter_skipped: false,
        }
    }

    pub fn assemble(
        format: SbomFormat,
        packages: &[LicensedPackage],
        metadata: &SbomMetadata,
    ) -> SbomDocument {
        SbomDocument::build(format, packages, metadata)
    }
}
