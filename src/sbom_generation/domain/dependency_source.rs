use super::Package;
use std::collections::{BTreeSet, HashSet};

/// Group every gem belongs to when the Gemfile does not name one
pub const DEFAULT_GROUP: &str = "default";

/// One entry of the resolver output: a package plus the Gemfile groups it is reachable from
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedDependency {
    package: Package,
    groups: BTreeSet<String>,
}

impl ResolvedDependency {
    pub fn new<I>(package: Package, groups: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            package,
            groups: groups.into_iter().collect(),
        }
    }

    /// A dependency without group information
    pub fn ungrouped(package: Package) -> Self {
        Self {
            package,
            groups: BTreeSet::new(),
        }
    }

    pub fn package(&self) -> &Package {
        &self.package
    }

    pub fn groups(&self) -> &BTreeSet<String> {
        &self.groups
    }
}

/// DependencySource aggregate: the resolver snapshot a document is built from
///
/// Entries keep lockfile order and may repeat an identity (platform variants).
#[derive(Debug, Clone, PartialEq)]
pub struct DependencySource {
    dependencies: Vec<ResolvedDependency>,
    group_metadata_available: bool,
}

impl DependencySource {
    pub fn new(dependencies: Vec<ResolvedDependency>, group_metadata_available: bool) -> Self {
        Self {
            dependencies,
            group_metadata_available,
        }
    }

    /// A snapshot without any Gemfile group information
    pub fn without_groups(packages: Vec<Package>) -> Self {
        Self {
            dependencies: packages.into_iter().map(ResolvedDependency::ungrouped).collect(),
            group_metadata_available: false,
        }
    }

    pub fn dependencies(&self) -> &[ResolvedDependency] {
        &self.dependencies
    }

    pub fn has_group_metadata(&self) -> bool {
        self.group_metadata_available
    }

    pub fn len(&self) -> usize {
        self.dependencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }

    /// Collapses repeated `(name, version)` identities, keeping the first occurrence
    ///
    /// Group sets of collapsed duplicates are merged into the surviving entry.
    pub fn deduplicated(&self) -> Vec<ResolvedDependency> {
        let mut seen: HashSet<&Package> = HashSet::new();
        let mut unique: Vec<ResolvedDependency> = Vec::new();

        for dependency in &self.dependencies {
            if seen.insert(dependency.package()) {
                unique.push(dependency.clone());
            } else if let Some(existing) = unique
                .iter_mut()
                .find(|d| d.package() == dependency.package())
            {
                existing.groups.extend(dependency.groups.iter().cloned());
            }
        }

        unique
    }
}
