use crate::sbom_generation::domain::DEFAULT_GROUP;
use std::collections::{BTreeSet, HashMap, HashSet};

/// Group membership of every gem reachable from the Gemfile
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupResolution {
    groups: HashMap<String, BTreeSet<String>>,
    truncated: bool,
}

impl GroupResolution {
    /// Groups a gem belongs to; empty when it is unreachable from any top-level gem
    pub fn groups_of(&self, name: &str) -> BTreeSet<String> {
        self.groups.get(name).cloned().unwrap_or_default()
    }

    /// True when some dependency chain exceeded the depth limit
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

/// GroupResolver service for propagating Gemfile groups through the lockfile
///
/// A gem pulled in by a top-level gem inherits every group of that gem. Pure
/// logic, no I/O.
pub struct GroupResolver;

impl GroupResolver {
    /// Maximum recursion depth to prevent stack overflow on malicious lockfiles
    pub const MAX_RECURSION_DEPTH: usize = 100;

    /// Resolves group membership for all gems reachable from `top_level`
    ///
    /// # Arguments
    /// * `top_level` - Gem names listed in the lockfile's DEPENDENCIES section
    /// * `declared_groups` - Groups per gem as declared in the Gemfile
    /// * `dependency_map` - Map of gem name to the names it depends on
    ///
    /// Top-level gems missing from `declared_groups` belong to the default group.
    pub fn resolve(
        top_level: &[String],
        declared_groups: &HashMap<String, BTreeSet<String>>,
        dependency_map: &HashMap<String, Vec<String>>,
    ) -> GroupResolution {
        let mut resolution = GroupResolution::default();

        for gem in top_level {
            let groups = declared_groups
                .get(gem)
                .filter(|g| !g.is_empty())
                .cloned()
                .unwrap_or_else(|| BTreeSet::from([DEFAULT_GROUP.to_string()]));

            let mut visited = HashSet::new();
            Self::propagate(gem, &groups, dependency_map, &mut visited, &mut resolution, 0);
        }

        resolution
    }

    fn propagate(
        gem: &str,
        groups: &BTreeSet<String>,
        dependency_map: &HashMap<String, Vec<String>>,
        visited: &mut HashSet<String>,
        resolution: &mut GroupResolution,
        depth: usize,
    ) {
        if depth >= Self::MAX_RECURSION_DEPTH {
            resolution.truncated = true;
            return;
        }

        if !visited.insert(gem.to_string()) {
            return;
        }

        resolution
            .groups
            .entry(gem.to_string())
            .or_default()
            .extend(groups.iter().cloned());

        if let Some(dependencies) = dependency_map.get(gem) {
            for dep in dependencies {
                Self::propagate(dep, groups, dependency_map, visited, resolution, depth + 1);
            }
        }
    }
}
