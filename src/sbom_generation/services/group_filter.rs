use crate::sbom_generation::domain::ResolvedDependency;
use crate::shared::Result;
use std::collections::BTreeSet;

/// Maximum number of excluded groups to prevent DoS attacks
const MAX_EXCLUDED_GROUPS: usize = 64;

/// Maximum length of a single group name
const MAX_GROUP_NAME_LENGTH: usize = 255;

/// GroupFilter - Drops dependencies that only belong to excluded Bundler groups
///
/// A dependency survives when at least one of its groups is not excluded.
/// Dependencies with no known group membership are kept.
#[derive(Debug)]
pub struct GroupFilter {
    excluded: BTreeSet<String>,
}

impl GroupFilter {
    /// Creates a new GroupFilter from raw group names
    ///
    /// # Errors
    /// - Too many groups (> MAX_EXCLUDED_GROUPS)
    /// - Empty, overlong or non `[A-Za-z0-9_-]` group names
    pub fn new(groups: Vec<String>) -> Result<Self> {
        if groups.len() > MAX_EXCLUDED_GROUPS {
            anyhow::bail!(
                "Too many excluded groups: {} (maximum: {})",
                groups.len(),
                MAX_EXCLUDED_GROUPS
            );
        }

        let mut excluded = BTreeSet::new();
        for group in groups {
            let group = group.trim().trim_start_matches(':').to_string();
            Self::validate(&group)?;
            excluded.insert(group);
        }

        Ok(Self { excluded })
    }

    fn validate(group: &str) -> Result<()> {
        if group.is_empty() {
            anyhow::bail!("Group name cannot be empty");
        }
        if group.len() > MAX_GROUP_NAME_LENGTH {
            anyhow::bail!(
                "Group name too long: {} characters (maximum: {})",
                group.len(),
                MAX_GROUP_NAME_LENGTH
            );
        }
        if let Some(c) = group
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
        {
            anyhow::bail!("Group name '{}' contains invalid character '{}'", group, c);
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.excluded.is_empty()
    }

    pub fn excluded_groups(&self) -> &BTreeSet<String> {
        &self.excluded
    }

    /// Keeps the dependencies that are still needed once the excluded groups are skipped
    pub fn filter_dependencies(
        &self,
        dependencies: Vec<ResolvedDependency>,
    ) -> Vec<ResolvedDependency> {
        dependencies
            .into_iter()
            .filter(|dep| self.keeps(dep))
            .collect()
    }

    fn keeps(&self, dependency: &ResolvedDependency) -> bool {
        let groups = dependency.groups();
        groups.is_empty() || groups.iter().any(|g| !self.excluded.contains(g))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sbom_generation::domain::Package;

    fn dep(name: &str, groups: &[&str]) -> ResolvedDependency {
        ResolvedDependency::new(
            Package::new(name.to_string(), "1.0.0".to_string()).unwrap(),
            groups.iter().map(|g| g.to_string()),
        )
    }

    fn names(deps: &[ResolvedDependency]) -> Vec<&str> {
        deps.iter().map(|d| d.package().name()).collect()
    }

    #[test]
    fn test_filter_drops_dependencies_only_in_excluded_groups() {
        let filter = GroupFilter::new(vec!["development".to_string(), "test".to_string()]).unwrap();
        let kept = filter.filter_dependencies(vec![
            dep("rails", &["default"]),
            dep("rspec", &["test"]),
            dep("pry", &["development", "test"]),
        ]);

        assert_eq!(names(&kept), vec!["rails"]);
    }

    #[test]
    fn test_filter_keeps_dependency_shared_with_included_group() {
        let filter = GroupFilter::new(vec!["test".to_string()]).unwrap();
        let kept = filter.filter_dependencies(vec![dep("rack", &["default", "test"])]);

        assert_eq!(names(&kept), vec!["rack"]);
    }

    #[test]
    fn test_filter_keeps_dependencies_without_groups() {
        let filter = GroupFilter::new(vec!["test".to_string()]).unwrap();
        let kept = filter.filter_dependencies(vec![dep("orphan", &[])]);

        assert_eq!(names(&kept), vec!["orphan"]);
    }

    #[test]
    fn test_symbol_style_group_names_are_accepted() {
        let filter = GroupFilter::new(vec![":test".to_string()]).unwrap();
        assert!(filter.excluded_groups().contains("test"));
    }

    #[test]
    fn test_empty_filter() {
        let filter = GroupFilter::new(vec![]).unwrap();
        assert!(filter.is_empty());
    }

    #[test]
    fn test_invalid_group_name() {
        let result = GroupFilter::new(vec!["te st".to_string()]);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("contains invalid character"));
    }

    #[test]
    fn test_too_many_groups() {
        let groups = (0..65).map(|i| format!("g{}", i)).collect();
        let result = GroupFilter::new(groups);
        assert!(result.unwrap_err().to_string().contains("Too many excluded groups"));
    }
}
