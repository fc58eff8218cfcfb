use crate::shared::Result;
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

/// Bundler groups per gem name, as declared in the Gemfile
pub type GemGroups = HashMap<String, BTreeSet<String>>;

/// ProjectConfigReader port for reading project metadata
pub trait ProjectConfigReader {
    /// Name documents use for the project: the project directory's basename
    fn read_project_name(&self, project_path: &Path) -> Result<String>;

    /// Reads group declarations from the project's Gemfile
    ///
    /// # Returns
    /// `None` when no Gemfile (or `gems.rb`) exists, meaning group
    /// membership is unknown
    fn read_gem_groups(&self, project_path: &Path) -> Result<Option<GemGroups>>;
}
