use bundle_sbom::adapters::outbound::filesystem::parse_gemfile_groups;
use bundle_sbom::ports::outbound::GemGroups;
use bundle_sbom::prelude::*;
use std::path::Path;

/// Mock ProjectConfigReader for testing
pub struct MockProjectConfigReader {
    pub project_name: String,
    /// Gemfile source; `None` behaves like a project without a Gemfile
    pub gemfile: Option<String>,
}

impl MockProjectConfigReader {
    pub fn new(project_name: &str) -> Self {
        Self {
            project_name: project_name.to_string(),
            gemfile: None,
        }
    }

    pub fn with_gemfile(mut self, gemfile: &str) -> Self {
        self.gemfile = Some(gemfile.to_string());
        self
    }
}

impl ProjectConfigReader for MockProjectConfigReader {
    fn read_project_name(&self, _project_path: &Path) -> Result<String> {
        Ok(self.project_name.clone())
    }

    fn read_gem_groups(&self, _project_path: &Path) -> Result<Option<GemGroups>> {
        self.gemfile
            .as_deref()
            .map(parse_gemfile_groups)
            .transpose()
    }
}
