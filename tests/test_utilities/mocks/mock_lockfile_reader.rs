use bundle_sbom::adapters::outbound::filesystem::parse_lockfile;
use bundle_sbom::prelude::*;
use std::path::Path;

/// Mock LockfileReader for testing, parsing in-memory Gemfile.lock content
pub struct MockLockfileReader {
    pub content: String,
    pub should_fail: bool,
}

impl MockLockfileReader {
    pub fn new(content: &str) -> Self {
        Self {
            content: content.to_string(),
            should_fail: false,
        }
    }

    pub fn with_failure() -> Self {
        Self {
            content: String::new(),
            should_fail: true,
        }
    }
}

impl LockfileReader for MockLockfileReader {
    fn read_and_parse_lockfile(&self, _project_path: &Path) -> Result<LockfileParseResult> {
        if self.should_fail {
            anyhow::bail!("Mock lockfile read failure");
        }
        parse_lockfile(&self.content)
    }
}
