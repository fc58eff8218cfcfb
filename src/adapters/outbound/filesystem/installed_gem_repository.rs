use crate::ports::outbound::{GemLicenseMetadata, LicenseRepository};
use crate::shared::security::safe_read_to_string;
use crate::shared::Result;
use async_trait::async_trait;
use regex::Regex;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const SPECIFICATIONS_DIR: &str = "specifications";
const GEMSPEC_EXTENSION: &str = ".gemspec";

/// InstalledGemLicenseRepository adapter reading licenses of locally installed gems
///
/// Looks for `specifications/<name>-<version>[-<platform>].gemspec` under each
/// gem directory, the way RubyGems lays out an installation.
pub struct InstalledGemLicenseRepository {
    gem_dirs: Vec<PathBuf>,
    license_re: Regex,
    licenses_re: Regex,
    quoted_re: Regex,
}

impl InstalledGemLicenseRepository {
    /// Creates a repository searching `gem_dirs` in order
    pub fn new(gem_dirs: Vec<PathBuf>) -> Result<Self> {
        Ok(Self {
            gem_dirs,
            license_re: Regex::new(r#"\.license\s*=\s*["']([^"']*)["']"#)?,
            licenses_re: Regex::new(r"\.licenses\s*=\s*\[([^\]]*)\]")?,
            quoted_re: Regex::new(r#"["']([^"']*)["']"#)?,
        })
    }

    /// Configured directories first, then `GEM_HOME` and `GEM_PATH`
    pub fn from_environment(extra_dirs: Vec<PathBuf>) -> Result<Self> {
        let mut dirs = extra_dirs;
        if let Some(home) = env::var_os("GEM_HOME") {
            dirs.push(PathBuf::from(home));
        }
        if let Some(path) = env::var_os("GEM_PATH") {
            dirs.extend(env::split_paths(&path));
        }
        dirs.retain(|d| !d.as_os_str().is_empty());
        dirs.dedup();
        Self::new(dirs)
    }

    pub fn gem_dirs(&self) -> &[PathBuf] {
        &self.gem_dirs
    }

    fn find_gemspec(&self, package_name: &str, version: &str) -> Result<Option<PathBuf>> {
        let stem = format!("{}-{}", package_name, version);
        let exact = format!("{}{}", stem, GEMSPEC_EXTENSION);
        let platform_prefix = format!("{}-", stem);

        for dir in &self.gem_dirs {
            let spec_dir = dir.join(SPECIFICATIONS_DIR);
            let candidate = spec_dir.join(&exact);
            if candidate.is_file() {
                return Ok(Some(candidate));
            }

            let Ok(entries) = fs::read_dir(&spec_dir) else {
                continue;
            };
            let mut platform_specs: Vec<PathBuf> = entries
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.path())
                .filter(|path| {
                    path.file_name()
                        .and_then(|n| n.to_str())
                        .is_some_and(|n| {
                            n.starts_with(&platform_prefix) && n.ends_with(GEMSPEC_EXTENSION)
                        })
                })
                .collect();
            platform_specs.sort();
            if let Some(first) = platform_specs.into_iter().next() {
                return Ok(Some(first));
            }
        }

        Ok(None)
    }

    /// Pulls `license` and `licenses` out of gemspec source
    pub fn parse_gemspec(&self, content: &str) -> GemLicenseMetadata {
        let license = self
            .license_re
            .captures(content)
            .map(|c| c[1].to_string())
            .filter(|l| !l.trim().is_empty());

        let licenses: Vec<String> = self
            .licenses_re
            .captures(content)
            .map(|c| {
                self.quoted_re
                    .captures_iter(&c[1])
                    .map(|q| q[1].to_string())
                    .collect()
            })
            .unwrap_or_default();

        (license, licenses)
    }

    fn read_gemspec(&self, path: &Path) -> Result<GemLicenseMetadata> {
        let content = safe_read_to_string(path, "gemspec")?;
        Ok(self.parse_gemspec(&content))
    }
}

#[async_trait]
impl LicenseRepository for InstalledGemLicenseRepository {
    async fn fetch_license_info(
        &self,
        package_name: &str,
        version: &str,
    ) -> Result<Option<GemLicenseMetadata>> {
        match self.find_gemspec(package_name, version)? {
            Some(path) => Ok(Some(self.read_gemspec(&path)?)),
            None => Ok(None),
        }
    }
}
