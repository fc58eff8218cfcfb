use crate::application::dto::{SbomRequest, SbomResponse};
use crate::ports::outbound::{
    LicenseRepository, LockfileParseResult, LockfileReader, ProgressReporter, ProjectConfigReader,
};
use crate::sbom_generation::domain::{
    DependencySource, LicenseLookup, LicenseSet, LicensedPackage, Package, ResolvedDependency,
};
use crate::sbom_generation::services::{
    DocumentBuilder, GroupFilter, GroupResolver, SbomGenerator,
};
use crate::shared::Result;

/// GenerateSbomUseCase - Core use case for SBOM generation
///
/// Orchestrates lockfile reading, group filtering, license lookup and
/// document assembly, with all infrastructure injected through generics.
///
/// # Type Parameters
/// * `LR` - LockfileReader implementation
/// * `PCR` - ProjectConfigReader implementation
/// * `LREPO` - LicenseRepository implementation
/// * `PR` - ProgressReporter implementation
pub struct GenerateSbomUseCase<LR, PCR, LREPO, PR> {
    lockfile_reader: LR,
    project_config_reader: PCR,
    license_repository: LREPO,
    progress_reporter: PR,
}

impl<LR, PCR, LREPO, PR> GenerateSbomUseCase<LR, PCR, LREPO, PR>
where
    LR: LockfileReader,
    PCR: ProjectConfigReader,
    LREPO: LicenseRepository,
    PR: ProgressReporter,
{
    /// Creates a new GenerateSbomUseCase with injected dependencies
    pub fn new(
        lockfile_reader: LR,
        project_config_reader: PCR,
        license_repository: LREPO,
        progress_reporter: PR,
    ) -> Self {
        Self {
            lockfile_reader,
            project_config_reader,
            license_repository,
            progress_reporter,
        }
    }

    /// Executes the SBOM generation use case
    ///
    /// # Errors
    /// Fails when the lockfile is missing or unreadable, the project path is
    /// invalid, or a `--without` group name is malformed. Unknown licenses and
    /// failed lookups only produce warnings.
    pub async fn execute(&self, request: SbomRequest) -> Result<SbomResponse> {
        let group_filter = GroupFilter::new(request.without_groups.clone())?;

        // Step 1: Read and parse lockfile
        let lockfile = self.read_and_report_lockfile(&request)?;

        // Step 2: Attach Gemfile groups
        let source = self.build_dependency_source(&request, lockfile);

        // Step 3: Deduplicate and filter by group
        let selection = DocumentBuilder::select_dependencies(&source, &group_filter);
        if selection.group_filter_skipped {
            self.progress_reporter.report_error(
                "⚠️  Warning: No Gemfile found, so group membership is unknown. \
                 Excluded groups are ignored and all gems are included.",
            );
        }
        if selection.excluded_count > 0 {
            self.progress_reporter.report(&format!(
                "🚫 Excluded {} package(s) in groups: {}",
                selection.excluded_count,
                request.without_groups.join(", ")
            ));
        }

        // Step 4: Look up licenses
        let (licensed, lookup_failures) = self.fetch_license_info(selection.packages).await;

        // Step 5: Assemble the document
        let project_name = self
            .project_config_reader
            .read_project_name(&request.project_path)?;
        let metadata = SbomGenerator::generate_default_metadata(&project_name);
        let document = DocumentBuilder::assemble(request.sbom_format, &licensed, &metadata);

        Ok(SbomResponse::new(
            document,
            selection.excluded_count,
            lookup_failures,
        ))
    }

    fn read_and_report_lockfile(&self, request: &SbomRequest) -> Result<LockfileParseResult> {
        self.progress_reporter.report(&format!(
            "📖 Loading Gemfile.lock from: {}",
            request.project_path.display()
        ));

        let lockfile = self
            .lockfile_reader
            .read_and_parse_lockfile(&request.project_path)?;

        self.progress_reporter
            .report(&format!("✅ Detected {} package(s)", lockfile.packages.len()));

        Ok(lockfile)
    }

    /// Resolves group membership when the Gemfile can be read
    ///
    /// An unreadable Gemfile is reported and treated like a missing one.
    fn build_dependency_source(
        &self,
        request: &SbomRequest,
        lockfile: LockfileParseResult,
    ) -> DependencySource {
        let declared_groups = match self
            .project_config_reader
            .read_gem_groups(&request.project_path)
        {
            Ok(groups) => groups,
            Err(e) => {
                self.progress_reporter.report_error(&format!(
                    "⚠️  Warning: Could not read Gemfile groups: {}",
                    e
                ));
                None
            }
        };

        let Some(declared_groups) = declared_groups else {
            return DependencySource::without_groups(lockfile.packages);
        };

        let resolution = GroupResolver::resolve(
            &lockfile.top_level,
            &declared_groups,
            &lockfile.dependency_map,
        );
        if resolution.is_truncated() {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: Maximum dependency depth ({}) reached. Group membership may be incomplete.",
                GroupResolver::MAX_RECURSION_DEPTH
            ));
        }

        let dependencies = lockfile
            .packages
            .into_iter()
            .map(|package| {
                let groups = resolution.groups_of(package.name());
                ResolvedDependency::new(package, groups)
            })
            .collect();

        DependencySource::new(dependencies, true)
    }

    /// Looks up licenses one package at a time
    ///
    /// # Returns
    /// Licensed packages in input order and the number of failed lookups
    async fn fetch_license_info(&self, packages: Vec<Package>) -> (Vec<LicensedPackage>, usize) {
        self.progress_reporter
            .report("🔍 Fetching license information...");

        let total = packages.len();
        let mut licensed = Vec::with_capacity(total);
        let mut not_found = 0;
        let mut errors: Vec<(String, String)> = Vec::new();

        for (idx, package) in packages.into_iter().enumerate() {
            let licenses = match self
                .license_repository
                .lookup_licenses(package.name(), package.version())
                .await
            {
                Ok(LicenseLookup::NotFound) => {
                    not_found += 1;
                    LicenseSet::default()
                }
                Ok(lookup) => lookup.into_license_set(),
                Err(e) => {
                    errors.push((package.to_string(), e.to_string()));
                    LicenseSet::default()
                }
            };

            self.progress_reporter
                .report_progress(idx + 1, total, Some(package.name()));
            licensed.push(LicensedPackage::new(package, licenses));
        }

        for (package, error_msg) in &errors {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: Failed to fetch license information for {}: {}",
                package, error_msg
            ));
        }

        self.progress_reporter.report_completion(&format!(
            "✅ License information retrieval complete: {} package(s), {} without license data, {} failed",
            total, not_found, errors.len()
        ));

        (licensed, errors.len())
    }
}

#[cfg(test)]
mod tests;
