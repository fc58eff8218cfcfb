use super::*;
use crate::application::dto::OutputFormat;
use crate::ports::outbound::{GemGroups, GemLicenseMetadata};
use crate::sbom_generation::domain::{SbomDocument, SbomFormat, NOASSERTION};
use crate::shared::error::SbomError;
use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::{Arc, Mutex};

// Mock implementations for testing
struct MockLockfileReader {
    result: Option<LockfileParseResult>,
}

impl MockLockfileReader {
    fn with_specs(specs: &[(&str, &str, &[&str])], top_level: &[&str]) -> Self {
        let mut packages = Vec::new();
        let mut dependency_map = HashMap::new();
        for (name, version, deps) in specs {
            packages.push(Package::new(name.to_string(), version.to_string()).unwrap());
            dependency_map.insert(
                name.to_string(),
                deps.iter().map(|d| d.to_string()).collect(),
            );
        }
        Self {
            result: Some(LockfileParseResult {
                packages,
                dependency_map,
                top_level: top_level.iter().map(|t| t.to_string()).collect(),
            }),
        }
    }

    fn missing() -> Self {
        Self { result: None }
    }
}

impl LockfileReader for MockLockfileReader {
    fn read_and_parse_lockfile(&self, path: &Path) -> Result<LockfileParseResult> {
        match &self.result {
            Some(result) => Ok(result.clone()),
            None => Err(SbomError::LockfileNotFound {
                path: path.join("Gemfile.lock"),
                suggestion: "Run `bundle install` first.".to_string(),
            }
            .into()),
        }
    }
}

struct MockProjectConfigReader {
    groups: Option<GemGroups>,
}

impl MockProjectConfigReader {
    fn with_groups(entries: &[(&str, &[&str])]) -> Self {
        let groups = entries
            .iter()
            .map(|(name, gs)| {
                (
                    name.to_string(),
                    gs.iter().map(|g| g.to_string()).collect::<BTreeSet<_>>(),
                )
            })
            .collect();
        Self {
            groups: Some(groups),
        }
    }

    fn without_gemfile() -> Self {
        Self { groups: None }
    }
}

impl ProjectConfigReader for MockProjectConfigReader {
    fn read_project_name(&self, _path: &Path) -> Result<String> {
        Ok("test-project".to_string())
    }

    fn read_gem_groups(&self, _path: &Path) -> Result<Option<GemGroups>> {
        Ok(self.groups.clone())
    }
}

/// Answers from a fixed table; "broken" simulates a registry failure
struct MockLicenseRepository {
    licenses: HashMap<String, GemLicenseMetadata>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockLicenseRepository {
    fn new(entries: &[(&str, Option<&str>, &[&str])]) -> Self {
        let licenses = entries
            .iter()
            .map(|(name, license, licenses)| {
                (
                    name.to_string(),
                    (
                        license.map(String::from),
                        licenses.iter().map(|l| l.to_string()).collect(),
                    ),
                )
            })
            .collect();
        Self {
            licenses,
            calls: Arc::default(),
        }
    }
}

#[async_trait::async_trait]
impl LicenseRepository for MockLicenseRepository {
    async fn fetch_license_info(
        &self,
        package_name: &str,
        version: &str,
    ) -> Result<Option<GemLicenseMetadata>> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(format!("{}@{}", package_name, version));
        }
        if package_name == "broken" {
            anyhow::bail!("connection reset");
        }
        Ok(self.licenses.get(package_name).cloned())
    }
}

#[derive(Clone, Default)]
struct MockProgressReporter {
    errors: Rc<RefCell<Vec<String>>>,
}

impl ProgressReporter for MockProgressReporter {
    fn report(&self, _message: &str) {}
    fn report_progress(&self, _current: usize, _total: usize, _message: Option<&str>) {}
    fn report_error(&self, message: &str) {
        self.errors.borrow_mut().push(message.to_string());
    }
    fn report_completion(&self, _message: &str) {}
}

fn request(sbom_format: SbomFormat, without: &[&str]) -> SbomRequest {
    SbomRequest::new(
        PathBuf::from("/test/project"),
        sbom_format,
        OutputFormat::Json,
        without.iter().map(|w| w.to_string()).collect(),
    )
}

fn spdx_names(document: &SbomDocument) -> Vec<String> {
    match document {
        SbomDocument::Spdx(doc) => doc.packages.iter().map(|p| p.name.clone()).collect(),
        SbomDocument::CycloneDx(_) => panic!("expected SPDX document"),
    }
}

fn rails_app_lockfile() -> MockLockfileReader {
    MockLockfileReader::with_specs(
        &[
            ("rack", "3.0.8", &[]),
            ("rails", "7.0.4", &["rack"]),
            ("rspec", "3.12.0", &["rspec-core"]),
            ("rspec-core", "3.12.2", &[]),
        ],
        &["rails", "rspec"],
    )
}

#[tokio::test]
async fn test_execute_builds_spdx_document() {
    let use_case = GenerateSbomUseCase::new(
        rails_app_lockfile(),
        MockProjectConfigReader::without_gemfile(),
        MockLicenseRepository::new(&[
            ("rack", Some("MIT"), &[]),
            ("rails", Some("MIT"), &["MIT"]),
            ("rspec", None, &["MIT"]),
            ("rspec-core", Some("MIT"), &[]),
        ]),
        MockProgressReporter::default(),
    );

    let response = use_case.execute(request(SbomFormat::Spdx, &[])).await.unwrap();

    assert_eq!(
        spdx_names(&response.document),
        vec!["rack", "rails", "rspec", "rspec-core"]
    );
    match &response.document {
        SbomDocument::Spdx(doc) => {
            assert_eq!(doc.name, "test-project");
            assert!(doc.packages.iter().all(|p| p.license_declared == "MIT"));
        }
        SbomDocument::CycloneDx(_) => unreachable!(),
    }
    assert_eq!(response.excluded_count, 0);
    assert_eq!(response.lookup_failures, 0);
}

#[tokio::test]
async fn test_execute_builds_cyclonedx_document() {
    let use_case = GenerateSbomUseCase::new(
        rails_app_lockfile(),
        MockProjectConfigReader::without_gemfile(),
        MockLicenseRepository::new(&[("rack", Some("MIT"), &[])]),
        MockProgressReporter::default(),
    );

    let response = use_case
        .execute(request(SbomFormat::CycloneDx, &[]))
        .await
        .unwrap();

    match &response.document {
        SbomDocument::CycloneDx(doc) => {
            assert_eq!(doc.components.len(), 4);
            assert_eq!(doc.metadata.component.name, "test-project");
            assert_eq!(doc.components[0].licenses, Some(vec!["MIT".to_string()]));
            assert_eq!(doc.components[1].licenses, None);
        }
        SbomDocument::Spdx(_) => panic!("expected CycloneDX document"),
    }
}

#[tokio::test]
async fn test_execute_excludes_groups() {
    let use_case = GenerateSbomUseCase::new(
        rails_app_lockfile(),
        MockProjectConfigReader::with_groups(&[("rails", &["default"]), ("rspec", &["test"])]),
        MockLicenseRepository::new(&[]),
        MockProgressReporter::default(),
    );

    let response = use_case
        .execute(request(SbomFormat::Spdx, &["test"]))
        .await
        .unwrap();

    assert_eq!(spdx_names(&response.document), vec!["rack", "rails"]);
    assert_eq!(response.excluded_count, 2);
}

#[tokio::test]
async fn test_execute_without_gemfile_ignores_group_filter_with_warning() {
    let reporter = MockProgressReporter::default();
    let use_case = GenerateSbomUseCase::new(
        rails_app_lockfile(),
        MockProjectConfigReader::without_gemfile(),
        MockLicenseRepository::new(&[]),
        reporter.clone(),
    );

    let response = use_case
        .execute(request(SbomFormat::Spdx, &["test"]))
        .await
        .unwrap();

    assert_eq!(spdx_names(&response.document).len(), 4);
    assert!(reporter
        .errors
        .borrow()
        .iter()
        .any(|m| m.contains("group membership is unknown")));
}

#[tokio::test]
async fn test_execute_unknown_gem_gets_noassertion() {
    let use_case = GenerateSbomUseCase::new(
        MockLockfileReader::with_specs(&[("internal-gem", "0.1.0", &[])], &["internal-gem"]),
        MockProjectConfigReader::without_gemfile(),
        MockLicenseRepository::new(&[]),
        MockProgressReporter::default(),
    );

    let response = use_case.execute(request(SbomFormat::Spdx, &[])).await.unwrap();

    match &response.document {
        SbomDocument::Spdx(doc) => assert_eq!(doc.packages[0].license_declared, NOASSERTION),
        SbomDocument::CycloneDx(_) => unreachable!(),
    }
    assert_eq!(response.lookup_failures, 0);
}

#[tokio::test]
async fn test_execute_lookup_failure_is_a_warning() {
    let reporter = MockProgressReporter::default();
    let use_case = GenerateSbomUseCase::new(
        MockLockfileReader::with_specs(
            &[("broken", "1.0.0", &[]), ("rack", "3.0.8", &[])],
            &["broken", "rack"],
        ),
        MockProjectConfigReader::without_gemfile(),
        MockLicenseRepository::new(&[("rack", Some("MIT"), &[])]),
        reporter.clone(),
    );

    let response = use_case.execute(request(SbomFormat::Spdx, &[])).await.unwrap();

    assert_eq!(response.lookup_failures, 1);
    assert_eq!(spdx_names(&response.document), vec!["broken", "rack"]);
    let errors = reporter.errors.borrow();
    assert!(errors
        .iter()
        .any(|m| m.contains("broken (1.0.0)") && m.contains("connection reset")));
}

#[tokio::test]
async fn test_execute_collapses_platform_variants() {
    let use_case = GenerateSbomUseCase::new(
        MockLockfileReader::with_specs(
            &[
                ("nokogiri", "1.15.4", &[]),
                ("nokogiri", "1.15.4", &[]),
                ("rake", "13.0.6", &[]),
            ],
            &["nokogiri", "rake"],
        ),
        MockProjectConfigReader::without_gemfile(),
        MockLicenseRepository::new(&[]),
        MockProgressReporter::default(),
    );

    let response = use_case.execute(request(SbomFormat::Spdx, &[])).await.unwrap();

    assert_eq!(spdx_names(&response.document), vec!["nokogiri", "rake"]);
}

#[tokio::test]
async fn test_execute_looks_up_each_release_once() {
    let repository = MockLicenseRepository::new(&[("nokogiri", None, &["MIT"])]);
    let calls = Arc::clone(&repository.calls);
    let use_case = GenerateSbomUseCase::new(
        MockLockfileReader::with_specs(
            &[
                ("nokogiri", "1.15.4", &["racc"]),
                ("nokogiri", "1.15.4", &["racc"]),
                ("racc", "1.7.1", &[]),
                ("nokogiri", "1.15.4", &["racc"]),
            ],
            &["nokogiri"],
        ),
        MockProjectConfigReader::without_gemfile(),
        repository,
        MockProgressReporter::default(),
    );

    use_case.execute(request(SbomFormat::Spdx, &[])).await.unwrap();

    assert_eq!(
        *calls.lock().unwrap(),
        vec!["nokogiri@1.15.4".to_string(), "racc@1.7.1".to_string()]
    );
}

#[tokio::test]
async fn test_execute_missing_lockfile_is_fatal() {
    let use_case = GenerateSbomUseCase::new(
        MockLockfileReader::missing(),
        MockProjectConfigReader::without_gemfile(),
        MockLicenseRepository::new(&[]),
        MockProgressReporter::default(),
    );

    let err = use_case
        .execute(request(SbomFormat::Spdx, &[]))
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<SbomError>(),
        Some(SbomError::LockfileNotFound { .. })
    ));
}

#[tokio::test]
async fn test_execute_rejects_invalid_group_name() {
    let use_case = GenerateSbomUseCase::new(
        rails_app_lockfile(),
        MockProjectConfigReader::without_gemfile(),
        MockLicenseRepository::new(&[]),
        MockProgressReporter::default(),
    );

    let result = use_case
        .execute(request(SbomFormat::Spdx, &["bad group"]))
        .await;

    assert!(result.is_err());
}
