/// End-to-end tests for config file loading and CLI option merging.
///
/// These tests exercise the full flow from config file on disk through CLI invocation
/// to the generated document, using `assert_cmd` and `tempfile` for isolated test environments.
use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Create a test project directory with Gemfile and Gemfile.lock.
fn create_test_project(dir: &Path) {
    for name in ["Gemfile", "Gemfile.lock"] {
        fs::copy(fixtures_path().join("sample-project").join(name), dir.join(name)).unwrap();
    }
}

/// Write the auto-discovered config file into the project.
fn write_config(dir: &Path, content: &str) {
    fs::write(dir.join("bundle-sbom.config.yml"), content).unwrap();
}

fn dump(dir: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("bundle-sbom");
    cmd.env_remove("GEM_HOME")
        .env_remove("GEM_PATH")
        .arg("dump")
        .arg("-p")
        .arg(dir);
    cmd
}

fn package_names(path: &Path) -> Vec<String> {
    let doc: serde_json::Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    doc["packages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect()
}

// ============================================================================
// Config File Auto-Discovery Tests
// ============================================================================

mod auto_discovery_tests {
    use super::*;

    #[test]
    fn test_auto_discovery_applies_without() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path());
        write_config(dir.path(), "without:\n  - test\n  - development\n");

        dump(dir.path())
            .assert()
            .success()
            .stderr(predicate::str::contains("Auto-discovered config file"));

        assert_eq!(
            package_names(&dir.path().join("bom.json")),
            vec!["json", "nokogiri", "racc", "rack"]
        );
    }

    #[test]
    fn test_auto_discovery_applies_formats() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path());
        write_config(dir.path(), "format: xml\nsbom: cyclonedx\n");

        dump(dir.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("Generated CYCLONEDX SBOM at"));

        let xml = fs::read_to_string(dir.path().join("bom-cyclonedx.xml")).unwrap();
        assert!(xml.contains("<bom xmlns="));
    }

    #[test]
    fn test_auto_discovery_applies_gem_paths() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path());
        write_config(
            dir.path(),
            &format!("gem_paths:\n  - {}\n", fixtures_path().join("gems").display()),
        );

        dump(dir.path()).assert().success();

        let doc: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("bom.json")).unwrap())
                .unwrap();
        assert_eq!(doc["packages"][3]["licenseDeclared"], "MIT");
    }

    #[test]
    fn test_no_config_file_runs_normally() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path());

        let output = dump(dir.path()).output().unwrap();

        assert!(output.status.success());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(!stderr.contains("config file"));
        // No gem paths: every license is unknown
        let doc: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("bom.json")).unwrap())
                .unwrap();
        assert_eq!(doc["packages"][0]["licenseDeclared"], "NOASSERTION");
    }

    #[test]
    fn test_unknown_config_field_warns() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path());
        write_config(dir.path(), "format: json\ncheck_cve: true\n");

        dump(dir.path())
            .assert()
            .success()
            .stderr(predicate::str::contains(
                "Unknown config field 'check_cve' will be ignored",
            ));
    }
}

// ============================================================================
// Explicit Config Path (`--config`) Tests
// ============================================================================

mod explicit_config_tests {
    use super::*;

    #[test]
    fn test_explicit_config_path_loads_successfully() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path());
        let config_path = dir.path().join("custom-config.yml");
        fs::write(&config_path, "without: [test]\n").unwrap();

        dump(dir.path())
            .arg("-c")
            .arg(&config_path)
            .assert()
            .success()
            .stderr(predicate::str::contains("Loaded config from:"));

        assert_eq!(package_names(&dir.path().join("bom.json")).len(), 5);
    }

    #[test]
    fn test_explicit_config_nonexistent_file_error() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path());

        dump(dir.path())
            .args(["-c", "nonexistent-config.yml"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Failed to read config file"));
    }

    #[test]
    fn test_invalid_yaml_error() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path());
        write_config(dir.path(), "invalid: yaml: [[[broken");

        dump(dir.path())
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Failed to parse config file"));
    }

    #[test]
    fn test_unsupported_format_in_config_error() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path());
        write_config(dir.path(), "format: markdown\n");

        dump(dir.path())
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Unsupported output format 'markdown'"));
        assert!(!dir.path().join("bom.json").exists());
    }
}

// ============================================================================
// CLI + Config Merge Tests
// ============================================================================

mod merge_tests {
    use super::*;

    #[test]
    fn test_cli_format_overrides_config() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path());
        write_config(dir.path(), "format: xml\n");

        dump(dir.path()).args(["-f", "json"]).assert().success();

        assert!(dir.path().join("bom.json").exists());
        assert!(!dir.path().join("bom.xml").exists());
    }

    #[test]
    fn test_cli_without_overrides_config() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path());
        write_config(dir.path(), "without: [development, test]\n");

        dump(dir.path()).args(["-w", "test"]).assert().success();

        let names = package_names(&dir.path().join("bom.json"));
        assert!(names.contains(&"rake".to_string()));
        assert!(!names.contains(&"rspec".to_string()));
    }

    #[test]
    fn test_config_sbom_with_cli_format() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path());
        write_config(dir.path(), "sbom: cyclonedx\n");

        dump(dir.path()).args(["-f", "xml"]).assert().success();

        assert!(dir.path().join("bom-cyclonedx.xml").exists());
    }
}
