use crate::application::read_models::LicenseReportView;
use crate::ports::outbound::ReportFormatter;

const USAGE_HEADING: &str = "=== License Usage in SBOM ===";
const PACKAGES_HEADING: &str = "=== Packages by License ===";

/// TextReportFormatter adapter for the plain-text license report
///
/// The first section lists each license with its count; the second lists
/// the packages behind every license, in the same order.
pub struct TextReportFormatter;

impl TextReportFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TextReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for TextReportFormatter {
    fn format(&self, report: &LicenseReportView) -> String {
        let mut output = String::new();

        output.push_str(USAGE_HEADING);
        output.push('\n');
        output.push_str(&format!("Total packages: {}\n", report.total_packages));
        output.push('\n');

        for usage in &report.licenses {
            output.push_str(&format!("{}: {} package(s)\n", usage.license, usage.count));
        }

        output.push('\n');
        output.push_str(PACKAGES_HEADING);
        output.push('\n');

        for usage in &report.licenses {
            output.push_str(&format!(
                "\n{} ({} package(s)):\n",
                usage.license,
                usage.packages.len()
            ));
            for package in &usage.packages {
                output.push_str(&format!("  - {} ({})\n", package.name, package.version));
            }
        }

        output
    }
}
