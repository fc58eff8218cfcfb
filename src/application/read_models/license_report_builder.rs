//! Builder for constructing LicenseReportView from SBOM documents

use super::license_report_view::{LicenseReportView, LicenseUsageView, PackageRefView};
use crate::sbom_generation::domain::{ReportEntry, SbomDocument};
use crate::sbom_generation::services::LicenseAnalyzer;

/// Builder for constructing LicenseReportView from documents of either schema
pub struct LicenseReportBuilder;

impl LicenseReportBuilder {
    pub fn build(document: &SbomDocument) -> LicenseReportView {
        Self::build_from_entries(&document.to_report_entries())
    }

    /// Builds the view from already normalized entries
    pub fn build_from_entries(entries: &[ReportEntry]) -> LicenseReportView {
        let tally = LicenseAnalyzer::analyze(entries);

        let licenses = tally
            .sorted_by_count()
            .into_iter()
            .map(|(license, count)| {
                let packages = LicenseAnalyzer::packages_with_license(entries, &license)
                    .into_iter()
                    .map(|e| PackageRefView {
                        name: e.name.clone(),
                        version: e.version.clone(),
                    })
                    .collect();
                LicenseUsageView {
                    license,
                    count,
                    packages,
                }
            })
            .collect();

        LicenseReportView {
            total_packages: entries.len(),
            licenses,
        }
    }
}
