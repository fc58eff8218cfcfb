use crate::sbom_generation::domain::{LicenseTally, ReportEntry};

/// LicenseAnalyzer service: license usage statistics over report entries
pub struct LicenseAnalyzer;

impl LicenseAnalyzer {
    /// Counts packages per license token, keeping discovery order
    pub fn analyze(entries: &[ReportEntry]) -> LicenseTally {
        let mut tally = LicenseTally::new();
        for entry in entries {
            for token in entry.license_tokens() {
                tally.increment(token);
            }
        }
        tally
    }

    /// Entries whose token set contains `license`, in document order
    pub fn packages_with_license<'a>(
        entries: &'a [ReportEntry],
        license: &str,
    ) -> Vec<&'a ReportEntry> {
        entries.iter().filter(|e| e.declares(license)).collect()
    }
}
