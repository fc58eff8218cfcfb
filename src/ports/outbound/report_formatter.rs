use crate::application::read_models::LicenseReportView;

/// ReportFormatter port for rendering the license report
pub trait ReportFormatter {
    fn format(&self, report: &LicenseReportView) -> String;
}
