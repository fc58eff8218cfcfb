//! Read models for CQRS-lite pattern
//!
//! View-optimized structs derived from SBOM documents for reporting.

pub mod license_report_builder;
pub mod license_report_view;

pub use license_report_builder::LicenseReportBuilder;
pub use license_report_view::{LicenseReportView, LicenseUsageView, PackageRefView};
