/// Query-optimized license report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseReportView {
    pub total_packages: usize,
    /// Licenses by descending package count; ties keep discovery order
    pub licenses: Vec<LicenseUsageView>,
}

/// One license and the packages declaring it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseUsageView {
    pub license: String,
    pub count: usize,
    pub packages: Vec<PackageRefView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRefView {
    pub name: String,
    pub version: String,
}
