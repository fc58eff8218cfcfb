/// Use cases module containing application business logic orchestration
mod generate_sbom;
mod report_licenses;

pub use generate_sbom::GenerateSbomUseCase;
pub use report_licenses::ReportLicensesUseCase;
