//! bundle-sbom - SBOM generation tool for Bundler projects
//!
//! This library generates Software Bill of Materials (SBOM) documents from
//! `Gemfile.lock` files in SPDX 2.3 and CycloneDX 1.4, encoded as JSON or XML,
//! and derives license reports from existing documents. It follows hexagonal
//! architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`sbom_generation`): Documents, packages, group resolution and license policies
//! - **Application Layer** (`application`): Use cases, DTOs, read models and factories
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Filesystem, RubyGems, codec and console implementations
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use bundle_sbom::prelude::*;
//! use std::path::PathBuf;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<()> {
//! let use_case = GenerateSbomUseCase::new(
//!     FileSystemReader::new(),
//!     FileSystemReader::new(),
//!     InstalledGemLicenseRepository::from_environment(vec![])?,
//!     StderrProgressReporter::new(),
//! );
//!
//! let request = SbomRequest::new(
//!     PathBuf::from("."),
//!     SbomFormat::CycloneDx,
//!     OutputFormat::Json,
//!     vec!["development".to_string()],
//! );
//! let response = use_case.execute(request).await?;
//!
//! let output = CodecFactory::create(OutputFormat::Json).encode(&response.document)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod ports;
pub mod sbom_generation;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::codecs::{JsonCodec, XmlCodec};
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, InstalledGemLicenseRepository, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::TextReportFormatter;
    pub use crate::adapters::outbound::network::RubyGemsLicenseRepository;
    pub use crate::application::dto::{
        LicenseReportRequest, LicenseReportResponse, OutputFormat, SbomRequest, SbomResponse,
    };
    pub use crate::application::factories::CodecFactory;
    pub use crate::application::read_models::{LicenseReportBuilder, LicenseReportView};
    pub use crate::application::use_cases::{GenerateSbomUseCase, ReportLicensesUseCase};
    pub use crate::ports::outbound::{
        DocumentReader, LicenseRepository, LockfileParseResult, LockfileReader, OutputPresenter,
        ProgressReporter, ProjectConfigReader, ReportFormatter, SbomCodec,
    };
    pub use crate::sbom_generation::domain::{
        CycloneDxDocument, LicenseLookup, LicenseSet, LicensedPackage, Package, SbomDocument,
        SbomFormat, SbomMetadata, SpdxDocument,
    };
    pub use crate::sbom_generation::policies::LicensePriority;
    pub use crate::sbom_generation::services::{GroupFilter, GroupResolver, SbomGenerator};
    pub use crate::shared::Result;
}
