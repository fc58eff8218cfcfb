use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Generate SBOMs for Ruby projects managed by Bundler
#[derive(Parser, Debug)]
#[command(name = "bundle-sbom")]
#[command(version)]
#[command(about = "Generate SPDX and CycloneDX SBOMs for Bundler projects", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate an SBOM from Gemfile.lock and write it to a file
    Dump(DumpArgs),
    /// Print a license report for an existing SBOM
    License(LicenseArgs),
}

#[derive(clap::Args, Debug, Default)]
pub struct DumpArgs {
    /// Output format: json or xml
    #[arg(short, long)]
    pub format: Option<String>,

    /// SBOM format: spdx or cyclonedx
    #[arg(short, long)]
    pub sbom: Option<String>,

    /// Path to the project directory (defaults to current directory)
    #[arg(short, long)]
    pub path: Option<PathBuf>,

    /// Output file path (defaults to bom.json, bom.xml, bom-cyclonedx.json or
    /// bom-cyclonedx.xml inside the project directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Leave out gems that only belong to these Bundler groups.
    /// Can be given several times or as a list: -w development:test
    #[arg(short, long = "without", value_name = "GROUP")]
    pub without: Vec<String>,

    /// Look up licenses on rubygems.org instead of installed gemspecs
    #[arg(long)]
    pub remote: bool,

    /// Additional gem directory to search for installed gemspecs
    #[arg(long = "gem-path", value_name = "DIR")]
    pub gem_paths: Vec<PathBuf>,

    /// Path to a config file (defaults to bundle-sbom.config.yml in the project directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(clap::Args, Debug, Default)]
pub struct LicenseArgs {
    /// SBOM file to read (defaults to probing the standard file names)
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Output format of the SBOM: json or xml
    #[arg(short, long)]
    pub format: Option<String>,

    /// SBOM format: spdx or cyclonedx
    #[arg(short, long)]
    pub sbom: Option<String>,

    /// Directory searched for SBOM files (defaults to current directory)
    #[arg(short, long)]
    pub path: Option<PathBuf>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl DumpArgs {
    /// Group names with list separators expanded
    pub fn without_groups(&self) -> Vec<String> {
        split_groups(&self.without)
    }
}

/// Splits `development:test` and `development,test` into separate names
pub fn split_groups(values: &[String]) -> Vec<String> {
    values
        .iter()
        .flat_map(|value| value.split([':', ',']))
        .map(str::trim)
        .filter(|group| !group.is_empty())
        .map(str::to_string)
        .collect()
}
