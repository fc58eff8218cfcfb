mod adapters;
mod application;
mod cli;
mod config;
mod ports;
mod sbom_generation;
mod shared;

use adapters::outbound::console::StderrProgressReporter;
use adapters::outbound::filesystem::{FileSystemReader, InstalledGemLicenseRepository};
use adapters::outbound::formatters::TextReportFormatter;
use adapters::outbound::network::RubyGemsLicenseRepository;
use application::dto::{LicenseReportRequest, OutputFormat, SbomRequest, SbomResponse};
use application::factories::{CodecFactory, PresenterFactory, PresenterType};
use application::use_cases::{GenerateSbomUseCase, ReportLicensesUseCase};
use cli::{Args, Command, DumpArgs, LicenseArgs};
use config::ConfigFile;
use ports::outbound::{LicenseRepository, ReportFormatter};
use sbom_generation::domain::SbomFormat;
use shared::error::{ExitCode, SbomError};
use shared::Result;
use std::path::{Path, PathBuf};
use std::process;
use std::str::FromStr;

#[tokio::main]
async fn main() {
    // clap exits with code 2 on argument errors
    let args = Args::parse_args();

    let result = match args.command {
        Command::Dump(dump_args) => run_dump(dump_args).await,
        Command::License(license_args) => run_license(license_args),
    };

    if let Err(e) = result {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        process::exit(ExitCode::ApplicationError.as_i32());
    }
}

/// Settings for `dump` after merging CLI flags, config file and defaults
#[derive(Debug)]
struct DumpSettings {
    output_format: OutputFormat,
    sbom_format: SbomFormat,
    without: Vec<String>,
    remote: bool,
    gem_paths: Vec<PathBuf>,
}

impl DumpSettings {
    /// CLI flags win over the config file, which wins over defaults
    fn resolve(args: &DumpArgs, config: ConfigFile, project_path: &Path) -> Result<Self> {
        let cli_format = parse_selector::<OutputFormat>(args.format.as_deref())?;
        let cli_sbom = parse_selector::<SbomFormat>(args.sbom.as_deref())?;
        let config_format = parse_selector::<OutputFormat>(config.format.as_deref())?;
        let config_sbom = parse_selector::<SbomFormat>(config.sbom.as_deref())?;

        let cli_without = args.without_groups();
        let without = if cli_without.is_empty() {
            cli::split_groups(&config.without.unwrap_or_default())
        } else {
            cli_without
        };

        // Config paths are relative to the project directory
        let mut gem_paths = args.gem_paths.clone();
        gem_paths.extend(
            config
                .gem_paths
                .unwrap_or_default()
                .into_iter()
                .map(|p| if p.is_absolute() { p } else { project_path.join(p) }),
        );

        Ok(Self {
            output_format: cli_format.or(config_format).unwrap_or_default(),
            sbom_format: cli_sbom.or(config_sbom).unwrap_or_default(),
            without,
            remote: args.remote || config.remote.unwrap_or(false),
            gem_paths,
        })
    }
}

fn parse_selector<T>(value: Option<&str>) -> Result<Option<T>>
where
    T: FromStr<Err = SbomError>,
{
    Ok(value.map(T::from_str).transpose()?)
}

async fn run_dump(args: DumpArgs) -> Result<()> {
    // Reject bad selectors before touching the filesystem
    parse_selector::<OutputFormat>(args.format.as_deref())?;
    parse_selector::<SbomFormat>(args.sbom.as_deref())?;

    let project_path = args.path.clone().unwrap_or_else(|| PathBuf::from("."));
    validate_project_path(&project_path)?;

    let config = match &args.config {
        Some(path) => {
            let loaded = config::load_config_from_path(path)?;
            eprintln!("📄 Loaded config from: {}", path.display());
            Some(loaded)
        }
        None => {
            let discovered = config::discover_config(&project_path)?;
            if discovered.is_some() {
                eprintln!(
                    "📄 Auto-discovered config file: {}",
                    project_path.join(config::CONFIG_FILENAME).display()
                );
            }
            discovered
        }
    }
    .unwrap_or_default();
    let settings = DumpSettings::resolve(&args, config, &project_path)?;

    let request = SbomRequest::new(
        project_path,
        settings.sbom_format,
        settings.output_format,
        settings.without,
    );
    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| request.default_output_path());

    let response = if settings.remote {
        let repository = RubyGemsLicenseRepository::new()?;
        generate(repository, request).await?
    } else {
        let repository = InstalledGemLicenseRepository::from_environment(settings.gem_paths)?;
        generate(repository, request).await?
    };

    eprintln!(
        "{}",
        CodecFactory::progress_message(settings.sbom_format, settings.output_format)
    );
    let encoded = CodecFactory::create(settings.output_format).encode(&response.document)?;
    PresenterFactory::create(PresenterType::File(output_path.clone())).present(&encoded)?;

    println!(
        "Generated {} SBOM at {}",
        settings.sbom_format.label(),
        output_path.display()
    );
    if let Some(warning) = lookup_failure_summary(&response) {
        eprintln!("{}", warning);
    }
    Ok(())
}

fn lookup_failure_summary(response: &SbomResponse) -> Option<String> {
    if response.lookup_failures == 0 {
        return None;
    }
    Some(format!(
        "⚠️  {} of {} package(s) have no license data because the lookup failed",
        response.lookup_failures,
        response.document.package_count()
    ))
}

async fn generate<R: LicenseRepository>(repository: R, request: SbomRequest) -> Result<SbomResponse> {
    let use_case = GenerateSbomUseCase::new(
        FileSystemReader::new(),
        FileSystemReader::new(),
        repository,
        StderrProgressReporter::new(),
    );
    use_case.execute(request).await
}

fn run_license(args: LicenseArgs) -> Result<()> {
    let output_format = parse_selector::<OutputFormat>(args.format.as_deref())?;
    let sbom_format = parse_selector::<SbomFormat>(args.sbom.as_deref())?;

    let request = LicenseReportRequest {
        project_path: args.path.unwrap_or_else(|| PathBuf::from(".")),
        file: args.file,
        output_format,
        sbom_format,
    };

    let response = ReportLicensesUseCase::new(FileSystemReader::new()).execute(request)?;
    let report = TextReportFormatter::new().format(&response.report);
    PresenterFactory::create(PresenterType::Stdout).present(&report)?;
    Ok(())
}

fn validate_project_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(SbomError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Directory does not exist".to_string(),
        }
        .into());
    }

    // Security check: Reject symbolic links for project paths
    let metadata = std::fs::symlink_metadata(path).map_err(|e| SbomError::InvalidProjectPath {
        path: path.to_path_buf(),
        reason: format!("Failed to read path metadata: {}", e),
    })?;

    if metadata.is_symlink() {
        return Err(SbomError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Security: Project path is a symbolic link. For security reasons, symbolic links are not allowed.".to_string(),
        }
        .into());
    }

    if !path.is_dir() {
        return Err(SbomError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Not a directory".to_string(),
        }
        .into());
    }

    Ok(())
}
