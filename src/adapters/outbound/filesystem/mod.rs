/// Filesystem adapters for file I/O operations
mod file_reader;
mod file_writer;
mod gemfile_lock_parser;
mod gemfile_parser;
mod installed_gem_repository;

pub use file_reader::FileSystemReader;
pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use gemfile_lock_parser::parse_lockfile;
pub use gemfile_parser::parse_gemfile_groups;
pub use installed_gem_repository::InstalledGemLicenseRepository;
