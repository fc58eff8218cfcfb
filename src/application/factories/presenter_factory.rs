use crate::adapters::outbound::filesystem::{FileSystemWriter, StdoutPresenter};
use crate::ports::outbound::OutputPresenter;
use std::path::PathBuf;

/// Where output ends up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterType {
    /// License reports
    Stdout,
    /// Generated documents, written atomically
    File(PathBuf),
}

/// Factory for creating output presenters
pub struct PresenterFactory;

impl PresenterFactory {
    /// # Examples
    /// ```
    /// use bundle_sbom::application::factories::{PresenterFactory, PresenterType};
    ///
    /// let presenter = PresenterFactory::create(PresenterType::Stdout);
    /// ```
    pub fn create(presenter_type: PresenterType) -> Box<dyn OutputPresenter> {
        match presenter_type {
            PresenterType::Stdout => Box::new(StdoutPresenter::new()),
            PresenterType::File(path) => Box::new(FileSystemWriter::new(path)),
        }
    }
}
