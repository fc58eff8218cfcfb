use crate::shared::Result;

/// OutputPresenter port for presenting final output
///
/// Destinations are a file (generated SBOMs) or stdout (license reports).
pub trait OutputPresenter {
    /// Presents the content to the output destination
    ///
    /// # Errors
    /// Returns an error if:
    /// - Writing to the output destination fails
    /// - The destination is a symbolic link
    fn present(&self, content: &str) -> Result<()>;
}
