/// ProgressReporter port for user feedback during generation
///
/// All feedback goes here so that stdout stays reserved for reports.
pub trait ProgressReporter {
    /// Reports an informational message
    fn report(&self, message: &str);

    /// Reports license lookup progress
    ///
    /// # Arguments
    /// * `current` - Lookups completed so far
    /// * `total` - Total lookups
    /// * `message` - Optional detail, usually the gem being looked up
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports a warning; generation continues
    fn report_error(&self, message: &str);

    /// Reports completion of an operation
    fn report_completion(&self, message: &str);
}
