/// Crate-wide Result alias; every layer propagates `anyhow::Error` and
/// attaches `SbomError` variants where the caller needs to match on them.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
