/// Adapters layer - Infrastructure implementations
///
/// Concrete implementations of the outbound ports: the filesystem, the
/// RubyGems API, document codecs and console output.
pub mod outbound;
