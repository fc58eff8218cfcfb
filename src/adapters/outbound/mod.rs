/// Outbound adapters - Infrastructure implementations of outbound ports
pub mod codecs;
pub mod console;
pub mod filesystem;
pub mod formatters;
pub mod network;
