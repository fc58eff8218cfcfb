/// Network adapters for external API calls
mod rubygems_client;

pub use rubygems_client::RubyGemsLicenseRepository;
