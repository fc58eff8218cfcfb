/// Domain layer - SBOM documents, value objects and pure services
pub mod domain;
pub mod policies;
pub mod services;
