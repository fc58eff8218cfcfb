pub mod license_priority;

pub use license_priority::LicensePriority;
