pub mod error;
pub mod loader;

pub use error::ConfigError;
pub use loader::{build_manifest, load_manifest};
