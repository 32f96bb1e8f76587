pub mod error;
pub mod models;
pub mod types;
pub mod utils;

pub use error::{CacheError, DocsError, Error, NetworkError, Result};

// Re-export commonly used models and types for convenience
pub use models::docs::{DetectedPackage, Documentation, LatestPointer};
pub use types::{PackageName, PackageNameError, Version, VersionError};

// Re-export version utilities
pub use utils::version::{
    compare_versions, is_latest_specifier, normalize_specifier, satisfies_version,
    DEFAULT_SPECIFIER,
};
