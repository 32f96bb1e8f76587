mod package_name;
mod version;

pub use package_name::{PackageName, PackageNameError};
pub use version::{Version, VersionError};
