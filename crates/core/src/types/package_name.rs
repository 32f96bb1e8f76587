use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A validated package name.
///
/// Names are restricted to ASCII alphanumerics plus `-`, `_` and `.` so
/// they can be embedded directly in cache file names and source paths.
/// Scoped names (`@scope/name`) are out of scope for now.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageName(String);

impl PackageName {
    pub fn new(name: impl Into<String>) -> Result<Self, PackageNameError> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(name: &str) -> Result<(), PackageNameError> {
        if name.is_empty() {
            return Err(PackageNameError::Empty);
        }

        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        {
            return Err(PackageNameError::InvalidFormat(name.to_string()));
        }

        Ok(())
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PackageName {
    type Err = PackageNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for PackageName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<PackageName> for String {
    fn from(name: PackageName) -> Self {
        name.0
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PackageNameError {
    #[error("Package name cannot be empty")]
    Empty,
    #[error("Invalid package name: {0}")]
    InvalidFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert!(PackageName::new("react").is_ok());
        assert!(PackageName::new("next").is_ok());
        assert!(PackageName::new("hono").is_ok());
        assert!(PackageName::new("my-package_2.0").is_ok());
    }

    #[test]
    fn test_invalid_names() {
        assert!(PackageName::new("").is_err());
        assert!(PackageName::new("@scope/pkg").is_err());
        assert!(PackageName::new("../escape").is_err());
        assert!(PackageName::new("name with spaces").is_err());
    }

    #[test]
    fn test_display_and_from_str() {
        let name: PackageName = "react".parse().unwrap();
        assert_eq!(name.to_string(), "react");
        assert_eq!(name.as_str(), "react");
    }
}
