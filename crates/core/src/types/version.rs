use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A concrete version string such as `"4.7.5"`, or the symbolic `"latest"`.
///
/// Validation is deliberately loose: dot-separated fields of ASCII
/// alphanumerics with optional `-`/`_`/`+` (pre-release tags are accepted
/// and handled by the comparator's documented zero policy). Characters
/// that cannot appear in a cache file name are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Version(String);

impl Version {
    pub fn new(version: impl Into<String>) -> Result<Self, VersionError> {
        let version = version.into();
        Self::validate(&version)?;
        Ok(Self(version))
    }

    pub fn latest() -> Self {
        Self("latest".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_latest(&self) -> bool {
        self.0 == "latest"
    }

    fn validate(version: &str) -> Result<(), VersionError> {
        if version.is_empty() {
            return Err(VersionError::Empty);
        }

        if version == "latest" {
            return Ok(());
        }

        if !version
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | '+'))
        {
            return Err(VersionError::InvalidFormat(version.to_string()));
        }

        if version.split('.').any(|field| field.is_empty()) {
            return Err(VersionError::InvalidFormat(version.to_string()));
        }

        Ok(())
    }
}

impl Default for Version {
    fn default() -> Self {
        Self::latest()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for Version {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.0
    }
}

#[derive(Debug, thiserror::Error)]
pub enum VersionError {
    #[error("Version cannot be empty")]
    Empty,
    #[error("Invalid version format: {0}")]
    InvalidFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_versions() {
        assert!(Version::new("1.0.0").is_ok());
        assert!(Version::new("4.7").is_ok());
        assert!(Version::new("1.0.0-beta").is_ok());
        assert!(Version::new("latest").is_ok());
    }

    #[test]
    fn test_invalid_versions() {
        assert!(Version::new("").is_err());
        assert!(Version::new("1..0").is_err());
        assert!(Version::new("1.0/0").is_err());
        assert!(Version::new("1.0 0").is_err());
    }

    #[test]
    fn test_latest() {
        assert!(Version::latest().is_latest());
        assert!(!Version::new("1.0.0").unwrap().is_latest());
        assert_eq!(Version::default().as_str(), "latest");
    }
}
