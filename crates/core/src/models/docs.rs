use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A version-pinned documentation body.
///
/// Immutable once produced and identified uniquely by
/// `(package, version)`; `content` is an opaque markdown blob. This is
/// also the JSON shape served to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Documentation {
    pub package: String,
    pub version: String,
    pub content: String,
}

impl Documentation {
    pub fn new(
        package: impl Into<String>,
        version: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            package: package.into(),
            version: version.into(),
            content: content.into(),
        }
    }
}

/// Per-package pointer record declaring which concrete version is
/// "latest", read from `<source>/<package>/latest.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatestPointer {
    pub version: String,
}

/// A package detected in the surrounding project, with the version that
/// is actually installed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedPackage {
    pub name: String,
    pub version: String,
    pub installed_path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documentation_serialization_shape() {
        let doc = Documentation::new("hono", "4.7.5", "# Hono\n");
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["package"], "hono");
        assert_eq!(json["version"], "4.7.5");
        assert_eq!(json["content"], "# Hono\n");
    }

    #[test]
    fn test_latest_pointer_ignores_extra_fields() {
        let pointer: LatestPointer =
            serde_json::from_str(r#"{"version": "4.7.5", "published": "2025-01-01"}"#).unwrap();
        assert_eq!(pointer.version, "4.7.5");
    }

    #[test]
    fn test_detected_package_uses_camel_case() {
        let pkg = DetectedPackage {
            name: "react".to_string(),
            version: "19.0.0".to_string(),
            installed_path: PathBuf::from("/project/node_modules/react"),
        };
        let json = serde_json::to_value(&pkg).unwrap();
        assert!(json.get("installedPath").is_some());
    }
}
