use odocs_core::DetectedPackage;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

/// Packages the current scope knows how to serve documentation for.
/// Extending support is a matter of adding names here.
pub const SUPPORTED_PACKAGES: &[&str] = &["hono", "next", "react"];

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    dependencies: BTreeMap<String, String>,
    #[serde(default, rename = "devDependencies")]
    dev_dependencies: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct InstalledManifest {
    version: String,
}

/// Detect supported packages in `project_dir` by reading its
/// `package.json` and the installed manifests under `node_modules`.
///
/// The declared specifier is ignored in favor of the version actually
/// installed. Packages listed but not installed are logged and skipped;
/// a missing or unreadable manifest yields an empty result rather than
/// an error.
pub async fn detect_packages(project_dir: &Path) -> Vec<DetectedPackage> {
    let manifest_path = project_dir.join("package.json");
    let manifest: Manifest = match tokio::fs::read_to_string(&manifest_path).await {
        Ok(text) => match serde_json::from_str(&text) {
            Ok(manifest) => manifest,
            Err(e) => {
                warn!(path = %manifest_path.display(), error = %e, "Could not parse package.json");
                return Vec::new();
            }
        },
        Err(e) => {
            debug!(path = %manifest_path.display(), error = %e, "No readable package.json");
            return Vec::new();
        }
    };

    let mut declared = manifest.dependencies;
    declared.extend(manifest.dev_dependencies);

    let mut detected = Vec::new();
    for name in declared.keys() {
        if !SUPPORTED_PACKAGES.contains(&name.as_str()) {
            continue;
        }

        let installed_path = project_dir.join("node_modules").join(name);
        let installed_manifest = installed_path.join("package.json");
        match tokio::fs::read_to_string(&installed_manifest).await {
            Ok(text) => match serde_json::from_str::<InstalledManifest>(&text) {
                Ok(installed) => {
                    detected.push(DetectedPackage {
                        name: name.clone(),
                        version: installed.version,
                        installed_path,
                    });
                }
                Err(e) => {
                    warn!(package = %name, error = %e, "Could not parse installed package.json");
                }
            },
            Err(_) => {
                warn!(package = %name, "Package is in package.json but not installed");
            }
        }
    }

    detected
}
