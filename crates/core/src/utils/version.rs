//! Version comparison and range-satisfaction utilities.
//!
//! Versions are compared field-by-field as non-negative integers, with
//! missing trailing fields treated as `0`, so `"4.7"` equals `"4.7.0"`.

use std::cmp::Ordering;

/// Specifier used when a caller does not pin a version
pub const DEFAULT_SPECIFIER: &str = "latest";

/// Numeric value of a single version field.
///
/// Policy for non-numeric fields: the field is reduced to the decimal
/// digits it starts with, after stripping any `-` pre-release suffix, and
/// falls back to `0` when none remain. So `"0-beta"` is `0`, `"rc1"` is
/// `0`, and `"1.0.0-beta"` compares equal to `"1.0.0"`.
fn field_value(field: &str) -> u64 {
    let release = field.split('-').next().unwrap_or(field);
    let digits: &str = release
        .split_once(|c: char| !c.is_ascii_digit())
        .map(|(prefix, _)| prefix)
        .unwrap_or(release);
    digits.parse().unwrap_or(0)
}

/// Compare two version strings field-wise.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let a_fields: Vec<&str> = a.split('.').collect();
    let b_fields: Vec<&str> = b.split('.').collect();

    for i in 0..a_fields.len().max(b_fields.len()) {
        let a_value = a_fields.get(i).copied().map(field_value).unwrap_or(0);
        let b_value = b_fields.get(i).copied().map(field_value).unwrap_or(0);

        match a_value.cmp(&b_value) {
            Ordering::Equal => continue,
            other => return other,
        }
    }

    Ordering::Equal
}

/// Check whether a concrete version satisfies a specifier.
///
/// Recognized specifiers: `"*"` and `"latest"` (always true), the
/// relational prefixes `>=`, `>`, `<=`, `<`, an `=` prefix, and a bare
/// version meaning exact match. Exact matches go through
/// [`compare_versions`] rather than string equality so that zero padding
/// is tolerated (`"=4.7"` matches `"4.7.0"`).
pub fn satisfies_version(version: &str, specifier: &str) -> bool {
    let specifier = specifier.trim();

    if specifier == "*" || specifier == DEFAULT_SPECIFIER {
        return true;
    }

    if let Some(rest) = specifier.strip_prefix(">=") {
        return compare_versions(version, rest.trim()) != Ordering::Less;
    }
    if let Some(rest) = specifier.strip_prefix("<=") {
        return compare_versions(version, rest.trim()) != Ordering::Greater;
    }
    if let Some(rest) = specifier.strip_prefix('>') {
        return compare_versions(version, rest.trim()) == Ordering::Greater;
    }
    if let Some(rest) = specifier.strip_prefix('<') {
        return compare_versions(version, rest.trim()) == Ordering::Less;
    }
    if let Some(rest) = specifier.strip_prefix('=') {
        return compare_versions(version, rest.trim()) == Ordering::Equal;
    }

    compare_versions(version, specifier) == Ordering::Equal
}

/// Normalize a caller-supplied specifier.
///
/// Empty or whitespace-only input becomes `"latest"`; anything else is
/// returned trimmed.
pub fn normalize_specifier(specifier: &str) -> String {
    let trimmed = specifier.trim();
    if trimmed.is_empty() {
        DEFAULT_SPECIFIER.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Check whether a specifier asks for the latest version
pub fn is_latest_specifier(specifier: &str) -> bool {
    normalize_specifier(specifier) == DEFAULT_SPECIFIER
}
