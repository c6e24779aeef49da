//! Target directory and package name utilities

use regex_lite::Regex;
use std::path::Path;
use std::sync::OnceLock;

/// Marker for "scaffold into the working directory".
pub const CURRENT_DIR: &str = ".";

fn package_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?:@[a-z0-9\-*~][a-z0-9\-*._~]*/)?[a-z0-9\-~][a-z0-9\-._~]*$")
            .expect("package name pattern is valid")
    })
}

fn whitespace_run() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern is valid"))
}

fn invalid_run() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[^a-z0-9\-~]+").expect("invalid-run pattern is valid"))
}

/// Trim whitespace and strip every trailing `/`.
pub fn normalize_target(raw: Option<&str>) -> Option<String> {
    raw.map(|dir| dir.trim().trim_end_matches('/').to_string())
}

/// Project name implied by a target directory.
///
/// `.` resolves to the base name of `cwd`; anything else is returned as-is.
pub fn project_name_from_target(target_dir: &str, cwd: &Path) -> String {
    if target_dir == CURRENT_DIR {
        cwd.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    } else {
        target_dir.to_string()
    }
}

/// Whether `name` is acceptable as the `name` field of a package.json.
pub fn is_valid_package_name(name: &str) -> bool {
    package_name_pattern().is_match(name)
}

/// Coerce `name` into a valid package name.
///
/// Names that already validate are returned unchanged, so scoped names and
/// names containing `.` or `_` survive.
pub fn to_valid_package_name(name: &str) -> String {
    if is_valid_package_name(name) {
        return name.to_string();
    }

    let lowered = name.trim().to_lowercase();
    let hyphenated = whitespace_run().replace_all(&lowered, "-");
    let stripped = hyphenated
        .strip_prefix(['.', '_'])
        .unwrap_or(&hyphenated);
    invalid_run().replace_all(stripped, "-").into_owned()
}
