//! Package manager detection from the invocation signature
//!
//! Package managers export a user agent like `pnpm/8.6.0 npm/? node/v18.16.0`
//! to the processes they spawn. Only the first token is inspected.

/// Manager assumed when no signature is available
pub const DEFAULT_PACKAGE_MANAGER: &str = "npm";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageManager {
    pub name: String,
    pub version: Option<String>,
}

/// Parse an invocation signature into a manager name and version.
///
/// No validation is performed on either part.
pub fn detect(signature: Option<&str>) -> Option<PackageManager> {
    let signature = signature.filter(|s| !s.is_empty())?;
    let spec = signature.split_whitespace().next().unwrap_or_default();
    let mut parts = spec.split('/');

    Some(PackageManager {
        name: parts.next().unwrap_or_default().to_string(),
        version: parts.next().map(str::to_string),
    })
}

impl PackageManager {
    /// Commands that install dependencies and start the dev server
    pub fn run_commands(name: &str) -> Vec<String> {
        match name {
            "yarn" => vec!["yarn".to_string(), "yarn dev".to_string()],
            _ => vec![format!("{} install", name), format!("{} run dev", name)],
        }
    }
}
