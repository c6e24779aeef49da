//! Product configuration trait for CLI binaries
//!
//! This trait defines what a scaffolding binary must supply: its identity,
//! where templates live, the built-in catalog, and the manifest and rename
//! conventions of its templates.

use crate::templates::catalog::TemplateCatalog;
use std::path::PathBuf;

/// Template-internal file name and the name it is written under
pub type RenameRule = (&'static str, &'static str);

/// Configuration trait for scaffolding products
pub trait ProductConfig {
    /// Internal product name (used for the CLI command)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Project name offered when no target directory was given
    fn default_project_name(&self) -> &'static str;

    /// Manifest file whose `name` field is rewritten
    fn manifest_file(&self) -> &'static str {
        "package.json"
    }

    /// Top-level template files renamed on copy
    fn rename_rules(&self) -> &'static [RenameRule] {
        &[("_gitignore", ".gitignore")]
    }

    /// Environment variable holding the invocation signature
    fn user_agent_env(&self) -> &'static str {
        "npm_config_user_agent"
    }

    /// Environment variable overriding the templates root
    fn templates_dir_env(&self) -> &'static str;

    /// Templates root used when neither flag nor environment override it
    fn default_templates_dir(&self) -> PathBuf;

    /// Built-in framework catalog
    fn catalog(&self) -> TemplateCatalog;

    /// Resolve the templates root: explicit flag, then environment, then default
    fn templates_dir(&self, explicit: Option<PathBuf>) -> PathBuf {
        explicit
            .or_else(|| std::env::var_os(self.templates_dir_env()).map(PathBuf::from))
            .unwrap_or_else(|| self.default_templates_dir())
    }
}
