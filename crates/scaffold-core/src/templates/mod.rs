//! Template catalog, copying, and manifest rewriting
//!
//! This module provides:
//! - The framework/variant catalog and its `catalog.yaml` override
//! - Directory tree operations (emptiness check, emptying, recursive copy)
//! - Package manifest `name` rewriting

pub mod catalog;
pub mod copier;
pub mod manifest;

pub use catalog::{Framework, TemplateCatalog, Variant, CATALOG_FILE};
pub use copier::{copy_entry, empty_dir, is_empty_dir};
pub use manifest::rename_manifest;
