//! Detection of the package manager that launched the scaffolder

pub mod package_manager;

pub use package_manager::{detect, PackageManager, DEFAULT_PACKAGE_MANAGER};
