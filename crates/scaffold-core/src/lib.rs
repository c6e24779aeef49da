//! Scaffold Core - Shared library for Vite-style project scaffolding CLIs
//!
//! Given a target directory and a framework/variant template, this library
//! materializes a new project: template files are copied with a small set of
//! renames, the package manifest gets its `name` rewritten, and follow-up
//! commands for the invoking package manager are reported.
//!
//! # Architecture
//!
//! - **Naming** - target directory normalization and package name rules
//! - **Templates** - catalog, directory tree copying, manifest rewriting
//! - **Runtime** - package manager detection from the invocation signature
//! - **Flow** - the ordered question sequence behind a [`Prompter`] seam
//! - **Scaffold** - writes the project for a completed [`Selection`]
//! - **TUI** - cliclack-backed prompter and interactive entry (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use scaffold_core::{CreateArgs, FlowOutcome, ScaffoldEngine, SelectionFlow};
//!
//! let args = CreateArgs::new(Some("my-app"), Some("vanilla-ts".into()));
//! let flow = SelectionFlow::new(&catalog, &cwd, "vite-project", &args);
//! if let FlowOutcome::Completed(selection) = flow.run(&mut my_prompter)? {
//!     ScaffoldEngine::from_config(&config, templates_root, cwd).scaffold(&selection)?;
//! }
//! ```

pub mod error;
pub mod flow;
pub mod naming;
pub mod product;
pub mod runtime;
pub mod scaffold;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use error::{Result, ScaffoldError};
pub use flow::{
    CancelReason, CreateArgs, FlowOutcome, Prompter, Question, Reply, Selection, SelectionFlow,
    TextPrompt,
};
pub use product::{ProductConfig, RenameRule};
pub use runtime::{detect, PackageManager, DEFAULT_PACKAGE_MANAGER};
pub use scaffold::{next_steps, ScaffoldEngine, ScaffoldReport};
pub use templates::{Framework, TemplateCatalog, Variant};

#[cfg(feature = "tui")]
pub use tui::run;
