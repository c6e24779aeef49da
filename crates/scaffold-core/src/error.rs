//! Error taxonomy for scaffolding
//!
//! User cancellation is not represented here: it is a normal outcome of the
//! selection flow (see [`crate::flow::FlowOutcome`]). Invalid package names are
//! recovered by re-prompting and never surface as errors either.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScaffoldError>;

#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// The resolved template identifier has no template directory.
    #[error("Template \"{id}\" not found (expected {})", path.display())]
    TemplateNotFound { id: String, path: PathBuf },

    #[error("No template was selected")]
    NoTemplate,

    #[error("Failed to parse manifest {}", path.display())]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Manifest {} is not a JSON object", path.display())]
    ManifestNotObject { path: PathBuf },

    #[error("Failed to parse template catalog {}", path.display())]
    CatalogParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Symlinks and special files inside a template are refused.
    #[error("Unsupported file type in template: {}", path.display())]
    UnsupportedEntry { path: PathBuf },

    #[error("{context}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error("Prompt failed")]
    Prompt(#[source] io::Error),
}

impl ScaffoldError {
    pub(crate) fn io(context: impl Into<String>) -> impl FnOnce(io::Error) -> Self {
        let context = context.into();
        move |source| Self::Io { context, source }
    }
}
