//! Framework and variant catalog
//!
//! The catalog is an ordered, read-only registry. Products ship a built-in one;
//! a `catalog.yaml` at the root of the templates directory replaces it.

use crate::error::{Result, ScaffoldError};
use colored::{Color, ColoredString, Colorize};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// File name of the catalog override inside a templates root.
pub const CATALOG_FILE: &str = "catalog.yaml";

/// A named sub-option of a framework (e.g. typed vs. untyped)
#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
    pub name: String,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Framework {
    pub name: String,
    pub color: Color,
    /// Empty when the framework has no variants
    pub variants: Vec<Variant>,
}

impl Variant {
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }

    pub fn display(&self) -> ColoredString {
        self.name.as_str().color(self.color)
    }
}

impl Framework {
    pub fn new(name: impl Into<String>, color: Color, variants: Vec<Variant>) -> Self {
        Self {
            name: name.into(),
            color,
            variants,
        }
    }

    pub fn has_variants(&self) -> bool {
        !self.variants.is_empty()
    }

    pub fn display(&self) -> ColoredString {
        self.name.as_str().color(self.color)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemplateCatalog {
    frameworks: Vec<Framework>,
}

impl TemplateCatalog {
    pub fn new(frameworks: Vec<Framework>) -> Self {
        Self { frameworks }
    }

    /// Frameworks in catalog order
    pub fn frameworks(&self) -> &[Framework] {
        &self.frameworks
    }

    /// Every framework name followed by its variant names, in catalog order
    pub fn template_ids(&self) -> impl Iterator<Item = &str> {
        self.frameworks.iter().flat_map(|framework| {
            std::iter::once(framework.name.as_str())
                .chain(framework.variants.iter().map(|v| v.name.as_str()))
        })
    }

    /// Check if `id` names a framework or a variant
    pub fn contains(&self, id: &str) -> bool {
        self.template_ids().any(|known| known == id)
    }

    /// Load `<templates_root>/catalog.yaml` if present
    pub fn load_override(templates_root: &Path) -> Result<Option<Self>> {
        let path = templates_root.join(CATALOG_FILE);
        if !path.is_file() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .map_err(ScaffoldError::io(format!("Failed to read {}", path.display())))?;
        let file: CatalogFile = serde_yaml::from_str(&content)
            .map_err(|source| ScaffoldError::CatalogParse { path, source })?;
        Ok(Some(file.into()))
    }
}

/// On-disk form of the catalog (`catalog.yaml`)
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogFile {
    frameworks: Vec<FrameworkEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FrameworkEntry {
    name: String,
    /// Color name, e.g. `yellow` or `bright red`
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    variants: Vec<VariantEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct VariantEntry {
    name: String,
    #[serde(default)]
    color: Option<String>,
}

fn parse_color(name: Option<&str>) -> Color {
    name.map(Color::from).unwrap_or(Color::White)
}

impl From<CatalogFile> for TemplateCatalog {
    fn from(file: CatalogFile) -> Self {
        let frameworks = file
            .frameworks
            .into_iter()
            .map(|entry| Framework {
                color: parse_color(entry.color.as_deref()),
                variants: entry
                    .variants
                    .into_iter()
                    .map(|v| Variant {
                        color: parse_color(v.color.as_deref()),
                        name: v.name,
                    })
                    .collect(),
                name: entry.name,
            })
            .collect();
        Self::new(frameworks)
    }
}
