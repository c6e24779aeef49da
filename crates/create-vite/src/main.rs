//! create-vite - Scaffold a new Vite project from a framework template

mod logging;

use anyhow::Result;
use clap::Parser;
use colored::Color;
use scaffold_core::{CreateArgs, Framework, ProductConfig, TemplateCatalog, Variant};
use std::path::PathBuf;

/// Vite product configuration
#[derive(Clone)]
pub struct ViteConfig;

impl ProductConfig for ViteConfig {
    fn name(&self) -> &'static str {
        "create-vite"
    }

    fn display_name(&self) -> &'static str {
        "create-vite"
    }

    fn default_project_name(&self) -> &'static str {
        "vite-project"
    }

    fn templates_dir_env(&self) -> &'static str {
        "CREATE_VITE_TEMPLATES"
    }

    fn default_templates_dir(&self) -> PathBuf {
        // Installed layout: templates/ next to the binary
        let installed = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join("templates")));
        match installed {
            Some(dir) if dir.is_dir() => dir,
            _ => PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../../templates")),
        }
    }

    fn catalog(&self) -> TemplateCatalog {
        let typed = |name: &str| {
            vec![
                Variant::new(name, Color::Yellow),
                Variant::new(format!("{}-ts", name), Color::Blue),
            ]
        };

        TemplateCatalog::new(vec![
            Framework::new("vanilla", Color::Yellow, typed("vanilla")),
            Framework::new("vue", Color::Green, typed("vue")),
            Framework::new("react", Color::Cyan, typed("react")),
            Framework::new("preact", Color::Magenta, typed("preact")),
            Framework::new("lit", Color::BrightRed, typed("lit")),
            Framework::new("svelte", Color::Red, typed("svelte")),
        ])
    }
}

#[derive(Parser, Debug)]
#[command(name = "create-vite")]
#[command(about = "Scaffold a new Vite project")]
#[command(version)]
pub struct Args {
    /// Project directory to create
    pub target_dir: Option<String>,

    /// Template to use (a framework or variant name, e.g. react-ts)
    #[arg(short, long)]
    pub template: Option<String>,

    /// Local directory containing template-<name> folders (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl From<Args> for CreateArgs {
    fn from(args: Args) -> Self {
        let mut create = CreateArgs::new(args.target_dir.as_deref(), args.template);
        create.template_dir = args.template_dir;
        create
    }
}

fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    logging::init_logging(args.verbose, args.quiet)?;
    tracing::debug!(?args, "parsed arguments");

    let result = scaffold_core::run(&ViteConfig, args.into());

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}
