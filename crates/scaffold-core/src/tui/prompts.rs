//! Charm-style CLI prompts using cliclack

use crate::flow::{CreateArgs, FlowOutcome, Prompter, Reply, SelectionFlow, TextPrompt};
use crate::product::ProductConfig;
use crate::runtime::package_manager;
use crate::scaffold::{next_steps, ScaffoldEngine};
use crate::templates::catalog::TemplateCatalog;
use anyhow::{Context, Result};
use colored::ColoredString;
use std::io;
use tracing::debug;

/// [`Prompter`] backed by cliclack; Esc and Ctrl-C abort the current question
pub struct CliclackPrompter;

fn interrupted<T>(result: io::Result<T>) -> io::Result<Reply<T>> {
    match result {
        Ok(value) => Ok(Reply::Answered(value)),
        Err(e) if e.kind() == io::ErrorKind::Interrupted => Ok(Reply::Aborted),
        Err(e) => Err(e),
    }
}

impl Prompter for CliclackPrompter {
    fn text(&mut self, prompt: &TextPrompt<'_>) -> io::Result<Reply<String>> {
        let mut input = cliclack::input(prompt.message);
        if let Some(default) = &prompt.default {
            input = input.placeholder(default).default_input(default);
        }
        if let Some(validate) = prompt.validate {
            input = input.validate(move |value: &String| validate(value));
        }
        interrupted(input.interact())
    }

    fn confirm(&mut self, message: &str) -> io::Result<Reply<bool>> {
        interrupted(cliclack::confirm(message).interact())
    }

    fn select(&mut self, message: &str, choices: &[ColoredString]) -> io::Result<Reply<usize>> {
        let mut select = cliclack::select(message).initial_value(0);
        for (idx, choice) in choices.iter().enumerate() {
            select = select.item(idx, choice.to_string(), "");
        }
        interrupted(select.interact())
    }
}

/// Run the CLI with interactive prompts
pub fn run<C: ProductConfig>(config: &C, args: CreateArgs) -> Result<()> {
    cliclack::intro(config.display_name())?;

    let cwd = std::env::current_dir().context("Failed to read the working directory")?;
    let templates_root = config.templates_dir(args.template_dir.clone());
    debug!(templates_root = %templates_root.display(), "resolved templates root");

    let catalog = match TemplateCatalog::load_override(&templates_root)? {
        Some(catalog) => {
            cliclack::log::info(format!(
                "Using template catalog from {}",
                templates_root.display()
            ))?;
            catalog
        }
        None => config.catalog(),
    };

    // Step 1: Ask the questions
    let flow = SelectionFlow::new(&catalog, &cwd, config.default_project_name(), &args);
    let selection = match flow.run(&mut CliclackPrompter)? {
        FlowOutcome::Completed(selection) => selection,
        FlowOutcome::Cancelled(reason) => {
            cliclack::outro_cancel(reason.to_string())?;
            return Ok(());
        }
    };

    // Step 2: Write the project
    let engine = ScaffoldEngine::from_config(config, templates_root, cwd.clone());
    let root = engine.project_root(&selection);
    let spinner = cliclack::spinner();
    spinner.start(format!("Scaffolding project in {}...", root.display()));
    let report = match engine.scaffold(&selection) {
        Ok(report) => report,
        Err(e) => {
            spinner.stop("Scaffolding failed");
            return Err(e.into());
        }
    };
    spinner.stop(format!(
        "Created {} entries in {}",
        report.entries.len(),
        report.root.display()
    ));

    // Step 3: Show next steps
    let signature = std::env::var(config.user_agent_env()).ok();
    let manager = package_manager::detect(signature.as_deref());
    debug!(?manager, "detected package manager");

    println!();
    println!("  Done. Now run:");
    println!();
    for step in next_steps(&cwd, &report.root, manager.as_ref()) {
        println!("  {}", step);
    }
    println!();

    cliclack::outro("Happy coding!")?;

    Ok(())
}
