//! Interactive selection flow
//!
//! Questions are visited strictly in [`Question::ORDER`]. Each one checks
//! whether it can be skipped given the answers so far, and any aborted
//! question ends the flow in [`FlowOutcome::Cancelled`].

use crate::error::{Result, ScaffoldError};
use crate::naming::{
    is_valid_package_name, normalize_target, project_name_from_target, to_valid_package_name,
    CURRENT_DIR,
};
use crate::templates::catalog::{Framework, TemplateCatalog};
use crate::templates::copier::is_empty_dir;
use colored::ColoredString;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Validator message shown when a package name is rejected
pub const INVALID_PACKAGE_NAME: &str = "Invalid package.json name";

/// Arguments collected from the command line
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Project directory to create (already normalized)
    pub target_dir: Option<String>,

    /// Template identifier from `--template`/`-t`
    pub template: Option<String>,

    /// Local directory holding `template-<id>` folders
    pub template_dir: Option<PathBuf>,
}

impl CreateArgs {
    pub fn new(target_dir: Option<&str>, template: Option<String>) -> Self {
        Self {
            target_dir: normalize_target(target_dir).filter(|dir| !dir.is_empty()),
            template,
            template_dir: None,
        }
    }
}

/// Answer from the prompt collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply<T> {
    Answered(T),
    Aborted,
}

/// Free-text question
pub struct TextPrompt<'a> {
    pub message: &'a str,
    pub default: Option<String>,
    /// Input is re-requested until this returns `Ok`
    pub validate: Option<fn(&str) -> std::result::Result<(), &'static str>>,
}

/// Question/answer protocol implemented by the terminal UI
pub trait Prompter {
    fn text(&mut self, prompt: &TextPrompt<'_>) -> io::Result<Reply<String>>;

    fn confirm(&mut self, message: &str) -> io::Result<Reply<bool>>;

    /// Returns the index of the chosen item; the first item is the default
    fn select(&mut self, message: &str, choices: &[ColoredString]) -> io::Result<Reply<usize>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Question {
    ProjectName,
    Overwrite,
    PackageName,
    Framework,
    Variant,
}

impl Question {
    pub const ORDER: [Question; 5] = [
        Question::ProjectName,
        Question::Overwrite,
        Question::PackageName,
        Question::Framework,
        Question::Variant,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    OverwriteDeclined,
    Aborted,
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Operation cancelled")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowOutcome {
    Completed(Selection),
    Cancelled(CancelReason),
}

/// Frozen result of a completed flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub target_dir: String,
    /// True only when the user agreed to empty a non-empty target
    pub overwrite: bool,
    /// Present only when the package name question was asked
    pub package_name: Option<String>,
    pub project_name: String,
    pub template: String,
}

impl Selection {
    /// Name written into the manifest
    pub fn manifest_name(&self) -> &str {
        self.package_name.as_deref().unwrap_or(&self.project_name)
    }
}

/// Answers accumulated while the flow runs
#[derive(Debug, Default)]
struct Answers {
    target_dir: Option<String>,
    overwrite: Option<bool>,
    package_name: Option<String>,
    framework: Option<usize>,
    variant: Option<String>,
}

enum Step {
    Next,
    Cancel(CancelReason),
}

pub struct SelectionFlow<'a> {
    catalog: &'a TemplateCatalog,
    cwd: &'a Path,
    default_project_name: &'a str,
    args: &'a CreateArgs,
}

impl<'a> SelectionFlow<'a> {
    pub fn new(
        catalog: &'a TemplateCatalog,
        cwd: &'a Path,
        default_project_name: &'a str,
        args: &'a CreateArgs,
    ) -> Self {
        Self {
            catalog,
            cwd,
            default_project_name,
            args,
        }
    }

    /// Ask every applicable question in order
    pub fn run<P: Prompter>(&self, prompter: &mut P) -> Result<FlowOutcome> {
        let mut answers = Answers {
            target_dir: self.args.target_dir.clone(),
            ..Answers::default()
        };

        for question in Question::ORDER {
            if self.is_skipped(question, &answers)? {
                debug!(?question, "skipping question");
                continue;
            }

            debug!(?question, "asking question");
            if let Step::Cancel(reason) = self.ask(question, &mut answers, prompter)? {
                info!(?reason, "selection cancelled");
                return Ok(FlowOutcome::Cancelled(reason));
            }
        }

        self.freeze(answers).map(FlowOutcome::Completed)
    }

    fn target_dir<'b>(&'b self, answers: &'b Answers) -> &'b str {
        answers
            .target_dir
            .as_deref()
            .unwrap_or(self.default_project_name)
    }

    fn project_name(&self, answers: &Answers) -> String {
        project_name_from_target(self.target_dir(answers), self.cwd)
    }

    fn template_flag_is_known(&self) -> bool {
        self.args
            .template
            .as_deref()
            .is_some_and(|template| self.catalog.contains(template))
    }

    fn chosen_framework(&self, answers: &Answers) -> Option<&'a Framework> {
        let catalog: &'a TemplateCatalog = self.catalog;
        answers
            .framework
            .and_then(|idx| catalog.frameworks().get(idx))
    }

    fn is_skipped(&self, question: Question, answers: &Answers) -> Result<bool> {
        Ok(match question {
            Question::ProjectName => self.args.target_dir.is_some(),
            Question::Overwrite => {
                let dir = self.cwd.join(self.target_dir(answers));
                !dir.exists() || is_empty_dir(&dir)?
            }
            Question::PackageName => is_valid_package_name(&self.project_name(answers)),
            Question::Framework => self.template_flag_is_known(),
            Question::Variant => !self
                .chosen_framework(answers)
                .is_some_and(Framework::has_variants),
        })
    }

    fn ask<P: Prompter>(
        &self,
        question: Question,
        answers: &mut Answers,
        prompter: &mut P,
    ) -> Result<Step> {
        match question {
            Question::ProjectName => {
                let prompt = TextPrompt {
                    message: "Project name:",
                    default: Some(self.default_project_name.to_string()),
                    validate: None,
                };
                let Reply::Answered(name) = prompter.text(&prompt).map_err(ScaffoldError::Prompt)?
                else {
                    return Ok(Step::Cancel(CancelReason::Aborted));
                };
                answers.target_dir = normalize_target(Some(&name)).filter(|dir| !dir.is_empty());
            }
            Question::Overwrite => {
                let target = self.target_dir(answers);
                let subject = if target == CURRENT_DIR {
                    "Current directory".to_string()
                } else {
                    format!("Target directory \"{}\"", target)
                };
                let message = format!(
                    "{} is not empty. Remove existing files and continue?",
                    subject
                );
                match prompter.confirm(&message).map_err(ScaffoldError::Prompt)? {
                    Reply::Answered(true) => answers.overwrite = Some(true),
                    Reply::Answered(false) => {
                        answers.overwrite = Some(false);
                        return Ok(Step::Cancel(CancelReason::OverwriteDeclined));
                    }
                    Reply::Aborted => return Ok(Step::Cancel(CancelReason::Aborted)),
                }
            }
            Question::PackageName => {
                let prompt = TextPrompt {
                    message: "Package name:",
                    default: Some(to_valid_package_name(&self.project_name(answers))),
                    validate: Some(validate_package_name),
                };
                let Reply::Answered(name) = prompter.text(&prompt).map_err(ScaffoldError::Prompt)?
                else {
                    return Ok(Step::Cancel(CancelReason::Aborted));
                };
                answers.package_name = Some(name);
            }
            Question::Framework => {
                let message = match self.args.template.as_deref() {
                    Some(template) => format!(
                        "\"{}\" isn't a valid template. Please choose from below: ",
                        template
                    ),
                    None => "Select a framework:".to_string(),
                };
                let choices: Vec<ColoredString> =
                    self.catalog.frameworks().iter().map(Framework::display).collect();
                let Reply::Answered(idx) = prompter
                    .select(&message, &choices)
                    .map_err(ScaffoldError::Prompt)?
                else {
                    return Ok(Step::Cancel(CancelReason::Aborted));
                };
                answers.framework = Some(idx);
            }
            Question::Variant => {
                let Some(framework) = self.chosen_framework(answers) else {
                    return Ok(Step::Next);
                };
                let choices: Vec<ColoredString> =
                    framework.variants.iter().map(|v| v.display()).collect();
                let Reply::Answered(idx) = prompter
                    .select("Select a variant:", &choices)
                    .map_err(ScaffoldError::Prompt)?
                else {
                    return Ok(Step::Cancel(CancelReason::Aborted));
                };
                answers.variant = framework.variants.get(idx).map(|v| v.name.clone());
            }
        }

        Ok(Step::Next)
    }

    fn freeze(&self, answers: Answers) -> Result<Selection> {
        let framework = self.chosen_framework(&answers);
        let template = answers
            .variant
            .clone()
            .or_else(|| framework.map(|f| f.name.clone()))
            .or_else(|| self.args.template.clone())
            .ok_or(ScaffoldError::NoTemplate)?;
        info!(%template, "resolved template");

        Ok(Selection {
            target_dir: self.target_dir(&answers).to_string(),
            overwrite: answers.overwrite.unwrap_or(false),
            project_name: self.project_name(&answers),
            package_name: answers.package_name,
            template,
        })
    }
}

fn validate_package_name(name: &str) -> std::result::Result<(), &'static str> {
    if is_valid_package_name(name) {
        Ok(())
    } else {
        Err(INVALID_PACKAGE_NAME)
    }
}
