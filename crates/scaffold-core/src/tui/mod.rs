//! CLI prompts using cliclack (Charm-style inline prompts)
//!
//! This module is optional and only available when the `tui` feature is enabled.

mod prompts;

pub use prompts::{run, CliclackPrompter};
