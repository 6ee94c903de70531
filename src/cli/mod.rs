pub mod commands;
pub mod core;
pub mod menus;
pub mod output;
pub mod prompt;
mod shell;

pub use self::core::{CliError, CliMode, CommandError, ShellContext};
pub use prompt::{Choice, InteractivePrompter, Prompter, ScriptPrompter};
pub use shell::{run_cli, run_command, run_shell};
