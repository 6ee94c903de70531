//! Shell context, modes and the CLI error types.

use std::{io, path::PathBuf};

use rustyline::error::ReadlineError;
use thiserror::Error;

use crate::{
    config::{Config, ConfigError, ConfigManager},
    core::{
        services::ServiceError,
        Clock, SystemClock,
    },
    errors::StoreError,
    report::ReportError,
    storage::{JsonStorage, Store},
};

use super::{
    output,
    prompt::{InteractivePrompter, Prompter, ScriptPrompter},
};

/// Environment variable that switches the shell to line-per-answer input.
pub const SCRIPT_ENV: &str = "SALES_CORE_CLI_SCRIPT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

impl CliMode {
    pub fn from_env() -> Self {
        if std::env::var_os(SCRIPT_ENV).is_some() {
            CliMode::Script
        } else {
            CliMode::Interactive
        }
    }
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error(transparent)]
    Readline(#[from] ReadlineError),
    #[error("exit requested")]
    ExitRequested,
}

impl From<ServiceError> for CommandError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Store(err) => CommandError::Store(err),
            ServiceError::Report(err) => CommandError::Report(err),
            ServiceError::Invalid(message) => CommandError::InvalidArguments(message),
        }
    }
}

impl CommandError {
    /// Failures of a single operation; the shell reports them and keeps
    /// running. Only a closed input or a broken terminal ends the session.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CommandError::InvalidArguments(_)
                | CommandError::Store(_)
                | CommandError::Report(_)
                | CommandError::Config(_)
        )
    }
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Invalid input: {0}")]
    Input(String),
}

/// Everything a menu or command handler needs for one session.
pub struct ShellContext {
    pub mode: CliMode,
    pub store: Store,
    pub config: Config,
    pub export_dir: PathBuf,
    pub prompter: Box<dyn Prompter>,
    pub clock: Box<dyn Clock>,
    pub running: bool,
}

impl ShellContext {
    /// Opens the configured store under the app data directory.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        Self::from_config_manager(mode, &config_manager)
    }

    pub fn from_config_manager(
        mode: CliMode,
        config_manager: &ConfigManager,
    ) -> Result<Self, CliError> {
        let config = config_manager.load()?;
        let storage = JsonStorage::new(
            config_manager.store_path(&config),
            config_manager.backups_path(),
            Some(config.backup_retention),
        )?;
        let store = Store::open(Box::new(storage))?;
        let prompter: Box<dyn Prompter> = match mode {
            CliMode::Interactive => Box::new(InteractivePrompter::new(config.clear_screen)?),
            CliMode::Script => {
                output::disable_colors();
                Box::new(ScriptPrompter::stdin())
            }
        };
        Ok(Self {
            mode,
            store,
            export_dir: config_manager.export_path(&config),
            config,
            prompter,
            clock: Box::new(SystemClock),
            running: true,
        })
    }

    /// Assembles a context from explicit parts; used by embedders and tests.
    pub fn with_parts(
        store: Store,
        export_dir: PathBuf,
        prompter: Box<dyn Prompter>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            mode: CliMode::Script,
            store,
            config: Config::default(),
            export_dir,
            prompter,
            clock,
            running: true,
        }
    }

    pub fn now(&self) -> chrono::NaiveDateTime {
        self.clock.now()
    }

    /// Prints recoverable failures and keeps going; anything else propagates.
    pub fn report_error(&self, err: CommandError) -> CommandResult {
        if err.is_recoverable() {
            output::error(&err);
            Ok(())
        } else {
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_command_errors() {
        let err: CommandError = ServiceError::Invalid("Product 3 not found".into()).into();
        assert!(matches!(err, CommandError::InvalidArguments(ref m) if m == "Product 3 not found"));
        assert!(err.is_recoverable());
        assert!(!CommandError::ExitRequested.is_recoverable());
    }

    #[test]
    fn io_failures_of_an_operation_are_recoverable() {
        let disk = || io::Error::new(io::ErrorKind::PermissionDenied, "read-only");
        assert!(CommandError::Store(StoreError::Io(disk())).is_recoverable());
        assert!(CommandError::Report(ReportError::Io(disk())).is_recoverable());
        assert!(CommandError::Report(ReportError::Pdf("broken".into())).is_recoverable());
        assert!(!CommandError::Io(disk()).is_recoverable());
    }
}
