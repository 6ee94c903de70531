use std::env;

use crate::cli::{
    commands::{report, system},
    core::{CliError, CliMode, CommandError, ShellContext},
    menus, output,
};

/// Entry point of `sales_core_cli`: dispatches on the process arguments.
pub fn run_cli() -> Result<(), CliError> {
    let args: Vec<String> = env::args().skip(1).collect();
    run_command(&args)
}

pub fn run_command(args: &[String]) -> Result<(), CliError> {
    let Some(command) = args.first() else {
        let mut context = ShellContext::new(CliMode::from_env())?;
        return run_shell(&mut context);
    };

    match command.to_ascii_lowercase().as_str() {
        "report" => {
            let (kind, format) = parse_report_args(&args[1..])?;
            let mut context = ShellContext::new(CliMode::Script)?;
            report::run_once(&mut context, &kind, format.as_deref())?;
            Ok(())
        }
        "version" | "--version" | "-v" => {
            system::print_version();
            Ok(())
        }
        "help" | "--help" | "-h" => {
            system::print_help();
            Ok(())
        }
        other => Err(CliError::Input(format!(
            "unknown command `{other}`; run `sales_core_cli help`"
        ))),
    }
}

/// Runs the menus on an open context. End of input is a normal exit.
pub fn run_shell(context: &mut ShellContext) -> Result<(), CliError> {
    tracing::info!(mode = ?context.mode, store = %context.store.describe(), "shell started");
    match menus::run_main_menu(context) {
        Ok(()) | Err(CommandError::ExitRequested) => {
            context.running = false;
            output::info("Goodbye.");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

fn parse_report_args(args: &[String]) -> Result<(String, Option<String>), CliError> {
    let mut kind = None;
    let mut format = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if let Some(value) = arg.strip_prefix("--export=") {
            format = Some(value.to_string());
        } else if arg == "--export" {
            let value = iter
                .next()
                .ok_or_else(|| CliError::Input("`--export` needs `text`, `csv` or `pdf`".into()))?;
            format = Some(value.clone());
        } else if kind.is_none() {
            kind = Some(arg.clone());
        } else {
            return Err(CliError::Input(format!("unexpected argument `{arg}`")));
        }
    }
    let kind = kind.ok_or_else(|| {
        CliError::Input("usage: report <daily|weekly|monthly> [--export text|csv|pdf]".into())
    })?;
    Ok((kind, format))
}
