use crate::{
    cli::{
        core::{CommandResult, ShellContext},
        output,
        prompt::Choice,
    },
    utils::build_info,
};

pub fn backup(ctx: &mut ShellContext) -> CommandResult {
    output::section("Create backup");
    let note = ctx.prompter.text("Backup note (optional)")?;
    let note = Some(note.trim()).filter(|note| !note.is_empty());
    let name = ctx.store.backup(note)?;
    output::success(format!("Backup `{name}` created."));
    Ok(())
}

pub fn list_backups(ctx: &mut ShellContext) -> CommandResult {
    output::section("Backups");
    let backups = ctx.store.list_backups()?;
    if backups.is_empty() {
        output::info("No backups yet.");
    }
    for (index, name) in backups.iter().enumerate() {
        output::info(format!("{:>3}. {name}", index + 1));
    }
    Ok(())
}

pub fn restore(ctx: &mut ShellContext) -> CommandResult {
    output::section("Restore backup");
    let backups = ctx.store.list_backups()?;
    if backups.is_empty() {
        output::info("No backups yet.");
        return Ok(());
    }
    let labels: Vec<&str> = backups.iter().map(String::as_str).collect();
    let name = match ctx.prompter.select("Backup to restore", &labels)? {
        Choice::Item(index) => backups[index].clone(),
        Choice::Back => return Ok(()),
        Choice::Invalid(raw) => {
            output::warning(format!("No backup matches `{raw}`."));
            return Ok(());
        }
    };
    if !ctx.prompter.confirm(
        &format!("Replace the current records with `{name}`?"),
        false,
    )? {
        output::info("Operation cancelled.");
        return Ok(());
    }
    ctx.store.restore(&name)?;
    output::success(format!("Records restored from `{name}`."));
    Ok(())
}

pub fn version(_ctx: &mut ShellContext) -> CommandResult {
    print_version();
    Ok(())
}

pub fn print_version() {
    let meta = build_info::current();
    output::section(format!("Sales Core {}", meta.version));
    for (label, value) in meta.fields() {
        output::info(format!("  {label:<11}: {value}"));
    }
}

pub fn print_help() {
    output::info(
        "Usage: sales_core_cli [COMMAND]\n\n\
         Without a command the interactive menu starts. Set SALES_CORE_CLI_SCRIPT\n\
         to answer prompts from stdin, one line per prompt.\n\n\
         Commands:\n  \
         report <daily|weekly|monthly> [--export text|csv|pdf]   Show a sales report\n  \
         version                                                 Show build metadata\n  \
         help                                                    Show this message\n\n\
         Data lives in $SALES_CORE_HOME (default ~/.sales_core); RUST_LOG tunes logging.",
    );
}
