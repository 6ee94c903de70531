//! Numbered menus. Each entry maps to a handler in [`super::commands`].

use super::{
    commands::{cash_delivery, product, report, sale, system},
    core::{CommandResult, ShellContext},
    output,
    prompt::Choice,
};

type Action = fn(&mut ShellContext) -> CommandResult;

const MAIN_ENTRIES: &[(&str, Action)] = &[
    ("Sales", sales_menu),
    ("Products", products_menu),
    ("Cash deliveries", cash_deliveries_menu),
    ("Sales report", sales_report),
    ("Maintenance", maintenance_menu),
];

const SALES_ENTRIES: &[(&str, Action)] = &[
    ("Register sale", sale::register),
    ("Show sales", sale::show),
    ("Edit sale", sale::edit),
    ("Delete sale", sale::delete),
];

const PRODUCT_ENTRIES: &[(&str, Action)] = &[
    ("Register product", product::register),
    ("Show products", product::show),
    ("Edit product", product::edit),
    ("Delete product", product::delete),
];

const CASH_DELIVERY_ENTRIES: &[(&str, Action)] = &[
    ("Register cash delivery", cash_delivery::register),
    ("Show cash deliveries", cash_delivery::show),
];

const MAINTENANCE_ENTRIES: &[(&str, Action)] = &[
    ("Create backup", system::backup),
    ("List backups", system::list_backups),
    ("Restore backup", system::restore),
    ("Version", system::version),
];

/// Runs the main menu until the operator exits or input ends.
pub fn run_main_menu(ctx: &mut ShellContext) -> CommandResult {
    run_menu(ctx, "Sales Core", MAIN_ENTRIES, "Exit", false)?;
    ctx.running = false;
    Ok(())
}

fn sales_menu(ctx: &mut ShellContext) -> CommandResult {
    run_menu(ctx, "Sales", SALES_ENTRIES, "Back", true)
}

fn products_menu(ctx: &mut ShellContext) -> CommandResult {
    run_menu(ctx, "Products", PRODUCT_ENTRIES, "Back", true)
}

fn cash_deliveries_menu(ctx: &mut ShellContext) -> CommandResult {
    run_menu(ctx, "Cash deliveries", CASH_DELIVERY_ENTRIES, "Back", true)
}

/// The main menu does not pause, so the report stays on screen until Enter.
fn sales_report(ctx: &mut ShellContext) -> CommandResult {
    if let Err(err) = report::run(ctx) {
        ctx.report_error(err)?;
    }
    ctx.prompter.pause()
}

fn maintenance_menu(ctx: &mut ShellContext) -> CommandResult {
    run_menu(ctx, "Maintenance", MAINTENANCE_ENTRIES, "Back", true)
}

/// Shows `entries` plus a closing entry labelled `leave` until it is picked.
/// Recoverable handler failures are printed and the menu is shown again.
fn run_menu(
    ctx: &mut ShellContext,
    title: &str,
    entries: &[(&str, Action)],
    leave: &str,
    pause_after_action: bool,
) -> CommandResult {
    let mut labels: Vec<&str> = entries.iter().map(|(label, _)| *label).collect();
    labels.push(leave);

    loop {
        ctx.prompter.clear_screen()?;
        output::section(title);
        match ctx.prompter.select("Select an option", &labels)? {
            Choice::Item(index) if index < entries.len() => {
                let (label, action) = entries[index];
                tracing::debug!(menu = title, entry = label, "menu entry selected");
                if let Err(err) = action(ctx) {
                    ctx.report_error(err)?;
                }
                if pause_after_action {
                    ctx.prompter.pause()?;
                }
            }
            Choice::Item(_) | Choice::Back => return Ok(()),
            Choice::Invalid(raw) => {
                output::warning(format!("Invalid option `{raw}`. Please try again."));
            }
        }
    }
}
