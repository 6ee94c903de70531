use crate::{
    cli::{
        core::{CommandResult, ShellContext},
        output,
    },
    core::services::CashDeliveryService,
    domain::NewCashDelivery,
    utils::table::{Table, TableColumn},
};

use super::{date_cell, money, parse_amount, prompt_date};

pub fn register(ctx: &mut ShellContext) -> CommandResult {
    output::section("Register cash delivery");
    let date = prompt_date(ctx, "Date (DD/MM/YYYY)")?;
    let name = ctx.prompter.text("Name")?;
    let description = ctx.prompter.text("Description")?;
    let Some(amount) = parse_amount(&ctx.prompter.text("Amount")?) else {
        output::warning("Invalid amount. Operation cancelled.");
        return Ok(());
    };

    let delivery = CashDeliveryService::register(
        &mut ctx.store,
        NewCashDelivery {
            date,
            name,
            description,
            amount,
        },
    )?;
    output::success(format!("Cash delivery registered with ID {}.", delivery.id));
    Ok(())
}

pub fn show(ctx: &mut ShellContext) -> CommandResult {
    output::section("Cash deliveries");
    let deliveries = CashDeliveryService::list(&ctx.store);
    if deliveries.is_empty() {
        output::info("No cash deliveries registered.");
        return Ok(());
    }
    let mut table = Table::new(vec![
        TableColumn::right("ID"),
        TableColumn::left("Date"),
        TableColumn::left("Name").max_width(24),
        TableColumn::left("Description").max_width(32),
        TableColumn::right("Amount"),
    ]);
    for delivery in deliveries {
        table.push_row(vec![
            delivery.id.to_string(),
            date_cell(delivery.date),
            delivery.name,
            delivery.description,
            money(delivery.amount),
        ]);
    }
    output::info(table.render());
    Ok(())
}
