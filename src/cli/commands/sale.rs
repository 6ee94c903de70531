use crate::{
    cli::{
        core::{CommandResult, ShellContext},
        output,
    },
    core::services::{ProductService, SaleDraft, SaleService},
    domain::{Sale, SaleStatus, SaleUpdate},
    utils::table::{Table, TableColumn},
};

use super::{date_cell, money, parse_amount, parse_date, parse_int, prompt_change, prompt_date, prompt_id};

const STATUS_PROMPT: &str = "Status (1 Paid, 2 Pending)";

pub fn register(ctx: &mut ShellContext) -> CommandResult {
    output::section("Register sale");
    print_product_preview(ctx);

    let date = prompt_date(ctx, "Date (DD/MM/YYYY)")?;
    let client = ctx.prompter.text("Client")?;
    let Some(product_id) = parse_int(&ctx.prompter.text("Product ID")?) else {
        output::warning("Invalid product ID. Operation cancelled.");
        return Ok(());
    };
    let Some(quantity) = parse_int(&ctx.prompter.text("Quantity")?) else {
        output::warning("Invalid quantity. Operation cancelled.");
        return Ok(());
    };
    let status = SaleStatus::from_choice(&ctx.prompter.text(STATUS_PROMPT)?).unwrap_or_else(|| {
        output::warning("Invalid status. Using Pending.");
        SaleStatus::Pending
    });

    let sale = SaleService::register(
        &mut ctx.store,
        SaleDraft {
            date,
            client,
            product_id,
            quantity,
            status,
        },
    )?;
    output::success(format!(
        "Sale registered with ID {}. Total: {}",
        sale.id,
        money(sale.total)
    ));
    Ok(())
}

/// Lists sales, then optionally prints one in full.
pub fn show(ctx: &mut ShellContext) -> CommandResult {
    output::section("Sales");
    let sales = SaleService::list(&ctx.store);
    print_sales(&sales);
    if sales.is_empty() {
        return Ok(());
    }
    let raw = ctx.prompter.text("Sale ID for details (blank to go back)")?;
    if raw.trim().is_empty() {
        return Ok(());
    }
    let Some(id) = parse_int(&raw) else {
        output::warning("Invalid ID.");
        return Ok(());
    };
    let (sale, product_name) = SaleService::details(&ctx.store, id)?;
    print_sale_details(&sale, &product_name);
    Ok(())
}

pub fn edit(ctx: &mut ShellContext) -> CommandResult {
    output::section("Edit sale");
    print_sales(&SaleService::list(&ctx.store));
    let Some(id) = prompt_id(ctx, "Sale ID to edit")? else {
        return Ok(());
    };
    let sale = SaleService::get(&ctx.store, id)?;
    output::info("Leave a field blank to keep its current value.");

    let date = prompt_change(ctx, "Date", &date_cell(sale.date), parse_date)?;
    let client = prompt_change(ctx, "Client", &sale.client, |raw| {
        Some(raw.trim().to_string())
    })?;
    let quantity = prompt_change(ctx, "Quantity", &sale.quantity.to_string(), parse_int)?;
    let price = prompt_change(ctx, "Unit price", &money(sale.price), parse_amount)?;
    let status = prompt_change(
        ctx,
        STATUS_PROMPT,
        sale.status.label(),
        SaleStatus::from_choice,
    )?;

    let updated = SaleService::edit(
        &mut ctx.store,
        id,
        &SaleUpdate {
            date,
            client,
            quantity,
            price,
            status,
        },
    )?;
    output::success(format!(
        "Sale {id} updated. Total: {}",
        money(updated.total)
    ));
    Ok(())
}

pub fn delete(ctx: &mut ShellContext) -> CommandResult {
    output::section("Delete sale");
    print_sales(&SaleService::list(&ctx.store));
    let Some(id) = prompt_id(ctx, "Sale ID to delete")? else {
        return Ok(());
    };
    if !ctx
        .prompter
        .confirm("Are you sure you want to delete this sale?", false)?
    {
        output::info("Operation cancelled.");
        return Ok(());
    }
    SaleService::remove(&mut ctx.store, id)?;
    output::success(format!("Sale {id} deleted."));
    Ok(())
}

fn print_product_preview(ctx: &ShellContext) {
    let products = ProductService::list(&ctx.store);
    if products.is_empty() {
        output::warning("No products registered yet.");
        return;
    }
    let mut table = Table::new(vec![TableColumn::right("ID"), TableColumn::left("Product")]);
    for product in products {
        table.push_row(vec![product.id.to_string(), product.name]);
    }
    output::info(table.render());
}

fn print_sales(sales: &[Sale]) {
    if sales.is_empty() {
        output::info("No sales registered.");
        return;
    }
    let mut table = Table::new(vec![
        TableColumn::right("ID"),
        TableColumn::left("Date"),
        TableColumn::left("Client").max_width(24),
        TableColumn::right("Quantity"),
        TableColumn::left("Status"),
    ]);
    for sale in sales {
        table.push_row(vec![
            sale.id.to_string(),
            date_cell(sale.date),
            sale.client.clone(),
            sale.quantity.to_string(),
            sale.status.to_string(),
        ]);
    }
    output::info(table.render());
}

fn print_sale_details(sale: &Sale, product_name: &str) {
    output::section(format!("Sale {}", sale.id));
    let rows = [
        ("Date", date_cell(sale.date)),
        ("Client", sale.client.clone()),
        ("Product", format!("{product_name} (ID {})", sale.product_id)),
        ("Quantity", sale.quantity.to_string()),
        ("Unit price", money(sale.price)),
        ("Total", money(sale.total)),
        ("Status", sale.status.to_string()),
    ];
    for (label, value) in rows {
        output::info(format!("  {label:<10}: {value}"));
    }
}
