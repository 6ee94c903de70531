use crate::{
    cli::{
        core::{CommandResult, ShellContext},
        output,
    },
    core::services::ProductService,
    domain::{NewProduct, Product, ProductUpdate},
    utils::table::{Table, TableColumn},
};

use super::{date_cell, money, parse_amount, parse_date, parse_int, prompt_change, prompt_date, prompt_id};

pub fn register(ctx: &mut ShellContext) -> CommandResult {
    output::section("Register product");
    let date = prompt_date(ctx, "Date (DD/MM/YYYY)")?;
    let name = ctx.prompter.text("Product name")?;

    let quantity = parse_int(&ctx.prompter.text("Initial quantity")?).unwrap_or_else(|| {
        output::warning("Invalid quantity. Using 0.");
        0
    });
    let price = parse_amount(&ctx.prompter.text("Price")?).unwrap_or_else(|| {
        output::warning("Invalid price. Using 0.00.");
        0.0
    });

    let product = ProductService::register(
        &mut ctx.store,
        NewProduct {
            date,
            name,
            quantity,
            price,
        },
    )?;
    output::success(format!("Product registered with ID {}.", product.id));
    Ok(())
}

pub fn show(ctx: &mut ShellContext) -> CommandResult {
    output::section("Products");
    print_products(&ProductService::list(&ctx.store));
    Ok(())
}

pub fn edit(ctx: &mut ShellContext) -> CommandResult {
    output::section("Edit product");
    print_products(&ProductService::list(&ctx.store));
    let Some(id) = prompt_id(ctx, "Product ID to edit")? else {
        return Ok(());
    };
    let product = ProductService::get(&ctx.store, id)?;
    output::info("Leave a field blank to keep its current value.");

    let update = ProductUpdate {
        date: prompt_change(ctx, "Date", &date_cell(product.date), parse_date)?,
        quantity: prompt_change(ctx, "Quantity", &product.quantity.to_string(), parse_int)?,
        price: prompt_change(ctx, "Price", &money(product.price), parse_amount)?,
    };
    if update.is_empty() {
        output::info("Nothing changed.");
        return Ok(());
    }
    ProductService::edit(&mut ctx.store, id, &update)?;
    output::success(format!("Product {id} updated."));
    Ok(())
}

pub fn delete(ctx: &mut ShellContext) -> CommandResult {
    output::section("Delete product");
    print_products(&ProductService::list(&ctx.store));
    let Some(id) = prompt_id(ctx, "Product ID to delete")? else {
        return Ok(());
    };
    if !ctx
        .prompter
        .confirm("Are you sure you want to delete this product?", false)?
    {
        output::info("Operation cancelled.");
        return Ok(());
    }
    ProductService::remove(&mut ctx.store, id)?;
    output::success(format!("Product {id} deleted."));
    Ok(())
}

pub(crate) fn print_products(products: &[Product]) {
    if products.is_empty() {
        output::info("No products registered.");
        return;
    }
    let mut table = Table::new(vec![
        TableColumn::right("ID"),
        TableColumn::left("Date"),
        TableColumn::left("Product").max_width(28),
        TableColumn::right("Quantity"),
        TableColumn::right("Price"),
    ]);
    for product in products {
        table.push_row(vec![
            product.id.to_string(),
            date_cell(product.date),
            product.name.clone(),
            product.quantity.to_string(),
            money(product.price),
        ]);
    }
    output::info(table.render());
}
