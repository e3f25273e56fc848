//! Cart commands.

use anyhow::Result;
use cart_core::Cart;
use serde::Serialize;

use super::{ProductArgs, UpdateArgs};
use crate::context::Context;
use crate::output::format_price;

#[derive(Serialize)]
struct CartSummary<'a> {
    items: &'a Cart,
    total_quantity: u64,
    total: f64,
}

/// Print the persisted cart.
pub async fn show(ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    print_cart(&store.cart(), ctx);
    Ok(())
}

/// Add one unit of a product.
pub async fn add(args: ProductArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    store.add_product(args.id).await?;
    print_line(&store.cart(), args.id, ctx);
    Ok(())
}

/// Remove a product line.
pub async fn remove(args: ProductArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    store.remove_product(args.id)?;
    ctx.output.success(&format!("Removed product {}", args.id));
    print_totals(&store.cart(), ctx);
    Ok(())
}

/// Set a product's quantity.
pub async fn update(args: UpdateArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    if args.amount <= 0 {
        ctx.output
            .debug(&format!("Ignoring non-positive amount {}", args.amount));
    }
    store.update_product_amount(args.id, args.amount).await?;
    print_line(&store.cart(), args.id, ctx);
    Ok(())
}

fn print_cart(cart: &Cart, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&CartSummary {
            items: cart,
            total_quantity: cart.total_quantity(),
            total: cart.total(),
        });
        return;
    }

    if cart.is_empty() {
        ctx.output.info("Cart is empty");
        return;
    }

    ctx.output.header("Cart");
    let widths = [6, 32, 6, 12, 12];
    ctx.output
        .table_row(&["ID", "NAME", "QTY", "PRICE", "SUBTOTAL"], &widths);
    for item in cart {
        ctx.output.table_row(
            &[
                &item.id.to_string(),
                &item.name,
                &item.quantity.to_string(),
                &format_price(item.price),
                &format_price(item.subtotal()),
            ],
            &widths,
        );
    }
    print_totals(cart, ctx);
}

fn print_line(cart: &Cart, id: cart_core::ProductId, ctx: &Context) {
    if ctx.output.is_json() {
        print_cart(cart, ctx);
        return;
    }
    if let Some(item) = cart.get(id) {
        ctx.output.kv(&item.name, &format!("x{}", item.quantity));
    }
    print_totals(cart, ctx);
}

fn print_totals(cart: &Cart, ctx: &Context) {
    if ctx.output.is_json() {
        print_cart(cart, ctx);
        return;
    }
    ctx.output.kv("items", &cart.total_quantity().to_string());
    ctx.output.kv("total", &format_price(cart.total()));
}
