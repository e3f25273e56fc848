//! Catalog listing.

use anyhow::Result;

use crate::context::Context;
use crate::output::{format_price, stock_badge};

/// List every product with its available stock.
pub async fn run(ctx: &Context) -> Result<()> {
    let products = ctx.backend()?.list_products().await?;

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    if products.is_empty() {
        ctx.output.info("No products found");
        return Ok(());
    }

    ctx.output.header("Products");
    let widths = [6, 32, 12, 12];
    ctx.output.table_row(&["ID", "NAME", "PRICE", "STOCK"], &widths);
    for product in &products {
        ctx.output.table_row(
            &[
                &product.id.to_string(),
                &product.name,
                &format_price(product.price),
                &stock_badge(product.available_stock),
            ],
            &widths,
        );
    }

    Ok(())
}
