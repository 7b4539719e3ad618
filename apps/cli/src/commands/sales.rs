//! Sale commands: create, inspect, update, delete, invoice.

use anyhow::{bail, Result};
use tracing::info;

use libreria_core::invoice::{render_invoice, DEFAULT_CURRENCY};
use libreria_core::{OrderLine, SaleWithItems};
use libreria_db::Database;

use crate::cli::CrearVentaArgs;
use crate::output;

pub async fn crear(db: &Database, args: CrearVentaArgs) -> Result<()> {
    let sale = db
        .sales()
        .create(Some(&args.cliente), &args.items, args.usuario)
        .await?;
    info!(sale_id = sale.sale.id, total_cents = sale.sale.total_cents, "sale created");
    print_sale(&sale);
    Ok(())
}

pub async fn listar(db: &Database, json: bool) -> Result<()> {
    let sales = db.sales().list().await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&sales)?);
    } else {
        output::print_sales(&sales);
    }
    Ok(())
}

pub async fn ver(db: &Database, id: i64) -> Result<()> {
    match db.sales().get(id).await? {
        Some(sale) => {
            print_sale(&sale);
            Ok(())
        }
        None => bail!("sale #{id} not found"),
    }
}

pub async fn actualizar_pedido(db: &Database, id: i64, items: &[OrderLine]) -> Result<()> {
    match db.sales().update(id, items).await? {
        Some(sale) => {
            info!(sale_id = id, "sale items replaced");
            print_sale(&sale);
            Ok(())
        }
        None => bail!("sale #{id} not found"),
    }
}

pub async fn eliminar(db: &Database, id: i64) -> Result<()> {
    if db.sales().delete(id).await? {
        println!("deleted sale #{id}, stock restored");
        Ok(())
    } else {
        bail!("sale #{id} not found");
    }
}

pub async fn factura(db: &Database, id: i64) -> Result<()> {
    let Some(sale) = db.sales().get(id).await? else {
        bail!("sale #{id} not found");
    };
    let lines = db.sales().invoice_lines(id).await?;
    print!("{}", render_invoice(&sale.sale, &lines, DEFAULT_CURRENCY));
    Ok(())
}

fn print_sale(sale: &SaleWithItems) {
    println!(
        "sale #{} — {} — total {}",
        sale.sale.id,
        sale.sale
            .customer_name
            .as_deref()
            .unwrap_or("Unknown Customer"),
        sale.sale.total().display_with(DEFAULT_CURRENCY)
    );
    for item in &sale.items {
        println!(
            "  book #{} × {} @ {} = {}",
            item.book_id,
            item.quantity,
            item.unit_price().display_with(DEFAULT_CURRENCY),
            item.line_total().display_with(DEFAULT_CURRENCY)
        );
    }
}
