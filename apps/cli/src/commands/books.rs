//! Book catalog commands.

use anyhow::{bail, Result};
use tracing::info;

use libreria_core::invoice::DEFAULT_CURRENCY;
use libreria_core::NewBook;
use libreria_db::{Database, PriceChange, PriceFilter};

use crate::cli::{ActualizarPreciosArgs, AgregarLibroArgs};
use crate::output;

pub async fn agregar(db: &Database, args: AgregarLibroArgs) -> Result<()> {
    let book = db
        .books()
        .insert(&NewBook {
            title: args.titulo,
            author: args.autor,
            isbn: args.isbn,
            stock: args.stock,
            price_cents: args.precio.cents(),
        })
        .await?;
    info!(book_id = book.id, "book added");
    println!(
        "added book #{}: {} ({})",
        book.id,
        book.title,
        book.price().display_with(DEFAULT_CURRENCY)
    );
    Ok(())
}

pub async fn listar(db: &Database, json: bool) -> Result<()> {
    let books = db.books().list().await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&books)?);
    } else {
        output::print_books(&books);
    }
    Ok(())
}

pub async fn eliminar(db: &Database, id: i64) -> Result<()> {
    if db.books().delete(id).await? {
        println!("deleted book #{id}");
        Ok(())
    } else {
        bail!("book #{id} not found");
    }
}

pub async fn actualizar_stock(db: &Database, id: i64, stock: i64) -> Result<()> {
    match db.books().update_stock(id, stock).await? {
        Some(book) => {
            println!("book #{}: stock is now {}", book.id, book.stock);
            Ok(())
        }
        None => bail!("book #{id} not found"),
    }
}

pub async fn actualizar_precios(db: &Database, args: ActualizarPreciosArgs) -> Result<()> {
    let filter = PriceFilter {
        author: args.autor,
        ids: args.ids,
        min_price: args.min,
        max_price: args.max,
    };
    // clap enforces exactly one of --precio / --factor / --descuento.
    let change = match (args.precio, args.factor, args.descuento) {
        (Some(price), None, None) => PriceChange::Set(price),
        (None, Some(factor), None) => PriceChange::Factor(factor),
        (None, None, Some(percent)) => {
            PriceChange::Factor(libreria_core::pricing::discount_factor(percent)?)
        }
        _ => bail!("exactly one of --precio, --factor or --descuento is required"),
    };

    let updated = db.books().bulk_update_price(&filter, change).await?;
    println!("updated {updated} books");
    Ok(())
}
