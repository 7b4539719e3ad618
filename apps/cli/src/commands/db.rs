//! Database lifecycle commands: `init-db`, `test-db`, `seed-libros`.

use anyhow::{bail, Result};
use tracing::info;

use libreria_core::NewBook;
use libreria_db::migrations::migration_status;
use libreria_db::Database;

/// Initial catalog loaded by `seed-libros`.
const SEED_BOOKS: [(&str, &str, &str, i64, i64); 3] = [
    ("1984", "George Orwell", "9780451524935", 5, 1250),
    ("El Quijote", "Miguel de Cervantes", "9788491050291", 10, 1999),
    ("Cien años de soledad", "Gabriel García Márquez", "9780307474728", 7, 1499),
];

pub async fn init_db(db: &Database) -> Result<()> {
    // `Database::new` already applied migrations while opening the pool;
    // this command exists so operators can create the file explicitly.
    let (total, applied) = migration_status(db.pool()).await?;
    println!("database ready ({applied}/{total} migrations applied)");
    Ok(())
}

pub async fn test_db(db: &Database) -> Result<()> {
    if !db.health_check().await {
        bail!("database did not answer the health probe");
    }
    let (total, applied) = migration_status(db.pool()).await?;
    println!("connection ok, {applied}/{total} migrations applied");
    Ok(())
}

pub async fn seed_libros(db: &Database) -> Result<()> {
    let existing = db.books().count().await?;
    if existing > 0 {
        println!("catalog already has {existing} books, skipping seed");
        return Ok(());
    }

    for (title, author, isbn, stock, price_cents) in SEED_BOOKS {
        let book = db
            .books()
            .insert(&NewBook {
                title: title.to_string(),
                author: author.to_string(),
                isbn: Some(isbn.to_string()),
                stock,
                price_cents,
            })
            .await?;
        info!(book_id = book.id, title, "seeded book");
    }

    println!("seeded {} books", SEED_BOOKS.len());
    Ok(())
}
