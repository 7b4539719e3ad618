//! # Libreria CLI
//!
//! Command-line administration tool for the bookstore backend.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        libreria CLI                         │
//! │                                                             │
//! │  clap parser ───► command handlers ───► libreria-db ───►   │
//! │                                          SQLite file        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The database location comes from `DATABASE_PATH` (or `DB_NAME`); every
//! command opens the pool, runs its repository calls, and exits. Exit code
//! is 0 on success and 1 when any repository call fails.

mod cli;
mod commands;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use libreria_db::{Database, DbSettings};

use crate::cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    // RUST_LOG controls verbosity; default to warnings so table output
    // stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let settings = DbSettings::from_env();
    let db = Database::new(settings.to_db_config()).await?;

    let result = dispatch(&db, cli.command).await;
    db.close().await;
    result
}

async fn dispatch(db: &Database, command: Command) -> Result<()> {
    match command {
        Command::InitDb => commands::db::init_db(db).await,
        Command::TestDb => commands::db::test_db(db).await,
        Command::SeedLibros => commands::db::seed_libros(db).await,

        Command::AgregarLibro(args) => commands::books::agregar(db, args).await,
        Command::ListarLibros { json } => commands::books::listar(db, json).await,
        Command::EliminarLibro { id } => commands::books::eliminar(db, id).await,
        Command::ActualizarStock { id, stock } => {
            commands::books::actualizar_stock(db, id, stock).await
        }
        Command::ActualizarPrecios(args) => commands::books::actualizar_precios(db, args).await,

        Command::CrearVenta(args) => commands::sales::crear(db, args).await,
        Command::ListarVentas { json } => commands::sales::listar(db, json).await,
        Command::VerVenta { id } => commands::sales::ver(db, id).await,
        Command::ActualizarPedido { id, items } => {
            commands::sales::actualizar_pedido(db, id, &items).await
        }
        Command::EliminarVenta { id } => commands::sales::eliminar(db, id).await,
        Command::Factura { id } => commands::sales::factura(db, id).await,

        Command::AgregarUsuario { nombre, email } => {
            commands::users::agregar(db, &nombre, &email).await
        }
        Command::ListarUsuarios => commands::users::listar(db).await,
        Command::EliminarUsuario { id } => commands::users::eliminar(db, id).await,

        Command::Reporte { periodo, json } => commands::reports::reporte(db, periodo, json).await,
    }
}
