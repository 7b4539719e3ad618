//! Command-line definitions.
//!
//! Command names follow the original Spanish administration vocabulary
//! (`seed-libros`, `crear-venta`, ...) so existing operator scripts keep
//! working. Arguments that carry money accept decimal strings ("12.50").

use clap::{Args, Parser, Subcommand};

use libreria_core::{Money, OrderLine, ReportPeriod};

#[derive(Parser, Debug)]
#[command(
    name = "libreria",
    author,
    version,
    about = "Bookstore administration: books, users, sales and reports",
    long_about = "Bookstore administration backend.\n\nEnvironment:\n  DATABASE_PATH   Path to the SQLite database file\n  DB_NAME         Database name, used as {DB_NAME}.db when DATABASE_PATH is unset\n  RUST_LOG        Log filter (default: warn)\n"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the database file and apply pending migrations
    InitDb,
    /// Check database connectivity and report migration status
    TestDb,
    /// Load the initial book catalog (skipped when books already exist)
    SeedLibros,

    /// Add a book to the catalog
    AgregarLibro(AgregarLibroArgs),
    /// List the book catalog
    ListarLibros {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Remove a book (fails while sales reference it)
    EliminarLibro { id: i64 },
    /// Set a book's stock to an absolute level
    ActualizarStock {
        id: i64,
        #[arg(allow_negative_numbers = true)]
        stock: i64,
    },
    /// Update prices for every book matching a filter
    ActualizarPrecios(ActualizarPreciosArgs),

    /// Create a sale from one or more `book_id:qty` items
    CrearVenta(CrearVentaArgs),
    /// List sales, most recent first
    ListarVentas {
        #[arg(long)]
        json: bool,
    },
    /// Show one sale with its line items
    VerVenta { id: i64 },
    /// Replace a sale's items (stock is restored, then the new set applied)
    ActualizarPedido {
        id: i64,
        /// New item set as `book_id:qty`, e.g. `3:2 7:1`
        #[arg(required = true, value_name = "BOOK_ID:QTY")]
        items: Vec<OrderLine>,
    },
    /// Delete a sale and restore its stock
    EliminarVenta { id: i64 },
    /// Print the text invoice for a sale
    Factura { id: i64 },

    /// Register a user account
    AgregarUsuario {
        nombre: String,
        email: String,
    },
    /// List user accounts
    ListarUsuarios,
    /// Delete a user (their sales remain, unowned)
    EliminarUsuario { id: i64 },

    /// Billing summary over a trailing period
    Reporte {
        /// mensual, trimestral or anual
        #[arg(long, default_value = "mensual")]
        periodo: ReportPeriod,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
pub struct AgregarLibroArgs {
    #[arg(long)]
    pub titulo: String,
    #[arg(long)]
    pub autor: String,
    /// 13-character ISBN; must be unique when given
    #[arg(long)]
    pub isbn: Option<String>,
    #[arg(long, default_value_t = 0)]
    pub stock: i64,
    /// Unit price, e.g. 12.50
    #[arg(long, default_value = "0")]
    pub precio: Money,
}

#[derive(Args, Debug)]
pub struct CrearVentaArgs {
    /// Customer display name for the invoice
    pub cliente: String,
    /// Items as `book_id:qty`; duplicate book ids are merged
    #[arg(required = true, value_name = "BOOK_ID:QTY")]
    pub items: Vec<OrderLine>,
    /// Owning user account id
    #[arg(long)]
    pub usuario: Option<i64>,
}

#[derive(Args, Debug)]
pub struct ActualizarPreciosArgs {
    /// Only books by this author (exact match)
    #[arg(long)]
    pub autor: Option<String>,
    /// Only these book ids
    #[arg(long, value_delimiter = ',')]
    pub ids: Option<Vec<i64>>,
    /// Only books priced at or above this amount
    #[arg(long)]
    pub min: Option<Money>,
    /// Only books priced at or below this amount
    #[arg(long)]
    pub max: Option<Money>,
    /// New absolute price for every match
    #[arg(
        long,
        conflicts_with_all = ["factor", "descuento"],
        required_unless_present_any = ["factor", "descuento"]
    )]
    pub precio: Option<Money>,
    /// Multiplier applied to each match (1.1 raises prices by 10%)
    #[arg(long, conflicts_with = "descuento")]
    pub factor: Option<f64>,
    /// Percentage discount in [0, 100] applied to each match
    #[arg(long)]
    pub descuento: Option<f64>,
}
