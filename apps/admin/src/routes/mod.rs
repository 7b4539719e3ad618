//! Route table for the admin API.
//!
//! ```text
//! GET    /health                 liveness probe
//! GET    /books                  list catalog
//! POST   /books                  add a book
//! DELETE /books/:id              remove a book
//! PUT    /books/:id/stock        set absolute stock level
//! POST   /books/prices           bulk price update
//! GET    /users                  list users
//! POST   /users                  register a user
//! DELETE /users/:id              delete a user
//! GET    /sales                  list sales
//! POST   /sales                  create a sale
//! GET    /sales/:id              sale with line items
//! PUT    /sales/:id/items        replace a sale's items
//! DELETE /sales/:id              delete a sale, restoring stock
//! GET    /sales/:id/factura      text invoice
//! GET    /reports/billing        billing summary (?periodo=mensual)
//! ```

mod books;
mod sales;
mod system;
mod users;

use axum::routing::{delete, get, post, put};
use axum::Router;

use libreria_db::Database;

pub fn router(db: Database) -> Router {
    Router::new()
        .route("/health", get(system::health))
        .route("/books", get(books::list).post(books::create))
        .route("/books/:id", delete(books::remove))
        .route("/books/:id/stock", put(books::set_stock))
        .route("/books/prices", post(books::update_prices))
        .route("/users", get(users::list).post(users::create))
        .route("/users/:id", delete(users::remove))
        .route("/sales", get(sales::list).post(sales::create))
        .route("/sales/:id", get(sales::get_one).delete(sales::remove))
        .route("/sales/:id/items", put(sales::replace_items))
        .route("/sales/:id/factura", get(sales::invoice))
        .route("/reports/billing", get(system::billing))
        .with_state(db)
}
