//! Command handlers, grouped by subject area.

pub mod books;
pub mod db;
pub mod reports;
pub mod sales;
pub mod users;
