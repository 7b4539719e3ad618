//! Plain-text table rendering for list commands.

use libreria_core::invoice::DEFAULT_CURRENCY;
use libreria_core::{Book, Sale, User};

pub fn print_books(books: &[Book]) {
    if books.is_empty() {
        println!("(no books)");
        return;
    }
    println!(
        "{:>5}  {:<32} {:<24} {:<14} {:>6} {:>10}",
        "ID", "TITLE", "AUTHOR", "ISBN", "STOCK", "PRICE"
    );
    for book in books {
        println!(
            "{:>5}  {:<32} {:<24} {:<14} {:>6} {:>10}",
            book.id,
            clip(&book.title, 32),
            clip(&book.author, 24),
            book.isbn.as_deref().unwrap_or("-"),
            book.stock,
            book.price().display_with(DEFAULT_CURRENCY),
        );
    }
}

pub fn print_sales(sales: &[Sale]) {
    if sales.is_empty() {
        println!("(no sales)");
        return;
    }
    println!(
        "{:>5}  {:<20} {:<24} {:>7} {:>10}",
        "ID", "DATE", "CUSTOMER", "USER", "TOTAL"
    );
    for sale in sales {
        println!(
            "{:>5}  {:<20} {:<24} {:>7} {:>10}",
            sale.id,
            sale.created_at.format("%Y-%m-%d %H:%M"),
            sale.customer_name.as_deref().unwrap_or("-"),
            sale.user_id.map_or_else(|| "-".to_string(), |id| id.to_string()),
            sale.total().display_with(DEFAULT_CURRENCY),
        );
    }
}

pub fn print_users(users: &[User]) {
    if users.is_empty() {
        println!("(no users)");
        return;
    }
    println!("{:>5}  {:<24} {:<32}", "ID", "NAME", "EMAIL");
    for user in users {
        println!(
            "{:>5}  {:<24} {:<32}",
            user.id,
            clip(&user.name, 24),
            user.email
        );
    }
}

fn clip(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        s.chars().take(max.saturating_sub(1)).chain(['…']).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_keeps_short_strings() {
        assert_eq!(clip("1984", 10), "1984");
    }

    #[test]
    fn test_clip_truncates_with_ellipsis() {
        let clipped = clip("a very long book title", 8);
        assert_eq!(clipped.chars().count(), 8);
        assert!(clipped.ends_with('…'));
    }
}
