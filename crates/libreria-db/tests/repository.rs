//! Integration tests for the repository layer against in-memory SQLite.
//!
//! Each test gets an isolated database with migrations applied, then
//! exercises the repositories exactly the way the CLI and admin layers do.

use chrono::{Duration, Utc};

use libreria_core::{Money, NewBook, NewUser, OrderLine};
use libreria_db::{Database, DbConfig, DbError, PriceChange, PriceFilter};

async fn test_db() -> Database {
    Database::new(DbConfig::in_memory()).await.unwrap()
}

async fn add_book(
    db: &Database,
    title: &str,
    author: &str,
    isbn: Option<&str>,
    stock: i64,
    price_cents: i64,
) -> i64 {
    db.books()
        .insert(&NewBook {
            title: title.to_string(),
            author: author.to_string(),
            isbn: isbn.map(str::to_string),
            stock,
            price_cents,
        })
        .await
        .unwrap()
        .id
}

// =============================================================================
// Books
// =============================================================================

#[tokio::test]
async fn insert_and_list_books_in_insertion_order() {
    let db = test_db().await;
    let a = add_book(&db, "1984", "George Orwell", Some("9780451524935"), 5, 1250).await;
    let b = add_book(&db, "El Quijote", "Miguel de Cervantes", None, 10, 1999).await;

    let books = db.books().list().await.unwrap();
    assert_eq!(books.iter().map(|b| b.id).collect::<Vec<_>>(), vec![a, b]);
    assert_eq!(books[0].price(), Money::from_cents(1250));
    assert_eq!(db.books().count().await.unwrap(), 2);
}

#[tokio::test]
async fn insert_book_requires_title_and_author() {
    let db = test_db().await;

    let missing_title = NewBook {
        title: String::new(),
        author: "Someone".to_string(),
        ..NewBook::default()
    };
    assert!(matches!(
        db.books().insert(&missing_title).await,
        Err(DbError::Validation(_))
    ));

    let missing_author = NewBook {
        title: "Untitled".to_string(),
        author: "   ".to_string(),
        ..NewBook::default()
    };
    assert!(matches!(
        db.books().insert(&missing_author).await,
        Err(DbError::Validation(_))
    ));
}

#[tokio::test]
async fn duplicate_isbn_is_rejected() {
    let db = test_db().await;
    add_book(&db, "1984", "George Orwell", Some("9780451524935"), 5, 1250).await;

    let dup = NewBook {
        title: "Another 1984".to_string(),
        author: "Someone Else".to_string(),
        isbn: Some("9780451524935".to_string()),
        stock: 1,
        price_cents: 100,
    };
    assert!(matches!(
        db.books().insert(&dup).await,
        Err(DbError::UniqueViolation { .. })
    ));

    // Missing ISBNs do not collide with each other.
    add_book(&db, "No Isbn A", "X", None, 0, 0).await;
    add_book(&db, "No Isbn B", "Y", None, 0, 0).await;
}

#[tokio::test]
async fn update_stock_sets_absolute_level() {
    let db = test_db().await;
    let id = add_book(&db, "1984", "George Orwell", None, 5, 1250).await;

    let updated = db.books().update_stock(id, 42).await.unwrap().unwrap();
    assert_eq!(updated.stock, 42);

    assert!(db.books().update_stock(9999, 1).await.unwrap().is_none());
    assert!(matches!(
        db.books().update_stock(id, -1).await,
        Err(DbError::Validation(_))
    ));
}

#[tokio::test]
async fn delete_book_blocked_while_referenced() {
    let db = test_db().await;
    let id = add_book(&db, "1984", "George Orwell", None, 5, 1250).await;
    let sale = db
        .sales()
        .create(Some("Cliente"), &[OrderLine::new(id, 1)], None)
        .await
        .unwrap();

    assert!(matches!(
        db.books().delete(id).await,
        Err(DbError::ForeignKeyViolation { .. })
    ));

    // Once the sale is gone the book can be removed.
    assert!(db.sales().delete(sale.sale.id).await.unwrap());
    assert!(db.books().delete(id).await.unwrap());
    assert!(db.books().list().await.unwrap().is_empty());

    // Deleting a missing id reports false, not an error.
    assert!(!db.books().delete(id).await.unwrap());
}

// =============================================================================
// Bulk price updates
// =============================================================================

#[tokio::test]
async fn bulk_update_by_factor_scales_matching_rows() {
    let db = test_db().await;
    add_book(&db, "A", "Orwell", None, 1, 999).await;
    add_book(&db, "B", "Orwell", None, 1, 1000).await;
    add_book(&db, "C", "Cervantes", None, 1, 500).await;

    let filter = PriceFilter {
        author: Some("Orwell".to_string()),
        ..PriceFilter::default()
    };
    let count = db
        .books()
        .bulk_update_price(&filter, PriceChange::Factor(1.1))
        .await
        .unwrap();
    assert_eq!(count, 2);

    let books = db.books().list().await.unwrap();
    // 999 * 1.1 = 1098.9 rounds to 1099; 1000 * 1.1 = 1100 exactly.
    assert_eq!(books[0].price_cents, 1099);
    assert_eq!(books[1].price_cents, 1100);
    assert_eq!(books[2].price_cents, 500);
}

#[tokio::test]
async fn bulk_update_by_ids_and_range() {
    let db = test_db().await;
    let a = add_book(&db, "A", "X", None, 1, 100).await;
    let b = add_book(&db, "B", "X", None, 1, 900).await;
    add_book(&db, "C", "X", None, 1, 5000).await;

    let by_ids = PriceFilter {
        ids: Some(vec![a, b]),
        ..PriceFilter::default()
    };
    let count = db
        .books()
        .bulk_update_price(&by_ids, PriceChange::Set(Money::from_cents(250)))
        .await
        .unwrap();
    assert_eq!(count, 2);

    let in_range = PriceFilter {
        min_price: Some(Money::from_cents(200)),
        max_price: Some(Money::from_cents(300)),
        ..PriceFilter::default()
    };
    let count = db
        .books()
        .bulk_update_price(&in_range, PriceChange::Factor(2.0))
        .await
        .unwrap();
    assert_eq!(count, 2);

    let books = db.books().list().await.unwrap();
    assert_eq!(books[0].price_cents, 500);
    assert_eq!(books[1].price_cents, 500);
    assert_eq!(books[2].price_cents, 5000);
}

#[tokio::test]
async fn bulk_update_rejects_bad_input_and_empty_id_set() {
    let db = test_db().await;
    add_book(&db, "A", "X", None, 1, 100).await;

    assert!(matches!(
        db.books()
            .bulk_update_price(&PriceFilter::default(), PriceChange::Factor(0.0))
            .await,
        Err(DbError::Validation(_))
    ));
    assert!(matches!(
        db.books()
            .bulk_update_price(
                &PriceFilter::default(),
                PriceChange::Set(Money::from_cents(-1))
            )
            .await,
        Err(DbError::Validation(_))
    ));

    let empty_ids = PriceFilter {
        ids: Some(vec![]),
        ..PriceFilter::default()
    };
    let count = db
        .books()
        .bulk_update_price(&empty_ids, PriceChange::Factor(2.0))
        .await
        .unwrap();
    assert_eq!(count, 0);
}

// =============================================================================
// Sales: create
// =============================================================================

#[tokio::test]
async fn create_sale_decrements_stock_and_computes_total() {
    let db = test_db().await;
    let id = add_book(&db, "1984", "George Orwell", None, 10, 999).await;

    let sale = db
        .sales()
        .create(Some("Cliente Demo"), &[OrderLine::new(id, 3)], None)
        .await
        .unwrap();

    assert_eq!(sale.sale.total_cents, 2997);
    assert_eq!(sale.items.len(), 1);
    assert_eq!(sale.items[0].quantity, 3);
    assert_eq!(sale.items[0].unit_price_cents, 999);
    assert_eq!(sale.items[0].line_total_cents, 2997);

    let book = db.books().get_by_id(id).await.unwrap().unwrap();
    assert_eq!(book.stock, 7);
}

#[tokio::test]
async fn create_sale_conserves_total_stock_across_books() {
    let db = test_db().await;
    let a = add_book(&db, "A", "X", None, 10, 100).await;
    let b = add_book(&db, "B", "Y", None, 8, 250).await;

    let sale = db
        .sales()
        .create(
            Some("Cliente"),
            &[OrderLine::new(a, 4), OrderLine::new(b, 2)],
            None,
        )
        .await
        .unwrap();

    // total stock delta equals the sum of requested quantities
    let books = db.books().list().await.unwrap();
    let stock_after: i64 = books.iter().map(|b| b.stock).sum();
    assert_eq!(18 - stock_after, 6);
    // total = 4*100 + 2*250
    assert_eq!(sale.sale.total_cents, 900);
}

#[tokio::test]
async fn create_sale_with_insufficient_stock_commits_nothing() {
    let db = test_db().await;
    let a = add_book(&db, "A", "X", None, 10, 100).await;
    let b = add_book(&db, "B", "Y", None, 5, 250).await;

    let err = db
        .sales()
        .create(
            Some("Cliente"),
            &[OrderLine::new(a, 2), OrderLine::new(b, 99)],
            None,
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DbError::InsufficientStock {
            available: 5,
            requested: 99,
            ..
        }
    ));

    // Neither the first item's decrement nor the sale header survived.
    let books = db.books().list().await.unwrap();
    assert_eq!(books[0].stock, 10);
    assert_eq!(books[1].stock, 5);
    assert!(db.sales().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_sale_with_unknown_book_commits_nothing() {
    let db = test_db().await;
    let a = add_book(&db, "A", "X", None, 10, 100).await;

    let err = db
        .sales()
        .create(None, &[OrderLine::new(a, 1), OrderLine::new(777, 1)], None)
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::NotFound { .. }));

    assert_eq!(db.books().get_by_id(a).await.unwrap().unwrap().stock, 10);
    assert!(db.sales().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_sale_rejects_non_positive_quantity() {
    let db = test_db().await;
    let a = add_book(&db, "A", "X", None, 10, 100).await;

    assert!(matches!(
        db.sales().create(None, &[OrderLine::new(a, 0)], None).await,
        Err(DbError::Validation(_))
    ));
}

#[tokio::test]
async fn create_sale_aggregates_duplicate_book_ids() {
    let db = test_db().await;
    let a = add_book(&db, "A", "X", None, 10, 100).await;

    let sale = db
        .sales()
        .create(None, &[OrderLine::new(a, 1), OrderLine::new(a, 2)], None)
        .await
        .unwrap();

    assert_eq!(sale.items.len(), 1);
    assert_eq!(sale.items[0].quantity, 3);
    assert_eq!(db.books().get_by_id(a).await.unwrap().unwrap().stock, 7);
}

#[tokio::test]
async fn create_sale_with_unknown_user_fails() {
    let db = test_db().await;
    let a = add_book(&db, "A", "X", None, 10, 100).await;

    let err = db
        .sales()
        .create(None, &[OrderLine::new(a, 1)], Some(999))
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::NotFound { .. }));
    assert_eq!(db.books().get_by_id(a).await.unwrap().unwrap().stock, 10);
}

// =============================================================================
// Sales: update / delete
// =============================================================================

#[tokio::test]
async fn update_sale_restores_then_applies() {
    // The worked example: stock 10, price 9.99; sell 3, then change to 5.
    let db = test_db().await;
    let id = add_book(&db, "1984", "George Orwell", None, 10, 999).await;

    let sale = db
        .sales()
        .create(Some("Cliente"), &[OrderLine::new(id, 3)], None)
        .await
        .unwrap();
    assert_eq!(db.books().get_by_id(id).await.unwrap().unwrap().stock, 7);

    let updated = db
        .sales()
        .update(sale.sale.id, &[OrderLine::new(id, 5)])
        .await
        .unwrap()
        .unwrap();

    assert_eq!(db.books().get_by_id(id).await.unwrap().unwrap().stock, 5);
    assert_eq!(updated.sale.total_cents, 4995);
    assert_eq!(updated.items.len(), 1);
    assert_eq!(updated.items[0].quantity, 5);

    // Reading back matches what update returned.
    let read = db.sales().get(sale.sale.id).await.unwrap().unwrap();
    assert_eq!(read, updated);
}

#[tokio::test]
async fn update_sale_replaces_item_set() {
    let db = test_db().await;
    let a = add_book(&db, "A", "X", None, 10, 100).await;
    let b = add_book(&db, "B", "Y", None, 10, 250).await;

    let sale = db
        .sales()
        .create(None, &[OrderLine::new(a, 2)], None)
        .await
        .unwrap();

    let updated = db
        .sales()
        .update(sale.sale.id, &[OrderLine::new(b, 4)])
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.items.len(), 1);
    assert_eq!(updated.items[0].book_id, b);
    assert_eq!(updated.sale.total_cents, 1000);
    // a's stock restored, b's decremented
    assert_eq!(db.books().get_by_id(a).await.unwrap().unwrap().stock, 10);
    assert_eq!(db.books().get_by_id(b).await.unwrap().unwrap().stock, 6);
}

#[tokio::test]
async fn update_validates_against_restored_stock() {
    // stock 10, sale holds 8; updating to 10 must pass because the 8 are
    // restored before the new set is validated.
    let db = test_db().await;
    let id = add_book(&db, "A", "X", None, 10, 100).await;

    let sale = db
        .sales()
        .create(None, &[OrderLine::new(id, 8)], None)
        .await
        .unwrap();

    let updated = db
        .sales()
        .update(sale.sale.id, &[OrderLine::new(id, 10)])
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.items[0].quantity, 10);
    assert_eq!(db.books().get_by_id(id).await.unwrap().unwrap().stock, 0);
}

#[tokio::test]
async fn failed_update_rolls_back_stock_restoration() {
    let db = test_db().await;
    let id = add_book(&db, "A", "X", None, 10, 100).await;

    let sale = db
        .sales()
        .create(None, &[OrderLine::new(id, 3)], None)
        .await
        .unwrap();
    assert_eq!(db.books().get_by_id(id).await.unwrap().unwrap().stock, 7);

    let err = db
        .sales()
        .update(sale.sale.id, &[OrderLine::new(id, 100)])
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::InsufficientStock { .. }));

    // Stock restoration was rolled back; the sale kept its original state.
    assert_eq!(db.books().get_by_id(id).await.unwrap().unwrap().stock, 7);
    let read = db.sales().get(sale.sale.id).await.unwrap().unwrap();
    assert_eq!(read.items[0].quantity, 3);
    assert_eq!(read.sale.total_cents, 300);
}

#[tokio::test]
async fn update_missing_sale_returns_none() {
    let db = test_db().await;
    let id = add_book(&db, "A", "X", None, 10, 100).await;

    let result = db.sales().update(123, &[OrderLine::new(id, 1)]).await.unwrap();
    assert!(result.is_none());
    assert_eq!(db.books().get_by_id(id).await.unwrap().unwrap().stock, 10);
}

#[tokio::test]
async fn delete_sale_restores_stock_and_cascades_items() {
    let db = test_db().await;
    let id = add_book(&db, "A", "X", None, 10, 100).await;

    let sale = db
        .sales()
        .create(None, &[OrderLine::new(id, 4)], None)
        .await
        .unwrap();
    assert_eq!(db.books().get_by_id(id).await.unwrap().unwrap().stock, 6);

    assert!(db.sales().delete(sale.sale.id).await.unwrap());
    assert_eq!(db.books().get_by_id(id).await.unwrap().unwrap().stock, 10);
    assert!(db.sales().get(sale.sale.id).await.unwrap().is_none());

    // idempotence: second delete reports false
    assert!(!db.sales().delete(sale.sale.id).await.unwrap());
}

#[tokio::test]
async fn list_sales_most_recent_first() {
    let db = test_db().await;
    let id = add_book(&db, "A", "X", None, 10, 100).await;

    let first = db.sales().create(None, &[OrderLine::new(id, 1)], None).await.unwrap();
    let second = db.sales().create(None, &[OrderLine::new(id, 1)], None).await.unwrap();

    let sales = db.sales().list().await.unwrap();
    assert_eq!(
        sales.iter().map(|s| s.id).collect::<Vec<_>>(),
        vec![second.sale.id, first.sale.id]
    );
}

// =============================================================================
// Users
// =============================================================================

#[tokio::test]
async fn user_crud_roundtrip() {
    let db = test_db().await;

    let user = db
        .users()
        .insert(&NewUser {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(db.users().list().await.unwrap().len(), 1);
    assert_eq!(
        db.users().get_by_id(user.id).await.unwrap().unwrap().email,
        "ana@example.com"
    );
    assert!(db.users().delete(user.id).await.unwrap());
    assert!(!db.users().delete(user.id).await.unwrap());

    assert!(matches!(
        db.users()
            .insert(&NewUser {
                name: "Bad".to_string(),
                email: "not-an-email".to_string(),
            })
            .await,
        Err(DbError::Validation(_))
    ));
}

#[tokio::test]
async fn deleting_referenced_user_nulls_sale_owner() {
    let db = test_db().await;
    let book = add_book(&db, "A", "X", None, 10, 100).await;
    let user = db
        .users()
        .insert(&NewUser {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
        })
        .await
        .unwrap();

    let sale = db
        .sales()
        .create(Some("Cliente"), &[OrderLine::new(book, 1)], Some(user.id))
        .await
        .unwrap();
    assert_eq!(sale.sale.user_id, Some(user.id));

    assert!(db.users().delete(user.id).await.unwrap());

    let read = db.sales().get(sale.sale.id).await.unwrap().unwrap();
    assert_eq!(read.sale.user_id, None);
}

// =============================================================================
// Invoices and reporting
// =============================================================================

#[tokio::test]
async fn invoice_lines_join_book_titles() {
    let db = test_db().await;
    let a = add_book(&db, "1984", "George Orwell", None, 10, 999).await;
    let b = add_book(&db, "El Quijote", "Miguel de Cervantes", None, 10, 1999).await;

    let sale = db
        .sales()
        .create(
            Some("Cliente Demo"),
            &[OrderLine::new(a, 3), OrderLine::new(b, 1)],
            None,
        )
        .await
        .unwrap();

    let lines = db.sales().invoice_lines(sale.sale.id).await.unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].title, "1984");
    assert_eq!(lines[0].line_total_cents, 2997);
    assert_eq!(lines[1].title, "El Quijote");

    let text =
        libreria_core::invoice::render_invoice(&sale.sale, &lines, "€");
    assert!(text.contains("1984"));
    assert!(text.contains("€29.97"));
    assert!(text.contains("Cliente Demo"));
}

#[tokio::test]
async fn billing_summary_counts_window() {
    let db = test_db().await;
    let id = add_book(&db, "A", "X", None, 10, 500).await;

    db.sales().create(None, &[OrderLine::new(id, 1)], None).await.unwrap();
    db.sales().create(None, &[OrderLine::new(id, 2)], None).await.unwrap();

    let summary = db
        .sales()
        .billing_summary(Utc::now() - Duration::days(30))
        .await
        .unwrap();
    assert_eq!(summary.sales, 2);
    assert_eq!(summary.total_cents, 1500);

    let future = db
        .sales()
        .billing_summary(Utc::now() + Duration::days(1))
        .await
        .unwrap();
    assert_eq!(future.sales, 0);
    assert_eq!(future.total_cents, 0);
}
