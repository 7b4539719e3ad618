//! # Invoice Rendering
//!
//! Renders a human-readable text invoice for a sale: header, line table,
//! total. Pure formatting over already-loaded data; nothing here touches
//! the database.

use crate::money::Money;
use crate::types::{InvoiceLine, Sale};

/// Default currency symbol for rendered amounts.
pub const DEFAULT_CURRENCY: &str = "€";

/// Renders a text invoice for a sale and its lines.
///
/// ## Example output
/// ```text
/// Invoice #3 — 2026-08-30 14:02
/// Customer: Cliente Demo
/// ------------------------------------------------------------
/// Title                                      Qty       Unit        Total
/// ------------------------------------------------------------
/// 1984                                         3      €9.99       €29.97
/// ------------------------------------------------------------
/// TOTAL                                                           €29.97
/// ```
pub fn render_invoice(sale: &Sale, lines: &[InvoiceLine], currency: &str) -> String {
    let mut out = String::new();
    let rule = "-".repeat(60);

    let customer = sale.customer_name.as_deref().unwrap_or("Unknown Customer");
    out.push_str(&format!(
        "Invoice #{} — {}\n",
        sale.id,
        sale.created_at.format("%Y-%m-%d %H:%M")
    ));
    out.push_str(&format!("Customer: {customer}\n"));
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&format!(
        "{:<40} {:>5} {:>10} {:>12}\n",
        "Title", "Qty", "Unit", "Total"
    ));
    out.push_str(&rule);
    out.push('\n');

    let mut computed = Money::zero();
    for line in lines {
        computed += line.line_total();
        out.push_str(&format!(
            "{:<40} {:>5} {:>10} {:>12}\n",
            truncate(&line.title, 40),
            line.quantity,
            line.unit_price().display_with(currency),
            line.line_total().display_with(currency),
        ));
    }

    out.push_str(&rule);
    out.push('\n');
    out.push_str(&format!(
        "{:<57} {:>12}\n",
        "TOTAL",
        sale.total().display_with(currency)
    ));

    // The stored total is authoritative; flag drift rather than hide it.
    if computed != sale.total() {
        out.push_str(&format!(
            "(warning: line items sum to {}, header says {})\n",
            computed.display_with(currency),
            sale.total().display_with(currency)
        ));
    }

    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample_sale(total_cents: i64) -> Sale {
        Sale {
            id: 3,
            user_id: None,
            customer_name: Some("Cliente Demo".to_string()),
            total_cents,
            created_at: Utc.with_ymd_and_hms(2026, 8, 30, 14, 2, 0).unwrap(),
        }
    }

    #[test]
    fn test_invoice_contains_lines_and_total() {
        let sale = sample_sale(2997);
        let lines = vec![InvoiceLine {
            title: "1984".to_string(),
            quantity: 3,
            unit_price_cents: 999,
            line_total_cents: 2997,
        }];

        let text = render_invoice(&sale, &lines, DEFAULT_CURRENCY);
        assert!(text.contains("Invoice #3"));
        assert!(text.contains("Cliente Demo"));
        assert!(text.contains("1984"));
        assert!(text.contains("€9.99"));
        assert!(text.contains("€29.97"));
        assert!(!text.contains("warning"));
    }

    #[test]
    fn test_invoice_flags_total_drift() {
        let sale = sample_sale(9999);
        let lines = vec![InvoiceLine {
            title: "1984".to_string(),
            quantity: 1,
            unit_price_cents: 999,
            line_total_cents: 999,
        }];

        let text = render_invoice(&sale, &lines, DEFAULT_CURRENCY);
        assert!(text.contains("warning"));
    }

    #[test]
    fn test_unknown_customer_fallback() {
        let mut sale = sample_sale(0);
        sale.customer_name = None;
        let text = render_invoice(&sale, &[], DEFAULT_CURRENCY);
        assert!(text.contains("Unknown Customer"));
    }
}
