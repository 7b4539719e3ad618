//! Billing report command.

use anyhow::Result;
use chrono::{Duration, Utc};

use libreria_core::invoice::DEFAULT_CURRENCY;
use libreria_core::{Money, ReportPeriod};
use libreria_db::Database;

pub async fn reporte(db: &Database, periodo: ReportPeriod, json: bool) -> Result<()> {
    let since = Utc::now() - Duration::days(periodo.days());
    let summary = db.sales().billing_summary(since).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "billing for the last {} days: {} sales, {}",
            periodo.days(),
            summary.sales,
            Money::from_cents(summary.total_cents).display_with(DEFAULT_CURRENCY)
        );
    }
    Ok(())
}
