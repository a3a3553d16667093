//! Dump the interaction log to CSV.
//!
//! Environment variables:
//! - `RAGCHAT_DB_URL` - SQLite URL (default: sqlite:data/feedback.db?mode=rwc)
//! - `EXPORT_OUTPUT` - output file (default: feedback_export.csv)
//! - `EXPORT_INCLUDE_TEST` - include operator test traffic (default: false)

use std::env;
use std::fs::File;
use std::io::BufWriter;

use tracing::info;

use database::{export, Database};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let database_url = env::var("RAGCHAT_DB_URL")
        .unwrap_or_else(|_| "sqlite:data/feedback.db?mode=rwc".to_string());
    let output = env::var("EXPORT_OUTPUT").unwrap_or_else(|_| "feedback_export.csv".to_string());
    let include_test = env::var("EXPORT_INCLUDE_TEST")
        .ok()
        .map(|v| v.to_lowercase() == "true" || v == "1")
        .unwrap_or(false);

    let db = Database::connect(&database_url).await?;

    let mut out = BufWriter::new(File::create(&output)?);
    let rows = export::export_csv(db.pool(), &mut out, include_test).await?;

    info!(rows, output = %output, include_test, "Export complete");

    db.close().await;
    Ok(())
}
