//! Database migration runner for Picvault.
//!
//! Usage:
//!   migrator up      - Create the images table
//!   migrator down    - Drop the images table
//!   migrator status  - Show migration status
//!
//! Reads `DATABASE_URL` (or `.env`).

use picvault_db::migration::Migrator;
use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // The CLI sets up its own tracing.
    cli::run_cli(Migrator).await;
}
