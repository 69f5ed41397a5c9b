//! CGCS maintenance commands.
//!
//! ```bash
//! cgcs-maintenance dedup-divisions --batch-size 500 --dry-run
//! cgcs-maintenance import-nbe --file=nbe.xlsx --headerRow=3
//! cgcs-maintenance import-villes --file=villes.xlsx --sheet=Communes
//! cgcs-maintenance seed-admin --email admin@cgcs.ci --password '...'
//! ```
//!
//! Every command reads `DATABASE_URL` and exits non-zero on the first error.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use sea_orm::Database;

mod dedup;
mod header;
mod nbe;
mod seed;
mod sheet;
mod villes;

#[derive(Parser)]
#[command(name = "cgcs-maintenance", about = "CGCS database maintenance")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Delete administrative divisions sharing a normalized key, keeping the oldest
    DedupDivisions {
        /// Rows deleted per statement
        #[arg(long, default_value_t = 500)]
        batch_size: usize,

        /// Report duplicates without deleting
        #[arg(long)]
        dry_run: bool,
    },
    /// Reload the NBE nomenclature from a workbook
    ImportNbe(SheetArgs),
    /// Reload administrative divisions from a workbook
    ImportVilles(SheetArgs),
    /// Create the first ADMIN account
    SeedAdmin {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,

        #[arg(long, default_value = "Administrateur")]
        nom: String,

        #[arg(long, default_value = "CGCS")]
        prenom: String,
    },
}

#[derive(Args)]
struct SheetArgs {
    /// Path to the .xlsx workbook
    #[arg(long)]
    file: PathBuf,

    /// Sheet name (first sheet when omitted)
    #[arg(long)]
    sheet: Option<String>,

    /// 1-based row holding the column headers
    #[arg(long = "headerRow", default_value_t = 1)]
    header_row: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    cgcs_core::tracing::init_cli_tracing();
    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let db = Database::connect(&database_url)
        .await
        .context("connect to database")?;

    match cli.command {
        Command::DedupDivisions {
            batch_size,
            dry_run,
        } => {
            let report = dedup::run(&db, batch_size, dry_run).await?;
            tracing::info!(
                scanned = report.scanned,
                duplicated_keys = report.duplicated_keys,
                removed = report.removed,
                "division dedup finished"
            );
        }
        Command::ImportNbe(args) => {
            let table = sheet::load(&args.file, args.sheet.as_deref(), args.header_row)?;
            let records = nbe::parse(&table)?;
            let count = nbe::replace_all(&db, records).await?;
            tracing::info!(count, "nbe_lines reloaded");
        }
        Command::ImportVilles(args) => {
            let table = sheet::load(&args.file, args.sheet.as_deref(), args.header_row)?;
            let records = villes::parse(&table)?;
            let count = villes::replace_all(&db, records).await?;
            tracing::info!(count, "divisions_administratives reloaded");
        }
        Command::SeedAdmin {
            email,
            password,
            nom,
            prenom,
        } => {
            seed::seed_admin(
                &db,
                seed::AdminSeed {
                    email,
                    password,
                    nom,
                    prenom,
                },
            )
            .await?;
        }
    }
    Ok(())
}
