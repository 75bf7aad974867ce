//! One-shot backfill runner
//!
//! Invoked manually against a live database, never as a resident service:
//!
//! ```text
//! brocante-backfill --db-url mysql://... --category 3 --job all
//! ```

use clap::{Parser, ValueEnum};
use sea_orm::Database;
use tracing_subscriber::EnvFilter;

use brocante_backfill::job;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum JobKind {
    /// Infer attribute values from keyword tables
    Attributes,
    /// Assign sub-categories by keyword scoring
    SubCategories,
    /// Run both jobs
    All,
}

#[derive(Debug, Parser)]
#[command(about = "Brocante keyword backfill jobs")]
struct Cli {
    #[arg(long = "db-url", env = "DATABASE_URL")]
    database_url: String,

    /// Category to process
    #[arg(long = "category")]
    category_id: i64,

    #[arg(long = "job", value_enum, default_value = "all")]
    job: JobKind,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Cli::parse();
    let db = Database::connect(&args.database_url).await?;

    if matches!(args.job, JobKind::Attributes | JobKind::All) {
        let report = job::backfill_attributes(&db, args.category_id).await?;
        tracing::info!(?report, "attributes job done");
    }

    if matches!(args.job, JobKind::SubCategories | JobKind::All) {
        let report = job::assign_sub_categories(&db, args.category_id).await?;
        tracing::info!(?report, "sub-categories job done");
    }

    Ok(())
}
