//! CLI for schema migrations
//!
//! Applies or lists the migrations embedded from `packages/server/migrations`.
//! Output is JSON so scripts can parse it.

use std::collections::HashSet;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use emasjid_core::config::Config;
use serde::Serialize;
use sqlx::migrate::{Migrate, Migrator};
use sqlx::PgPool;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

#[derive(Parser)]
#[command(name = "migrate_cli")]
#[command(about = "Schema migration CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply all pending migrations
    Run,

    /// List embedded migrations and whether each is applied
    List,
}

// ============================================================================
// JSON Response Types
// ============================================================================

#[derive(Serialize)]
struct Response {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    migrations: Option<Vec<MigrationInfo>>,
}

#[derive(Serialize)]
struct MigrationInfo {
    version: i64,
    description: String,
    applied: bool,
}

fn output(resp: Response) -> Result<()> {
    println!("{}", serde_json::to_string(&resp)?);
    Ok(())
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run => cmd_run().await,
        Commands::List => cmd_list().await,
    }
}

async fn get_pool() -> Result<PgPool> {
    let config = Config::from_env()?;
    PgPool::connect(&config.database_url)
        .await
        .context("Failed to connect to database")
}

// ============================================================================
// Commands
// ============================================================================

async fn cmd_run() -> Result<()> {
    let pool = get_pool().await?;

    MIGRATOR
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    output(Response {
        success: true,
        message: Some(format!("{} migrations up to date", MIGRATOR.iter().count())),
        migrations: None,
    })
}

async fn cmd_list() -> Result<()> {
    let pool = get_pool().await?;
    let mut conn = pool.acquire().await.context("Failed to acquire connection")?;

    conn.ensure_migrations_table()
        .await
        .context("Failed to create migrations table")?;
    let applied: HashSet<i64> = conn
        .list_applied_migrations()
        .await
        .context("Failed to list applied migrations")?
        .into_iter()
        .map(|m| m.version)
        .collect();

    let migrations = MIGRATOR
        .iter()
        .map(|m| MigrationInfo {
            version: m.version,
            description: m.description.to_string(),
            applied: applied.contains(&m.version),
        })
        .collect();

    output(Response {
        success: true,
        message: None,
        migrations: Some(migrations),
    })
}
