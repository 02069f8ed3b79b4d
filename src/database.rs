//! # SQLite
//!
//! Durable score storage.
//!
//! Core purpose is to append submitted game scores and read back the
//! recent top entries. Also counts recent submissions per identity hash
//! for the rate limiter.
//!
//! ## Requirements
//!
//! - Append-only: rows are never updated or deleted by the application
//! - `created_at` is assigned by the server at insertion, never by the client
//! - Leaderboard expiry is a query-time window filter, not deletion, so
//!   history is kept while the visible board stays bounded
//!
//! ## Schema
//!
//! - `scores(id INTEGER PRIMARY KEY, name TEXT, points REAL, created_at TEXT, ip_hash TEXT)`
//! - `ip_hash` is a salted one-way hash used only for abuse counting,
//!   never returned by any query that feeds a response
use std::{str::FromStr, time::Duration};

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

/// A leaderboard row as returned to clients. `ip_hash` is deliberately
/// absent from this view.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ScoreEntry {
    pub name: String,
    pub points: f64,
    pub created_at: DateTime<Utc>,
}

pub async fn init_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .busy_timeout(Duration::from_millis(500));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS scores (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            points REAL NOT NULL,
            created_at TEXT NOT NULL,
            ip_hash TEXT
        )",
    )
    .execute(&pool)
    .await?;

    Ok(pool)
}

pub async fn insert_score(
    pool: &SqlitePool,
    name: &str,
    points: f64,
    ip_hash: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO scores (name, points, created_at, ip_hash) VALUES (?, ?, ?, ?)")
        .bind(name)
        .bind(points)
        .bind(Utc::now())
        .bind(ip_hash)
        .execute(pool)
        .await?;

    Ok(())
}

/// Entries within the trailing `window`, highest points first. Ties break
/// by `created_at` ascending so repeated reads are deterministic.
pub async fn top_scores(
    pool: &SqlitePool,
    window: Duration,
    limit: u32,
) -> Result<Vec<ScoreEntry>, sqlx::Error> {
    let cutoff = Utc::now() - window;

    sqlx::query_as::<_, ScoreEntry>(
        "SELECT name, points, created_at FROM scores
         WHERE created_at > ?
         ORDER BY points DESC, created_at ASC
         LIMIT ?",
    )
    .bind(cutoff)
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// Submissions from one identity hash within the trailing `window`.
pub async fn count_recent(
    pool: &SqlitePool,
    ip_hash: &str,
    window: Duration,
) -> Result<i64, sqlx::Error> {
    let cutoff = Utc::now() - window;

    sqlx::query_scalar("SELECT COUNT(*) FROM scores WHERE ip_hash = ? AND created_at > ?")
        .bind(ip_hash)
        .bind(cutoff)
        .fetch_one(pool)
        .await
}
