//! SQLite pool lifecycle, embedded migrations, and row mapping.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use serde_json::{json, Map, Value};

use crate::error::AppResult;
use crate::schema::{FieldKind, ResourceSchema};

/// Shared per-process state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
}

/// Opens the pool, creating the database file when missing.
pub async fn init_pool(url: &str, max_connections: u32) -> AppResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(url)
        .map_err(sqlx::Error::from)?
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;
    Ok(pool)
}

/// Idempotent schema setup. Uniqueness for blog slugs and setting keys is
/// enforced here; the handlers treat the resulting constraint violation as
/// the authoritative collision signal.
const MIGRATIONS: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS loan_applications (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        phone TEXT NOT NULL,
        email TEXT NOT NULL,
        city TEXT NOT NULL,
        loan_type TEXT NOT NULL,
        amount REAL NOT NULL,
        monthly_income REAL NOT NULL,
        consent INTEGER NOT NULL DEFAULT 1,
        status TEXT NOT NULL DEFAULT 'pending',
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS testimonials (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        designation TEXT,
        company TEXT,
        review TEXT NOT NULL,
        rating INTEGER NOT NULL,
        image_url TEXT,
        is_featured INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS blog_posts (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        slug TEXT NOT NULL,
        excerpt TEXT,
        content TEXT NOT NULL,
        featured_image TEXT,
        author TEXT NOT NULL,
        category TEXT,
        tags TEXT,
        is_published INTEGER NOT NULL DEFAULT 0,
        published_at TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )",
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_blog_posts_slug ON blog_posts (slug)",
    "CREATE TABLE IF NOT EXISTS loan_docs (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        loan_type TEXT NOT NULL,
        document_name TEXT NOT NULL,
        description TEXT,
        icon_name TEXT,
        display_order INTEGER NOT NULL DEFAULT 0,
        is_mandatory INTEGER NOT NULL DEFAULT 1,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS messages (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        phone TEXT,
        subject TEXT,
        message TEXT NOT NULL,
        is_read INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS settings (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        key TEXT NOT NULL,
        value TEXT NOT NULL,
        category TEXT NOT NULL DEFAULT 'general',
        description TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )",
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_settings_key ON settings (key)",
    "CREATE TABLE IF NOT EXISTS emi_calculations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        amount REAL NOT NULL,
        tenure_months INTEGER NOT NULL,
        interest_rate REAL NOT NULL,
        emi_amount REAL NOT NULL,
        total_interest REAL NOT NULL,
        total_amount REAL NOT NULL,
        user_ip TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )",
];

pub async fn migrate(pool: &SqlitePool) -> AppResult<()> {
    for statement in MIGRATIONS {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}

/// Maps a row to its JSON representation using the schema's field kinds.
pub fn row_to_json(schema: &ResourceSchema, row: &SqliteRow) -> AppResult<Value> {
    let mut obj = Map::new();
    obj.insert("id".into(), json!(row.try_get::<i64, _>("id")?));

    for field in schema.fields {
        let value = match field.kind {
            FieldKind::Text => match row.try_get::<Option<String>, _>(field.column)? {
                Some(s) => json!(s),
                None => Value::Null,
            },
            FieldKind::Integer => match row.try_get::<Option<i64>, _>(field.column)? {
                Some(n) => json!(n),
                None => Value::Null,
            },
            FieldKind::Real => match row.try_get::<Option<f64>, _>(field.column)? {
                Some(f) => json!(f),
                None => Value::Null,
            },
            FieldKind::Boolean => match row.try_get::<Option<i64>, _>(field.column)? {
                Some(n) => json!(n != 0),
                None => Value::Null,
            },
            FieldKind::StringArray => match row.try_get::<Option<String>, _>(field.column)? {
                Some(s) => serde_json::from_str(&s).unwrap_or_else(|_| json!([])),
                None => json!([]),
            },
        };
        obj.insert(field.name.to_string(), value);
    }

    obj.insert(
        "createdAt".into(),
        json!(row.try_get::<String, _>("created_at")?),
    );
    obj.insert(
        "updatedAt".into(),
        json!(row.try_get::<String, _>("updated_at")?),
    );
    Ok(Value::Object(obj))
}

/// Handler-set timestamp, RFC 3339 with millisecond precision. The store
/// never fills timestamps itself.
pub fn now_iso() -> String {
    chrono::Utc::now()
        .to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// True when the error is a unique-index violation.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}
