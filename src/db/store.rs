use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};
use std::str::FromStr;
use tracing::{debug, warn};

use crate::db::FoodItemRepository;
use crate::quality::models::{FoodItemRecord, NutritionalInfo};

const IN_MEMORY: &str = ":memory:";

pub struct Store {
    pool: SqlitePool,
}

/// Raw `food_items` row. `nutritional_info` is stored as JSON text.
#[derive(Debug, Clone, FromRow)]
struct FoodItemRow {
    id: String,
    name: Option<String>,
    brand: Option<String>,
    barcode: Option<String>,
    category: Option<String>,
    nutritional_info: Option<String>,
    data_completeness: Option<f64>,
    created_at: Option<String>,
    updated_at: Option<String>,
}

impl FoodItemRow {
    fn into_record(self) -> FoodItemRecord {
        let nutritional_info = match self.nutritional_info.as_deref() {
            Some(json) => serde_json::from_str::<NutritionalInfo>(json).unwrap_or_else(|e| {
                warn!(
                    food_item_id = %self.id,
                    error = %e,
                    "Stored nutritional_info is not valid, scoring it as empty"
                );
                NutritionalInfo::default()
            }),
            None => NutritionalInfo::default(),
        };

        FoodItemRecord {
            id: Some(self.id),
            name: self.name,
            brand: self.brand,
            barcode: self.barcode,
            category: self.category,
            nutritional_info,
            data_completeness: self.data_completeness,
            created_at: parse_timestamp(self.created_at.as_deref()),
            updated_at: parse_timestamp(self.updated_at.as_deref()),
        }
    }
}

/// Same shape as the column defaults: `2024-03-01T12:00:00Z`.
fn format_timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn parse_timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    value
        .and_then(|v| DateTime::parse_from_rfc3339(v).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

impl Store {
    pub async fn new(database_path: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{database_path}"))
            .context("Invalid database path")?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal);

        // Every connection to ":memory:" opens its own database, so keep exactly one alive.
        let pool_options = if database_path == IN_MEMORY {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .context("Failed to connect to SQLite database")?;

        let store = Self { pool };
        store.migrate().await?;

        Ok(store)
    }

    async fn migrate(&self) -> Result<()> {
        let migration_sql = include_str!("../../migrations/001_init.sql");
        // Execute each statement separately (sqlx doesn't support multiple statements in one call)
        for statement in migration_sql.split(';') {
            let trimmed = statement.trim();
            if !trimmed.is_empty() {
                sqlx::query(trimmed)
                    .execute(&self.pool)
                    .await
                    .with_context(|| format!("Failed to execute migration: {trimmed}"))?;
            }
        }
        Ok(())
    }

    /// Insert or replace a food item. Generates an id when the record has none.
    pub async fn insert_food_item(&self, item: &FoodItemRecord) -> Result<String> {
        let id = item
            .id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        let nutritional_info = serde_json::to_string(&item.nutritional_info)
            .context("Failed to serialize nutritional_info")?;

        sqlx::query(
            "INSERT OR REPLACE INTO food_items (id, name, brand, barcode, category, nutritional_info, data_completeness, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?,
                     COALESCE(?, strftime('%Y-%m-%dT%H:%M:%SZ', 'now')),
                     COALESCE(?, strftime('%Y-%m-%dT%H:%M:%SZ', 'now')))",
        )
        .bind(&id)
        .bind(&item.name)
        .bind(&item.brand)
        .bind(&item.barcode)
        .bind(&item.category)
        .bind(nutritional_info)
        .bind(item.data_completeness)
        .bind(item.created_at.map(format_timestamp))
        .bind(item.updated_at.map(format_timestamp))
        .execute(&self.pool)
        .await
        .context("Failed to insert food item")?;

        debug!(food_item_id = %id, "Food item stored");
        Ok(id)
    }

    pub async fn count_food_items(&self) -> Result<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM food_items")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count food items")?;
        Ok(row.0)
    }
}

#[async_trait]
impl FoodItemRepository for Store {
    async fn get_food_item(&self, id: &str) -> Result<Option<FoodItemRecord>> {
        let row = sqlx::query_as::<_, FoodItemRow>("SELECT * FROM food_items WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch food item")?;
        Ok(row.map(FoodItemRow::into_record))
    }

    async fn get_food_items(&self, ids: &[String]) -> Result<Vec<FoodItemRecord>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query = QueryBuilder::<Sqlite>::new("SELECT * FROM food_items WHERE id IN (");
        let mut separated = query.separated(", ");
        for id in ids {
            separated.push_bind(id);
        }
        separated.push_unseparated(")");

        let rows = query
            .build_query_as::<FoodItemRow>()
            .fetch_all(&self.pool)
            .await
            .context("Failed to fetch food items by id")?;
        Ok(rows.into_iter().map(FoodItemRow::into_record).collect())
    }

    async fn list_food_items(&self, limit: usize) -> Result<Vec<FoodItemRecord>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = sqlx::query_as::<_, FoodItemRow>(
            "SELECT * FROM food_items ORDER BY created_at DESC, id LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list food items")?;
        Ok(rows.into_iter().map(FoodItemRow::into_record).collect())
    }
}
