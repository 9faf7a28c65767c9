//! SQLite database layer (embedded, no external dependencies)

use anyhow::{Context, Result};
use async_trait::async_trait;
use employee_core::{Employee, EmployeeError, EmployeePayload, EmployeeStore};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::sync::Arc;

pub struct Database {
    pool: Arc<SqlitePool>,
}

impl Database {
    pub async fn new(database_path: &str) -> Result<Self> {
        tracing::info!("Opening SQLite database at: {}", database_path);

        let parent = std::path::Path::new(database_path)
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Invalid database path: no parent directory"))?;

        // A bare file name has an empty parent, meaning the working directory
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create database directory: {}", parent.display())
            })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .with_context(|| {
                format!("Failed to connect to SQLite database at: {}", database_path)
            })?;

        tracing::info!("SQLite connection established, running migrations...");

        Self::run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;

        tracing::info!("Database initialization complete");

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Private in-memory database, used by tests.
    ///
    /// Every SQLite connection to `:memory:` gets its own database, so the
    /// pool is pinned to a single connection that is never recycled.
    #[cfg(test)]
    pub async fn in_memory() -> Result<Self> {
        let options: SqliteConnectOptions = "sqlite::memory:"
            .parse()
            .context("Invalid in-memory SQLite URL")?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None::<std::time::Duration>)
            .max_lifetime(None::<std::time::Duration>)
            .connect_with(options)
            .await
            .context("Failed to open in-memory SQLite database")?;

        Self::run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    async fn run_migrations(pool: &SqlitePool) -> Result<()> {
        // AUTOINCREMENT keeps ids of deleted rows from being handed out again
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS employees (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                address TEXT NOT NULL,
                role TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}

fn db_err(e: sqlx::Error) -> EmployeeError {
    EmployeeError::Database(e.to_string())
}

#[async_trait]
impl EmployeeStore for Database {
    async fn find_all(&self) -> employee_core::Result<Vec<Employee>> {
        let rows: Vec<EmployeeRow> = sqlx::query_as(
            r#"
            SELECT id, name, address, role FROM employees ORDER BY id ASC
            "#,
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(db_err)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn find_by_id(&self, id: i64) -> employee_core::Result<Option<Employee>> {
        let row: Option<EmployeeRow> = sqlx::query_as(
            r#"
            SELECT id, name, address, role FROM employees WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&*self.pool)
        .await
        .map_err(db_err)?;

        Ok(row.map(|r| r.into()))
    }

    async fn insert(&self, payload: &EmployeePayload) -> employee_core::Result<Employee> {
        let result = sqlx::query(
            r#"
            INSERT INTO employees (name, address, role)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(&payload.name)
        .bind(&payload.address)
        .bind(&payload.role)
        .execute(&*self.pool)
        .await
        .map_err(db_err)?;

        Ok(Employee {
            id: result.last_insert_rowid(),
            name: payload.name.clone(),
            address: payload.address.clone(),
            role: payload.role.clone(),
        })
    }

    async fn update(&self, employee: &Employee) -> employee_core::Result<Employee> {
        let result = sqlx::query(
            r#"
            UPDATE employees SET name = ?1, address = ?2, role = ?3
            WHERE id = ?4
            "#,
        )
        .bind(&employee.name)
        .bind(&employee.address)
        .bind(&employee.role)
        .bind(employee.id)
        .execute(&*self.pool)
        .await
        .map_err(db_err)?;

        // Deleted by a concurrent request after the caller looked it up
        if result.rows_affected() == 0 {
            return Err(EmployeeError::NotFound(employee.id));
        }

        Ok(employee.clone())
    }

    async fn delete_by_id(&self, id: i64) -> employee_core::Result<()> {
        sqlx::query(
            r#"
            DELETE FROM employees WHERE id = ?1
            "#,
        )
        .bind(id)
        .execute(&*self.pool)
        .await
        .map_err(db_err)?;

        Ok(())
    }

    async fn delete_all(&self) -> employee_core::Result<()> {
        sqlx::query("DELETE FROM employees")
            .execute(&*self.pool)
            .await
            .map_err(db_err)?;

        Ok(())
    }
}

// Helper struct for sqlx query_as
#[derive(sqlx::FromRow)]
struct EmployeeRow {
    id: i64,
    name: String,
    address: String,
    role: String,
}

impl From<EmployeeRow> for Employee {
    fn from(r: EmployeeRow) -> Self {
        Employee {
            id: r.id,
            name: r.name,
            address: r.address,
            role: r.role,
        }
    }
}
