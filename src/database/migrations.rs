use anyhow::Result;
use sqlx::SqlitePool;
use tracing::info;

pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    info!("Running database migrations...");

    create_employees_table(pool).await?;
    create_attendance_table(pool).await?;

    info!("Database migrations completed successfully");
    Ok(())
}

async fn create_employees_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            rank TEXT,
            rrn TEXT,
            phone TEXT,
            hourly_wage INTEGER,
            bank TEXT,
            account TEXT,
            address TEXT,
            contract_date DATE,
            note TEXT,
            updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_attendance_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS attendance (
            id INTEGER PRIMARY KEY,
            employee_id INTEGER NOT NULL,
            work_date DATE NOT NULL,
            clock_in TIME,
            clock_out TIME,
            memo TEXT,
            updated_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (employee_id) REFERENCES employees (id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_attendance_employee_date
        ON attendance (employee_id, work_date)
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
