use anyhow::Result;
use async_trait::async_trait;
use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use crate::database::models::{Employee, Rank};
use crate::ports::EmployeeRepository;

/// sqlx/SQLite adapter for the employee port.
pub struct SqliteEmployeeRepository {
    pool: SqlitePool,
}

impl SqliteEmployeeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn map_row(row: &SqliteRow) -> Employee {
    let rank: Option<String> = row.get("rank");

    Employee {
        id: Some(row.get("id")),
        name: row.get("name"),
        rank: rank.as_deref().and_then(Rank::from_db),
        rrn: row.get("rrn"),
        phone: row.get("phone"),
        hourly_wage: row.get("hourly_wage"),
        bank: row.get("bank"),
        account: row.get("account"),
        address: row.get("address"),
        contract_date: row.get("contract_date"),
        note: row.get("note"),
    }
}

#[async_trait]
impl EmployeeRepository for SqliteEmployeeRepository {
    async fn save(&self, employee: Employee) -> Result<Employee> {
        let rank = employee.rank.map(|r| r.as_str());

        match employee.id {
            None => {
                let result = sqlx::query(
                    "INSERT INTO employees (name, rank, rrn, phone, hourly_wage, bank, account,
                                            address, contract_date, note, updated_at)
                     VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, datetime('now'))",
                )
                .bind(&employee.name)
                .bind(rank)
                .bind(&employee.rrn)
                .bind(&employee.phone)
                .bind(employee.hourly_wage)
                .bind(&employee.bank)
                .bind(&employee.account)
                .bind(&employee.address)
                .bind(employee.contract_date)
                .bind(&employee.note)
                .execute(&self.pool)
                .await?;

                Ok(Employee {
                    id: Some(result.last_insert_rowid()),
                    ..employee
                })
            }
            Some(id) => {
                sqlx::query(
                    "UPDATE employees
                     SET name = ?, rank = ?, rrn = ?, phone = ?, hourly_wage = ?, bank = ?,
                         account = ?, address = ?, contract_date = ?, note = ?,
                         updated_at = datetime('now')
                     WHERE id = ?",
                )
                .bind(&employee.name)
                .bind(rank)
                .bind(&employee.rrn)
                .bind(&employee.phone)
                .bind(employee.hourly_wage)
                .bind(&employee.bank)
                .bind(&employee.account)
                .bind(&employee.address)
                .bind(employee.contract_date)
                .bind(&employee.note)
                .bind(id)
                .execute(&self.pool)
                .await?;

                Ok(employee)
            }
        }
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Employee>> {
        let row = sqlx::query("SELECT * FROM employees WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(map_row))
    }

    async fn find_all(&self) -> Result<Vec<Employee>> {
        let rows = sqlx::query("SELECT * FROM employees ORDER BY id DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(map_row).collect())
    }

    async fn search_by_name(&self, name_like: &str) -> Result<Vec<Employee>> {
        let rows = sqlx::query("SELECT * FROM employees WHERE name LIKE ? ORDER BY name")
            .bind(format!("%{}%", name_like))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(map_row).collect())
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
