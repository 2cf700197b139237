use chrono::{NaiveDate, NaiveDateTime};
use sqlx::MySqlPool;

use super::error::LedgerError;

/// The ledger's view of one day's attendance row.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Shift {
    pub punch_in: NaiveDateTime,
    pub punch_out: Option<NaiveDateTime>,
}

/// Persistence capability the ledger runs against. `open_shift` and
/// `close_shift` must be atomic per (employee_id, date): a losing
/// concurrent call reports `false` instead of corrupting the row.
#[allow(async_fn_in_trait)]
pub trait AttendanceStore: Send + Sync {
    async fn employee_exists(&self, employee_id: &str) -> Result<bool, LedgerError>;

    async fn shift_for(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> Result<Option<Shift>, LedgerError>;

    /// Insert the day's row with punch_out left null.
    /// Returns false if a row for the day already exists.
    async fn open_shift(
        &self,
        employee_id: &str,
        date: NaiveDate,
        punch_in: NaiveDateTime,
    ) -> Result<bool, LedgerError>;

    /// Set punch_out on the day's open row.
    /// Returns false if there was no open row to close.
    async fn close_shift(
        &self,
        employee_id: &str,
        date: NaiveDate,
        punch_out: NaiveDateTime,
    ) -> Result<bool, LedgerError>;
}

#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

impl AttendanceStore for MySqlStore {
    async fn employee_exists(&self, employee_id: &str) -> Result<bool, LedgerError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM employees WHERE employee_id = ? LIMIT 1)",
        )
        .bind(employee_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn shift_for(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> Result<Option<Shift>, LedgerError> {
        let shift = sqlx::query_as::<_, Shift>(
            r#"
            SELECT punch_in, punch_out
            FROM attendance
            WHERE employee_id = ? AND date = ?
            "#,
        )
        .bind(employee_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(shift)
    }

    async fn open_shift(
        &self,
        employee_id: &str,
        date: NaiveDate,
        punch_in: NaiveDateTime,
    ) -> Result<bool, LedgerError> {
        let result = sqlx::query(
            r#"
            INSERT INTO attendance (employee_id, date, punch_in)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(employee_id)
        .bind(date)
        .bind(punch_in)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(true),
            Err(e) => {
                // Duplicate day row: another punch got there first
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.code().as_deref() == Some("23000") {
                        return Ok(false);
                    }
                }
                Err(e.into())
            }
        }
    }

    async fn close_shift(
        &self,
        employee_id: &str,
        date: NaiveDate,
        punch_out: NaiveDateTime,
    ) -> Result<bool, LedgerError> {
        let result = sqlx::query(
            r#"
            UPDATE attendance
            SET punch_out = ?
            WHERE employee_id = ?
            AND date = ?
            AND punch_out IS NULL
            "#,
        )
        .bind(punch_out)
        .bind(employee_id)
        .bind(date)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
pub(crate) mod memory {
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;

    use super::*;

    /// HashMap-backed store for exercising the ledger without a database.
    /// Mirrors the unique-key and conditional-update semantics of
    /// `MySqlStore`.
    pub struct MemoryStore {
        employees: HashSet<String>,
        shifts: Mutex<HashMap<(String, NaiveDate), Shift>>,
    }

    impl MemoryStore {
        pub fn with_employees(ids: &[&str]) -> Self {
            Self {
                employees: ids.iter().map(|s| s.to_string()).collect(),
                shifts: Mutex::new(HashMap::new()),
            }
        }

        pub fn shift(&self, employee_id: &str, date: NaiveDate) -> Option<Shift> {
            self.shifts
                .lock()
                .unwrap()
                .get(&(employee_id.to_string(), date))
                .cloned()
        }

        pub fn shift_count(&self) -> usize {
            self.shifts.lock().unwrap().len()
        }
    }

    impl AttendanceStore for MemoryStore {
        async fn employee_exists(&self, employee_id: &str) -> Result<bool, LedgerError> {
            Ok(self.employees.contains(employee_id))
        }

        async fn shift_for(
            &self,
            employee_id: &str,
            date: NaiveDate,
        ) -> Result<Option<Shift>, LedgerError> {
            Ok(self.shift(employee_id, date))
        }

        async fn open_shift(
            &self,
            employee_id: &str,
            date: NaiveDate,
            punch_in: NaiveDateTime,
        ) -> Result<bool, LedgerError> {
            let mut shifts = self.shifts.lock().unwrap();
            let key = (employee_id.to_string(), date);
            if shifts.contains_key(&key) {
                return Ok(false);
            }
            shifts.insert(
                key,
                Shift {
                    punch_in,
                    punch_out: None,
                },
            );
            Ok(true)
        }

        async fn close_shift(
            &self,
            employee_id: &str,
            date: NaiveDate,
            punch_out: NaiveDateTime,
        ) -> Result<bool, LedgerError> {
            let mut shifts = self.shifts.lock().unwrap();
            match shifts.get_mut(&(employee_id.to_string(), date)) {
                Some(shift) if shift.punch_out.is_none() => {
                    shift.punch_out = Some(punch_out);
                    Ok(true)
                }
                _ => Ok(false),
            }
        }
    }
}
