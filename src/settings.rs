use sqlx::MySqlPool;

use crate::ledger::error::LedgerError;

const PIN_SETTING: &str = "device_pin";

/// Persistence capability for the global kiosk PIN.
#[allow(async_fn_in_trait)]
pub trait SettingsStore: Send + Sync {
    async fn stored_pin(&self) -> Result<Option<String>, LedgerError>;
    async fn store_pin(&self, pin: &str) -> Result<(), LedgerError>;
}

#[derive(Clone)]
pub struct MySqlSettings {
    pool: MySqlPool,
}

impl MySqlSettings {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

impl SettingsStore for MySqlSettings {
    async fn stored_pin(&self) -> Result<Option<String>, LedgerError> {
        let pin = sqlx::query_scalar::<_, String>("SELECT value FROM settings WHERE name = ?")
            .bind(PIN_SETTING)
            .fetch_optional(&self.pool)
            .await?;

        Ok(pin)
    }

    async fn store_pin(&self, pin: &str) -> Result<(), LedgerError> {
        sqlx::query(
            r#"
            INSERT INTO settings (name, value)
            VALUES (?, ?)
            ON DUPLICATE KEY UPDATE value = VALUES(value)
            "#,
        )
        .bind(PIN_SETTING)
        .bind(pin)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// The kiosk PIN is a global shared secret gating device-identity changes.
pub fn validate_pin(pin: &str) -> Result<(), LedgerError> {
    if pin.len() == 4 && pin.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(LedgerError::Validation(
            "PIN must be exactly 4 digits".to_string(),
        ))
    }
}

/// Validate and store a new global PIN. No write happens on a malformed PIN.
pub async fn update_global_pin<S: SettingsStore>(
    store: &S,
    new_pin: &str,
) -> Result<(), LedgerError> {
    validate_pin(new_pin)?;
    store.store_pin(new_pin).await
}

/// Compare against the stored PIN, falling back to the configured default
/// until one has been stored.
pub async fn check_pin<S: SettingsStore>(
    store: &S,
    pin: &str,
    fallback: &str,
) -> Result<bool, LedgerError> {
    let current = store.stored_pin().await?;
    Ok(pin == current.as_deref().unwrap_or(fallback))
}
