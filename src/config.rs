use std::collections::HashSet;
use std::env;
use dotenvy::dotenv;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub server_addr: String,

    /// Device identifiers allowed to submit punches. Empty set = any device.
    pub authorized_devices: HashSet<String>,

    pub admin_email: String,
    pub admin_password: String,

    /// Fallback kiosk PIN used until one is stored through the settings API.
    pub device_pin: String,

    // Rate limiting
    pub rate_punch_per_min: u32,
    pub rate_register_per_min: u32,
    pub rate_roster_per_min: u32,
    pub rate_admin_per_min: u32,

    pub api_prefix: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:5000".to_string()),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),

            authorized_devices: env::var("AUTHORIZED_DEVICES")
                .unwrap_or_default()
                .split(',')
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty())
                .collect(),

            admin_email: env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@mess.local".to_string()),
            admin_password: env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "Admin@123".to_string()),

            device_pin: env::var("DEVICE_PIN").unwrap_or_else(|_| "1234".to_string()),

            rate_punch_per_min: env::var("RATE_PUNCH_PER_MIN")
                .unwrap_or_else(|_| "120".to_string())
                .parse()
                .unwrap(),
            rate_register_per_min: env::var("RATE_REGISTER_PER_MIN")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap(),
            rate_roster_per_min: env::var("RATE_ROSTER_PER_MIN")
                .unwrap_or_else(|_| "300".to_string())
                .parse()
                .unwrap(),
            rate_admin_per_min: env::var("RATE_ADMIN_PER_MIN")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .unwrap(),

            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),
        }
    }
}
