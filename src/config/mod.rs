use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    /// Server bind address (e.g., "0.0.0.0:3000"). Optional for the notifier process.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// PostgreSQL connection string
    pub database_url: String,

    /// Redis connection string for the notification outbox
    pub redis_url: String,

    /// Endpoint of the transactional mail HTTP API
    pub mail_api_url: String,

    /// Bearer token for the mail API
    pub mail_api_token: String,

    /// Sender address for outbound notifications
    #[serde(default = "default_mail_sender")]
    pub mail_sender: String,
}

fn default_bind_addr() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_mail_sender() -> String {
    "support@warranty-desk.example".to_string()
}

impl AppConfig {
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }
}
