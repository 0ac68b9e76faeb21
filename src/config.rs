use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Directory uploaded product images are written to.
    pub media_dir: String,
    /// Base URL prefixed to /media paths when building public image URLs.
    pub public_base_url: String,
    /// Destination number for the outbound WhatsApp order message.
    pub whatsapp_number: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let media_dir = env::var("MEDIA_DIR").unwrap_or_else(|_| "media".to_string());
        let public_base_url =
            env::var("PUBLIC_BASE_URL").unwrap_or_else(|_| format!("http://{host}:{port}"));
        let whatsapp_number =
            env::var("WHATSAPP_NUMBER").unwrap_or_else(|_| "2349033120032".to_string());
        Ok(Self {
            database_url,
            host,
            port,
            media_dir,
            public_base_url,
            whatsapp_number,
        })
    }
}
