use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Path of the license store file.
    pub store_path: String,
    /// Prefix baked into generated license keys.
    pub key_prefix: String,
    /// Bearer token required on the issue/revoke endpoints. Unset
    /// disables them.
    pub admin_token: Option<String>,
    pub resend_api_key: Option<String>,
    pub email_from: String,
    /// Product name used in license emails.
    pub product_name: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port: u16 = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        Self {
            host,
            port,
            store_path: env::var("STORE_PATH").unwrap_or_else(|_| "licenses.json".to_string()),
            key_prefix: env::var("LICENSE_KEY_PREFIX").unwrap_or_else(|_| "KW".to_string()),
            admin_token: env::var("ADMIN_TOKEN").ok(),
            resend_api_key: env::var("RESEND_API_KEY").ok(),
            email_from: env::var("EMAIL_FROM")
                .unwrap_or_else(|_| "licenses@example.com".to_string()),
            product_name: env::var("PRODUCT_NAME").unwrap_or_else(|_| "Keywarden".to_string()),
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
