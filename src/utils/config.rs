use dotenv::dotenv;
use std::env;
use std::sync::OnceLock;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub database_path: String,
    pub uploads_dir: String,
}

impl AppConfig {

    pub fn global() -> &'static AppConfig {
        CONFIG.get_or_init(|| {
            dotenv().ok();

            AppConfig {
                bind_addr: env::var("BIND_ADDR")
                    .unwrap_or_else(|_| "127.0.0.1:8080".to_string()),
                database_path: env::var("DATABASE_PATH")
                    .unwrap_or_else(|_| "mvp.db".to_string()),
                uploads_dir: env::var("UPLOADS_DIR")
                    .unwrap_or_else(|_| "uploads".to_string()),
            }
        })
    }
}
