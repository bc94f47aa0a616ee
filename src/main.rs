use std::fs;
use std::path::PathBuf;

use actix_files::Files;
use actix_web::{web, App, HttpServer};
use dogs_service::{
    api::state::AppState, infrastructure::database::sqlite_context::SqliteContext,
    routes::api_routes, utils::config::AppConfig,
};

#[tokio::main]
async fn main() -> std::io::Result<()> {

    let config = AppConfig::global();

    let _logger = match flexi_logger::Logger::try_with_env_or_str("info")
        .and_then(|logger| logger.start())
    {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Failed to initialize logger: {}", e);
            std::process::exit(1);
        }
    };

    let context = match SqliteContext::init(&config.database_path) {
        Ok(context) => context,
        Err(e) => {
            log::error!("Failed to open database {}: {}", config.database_path, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = fs::create_dir_all(&config.uploads_dir) {
        log::error!("Failed to create uploads directory {}: {}", config.uploads_dir, e);
        std::process::exit(1);
    }

    println!("🐶 Server running at http://{}", config.bind_addr);

    let state = AppState {
        db: context,
        uploads_dir: PathBuf::from(&config.uploads_dir),
    };

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .configure(api_routes)
            .service(Files::new("/uploads", state.uploads_dir.clone()))
    })
    .bind(&config.bind_addr)?
    .run()
    .await
}
