use std::path::PathBuf;

use crate::infrastructure::database::sqlite_context::SqliteContext;

#[derive(Clone)]
pub struct AppState {
    pub db: SqliteContext,
    pub uploads_dir: PathBuf,
}
