use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{error, info};
use rusqlite::Connection;

use super::migrations::apply_migrations;
use crate::utils::errors::ApiError;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Handle to the SQLite database file.
///
/// `init` is the explicit startup step: it opens the database once and
/// applies pending migrations. After that, each request calls `connect`
/// to get its own short-lived connection; request handling never performs
/// schema changes.
#[derive(Clone, Debug)]
pub struct SqliteContext {
    path: PathBuf,
}

impl SqliteContext {

    pub fn init(path: impl AsRef<Path>) -> Result<SqliteContext, ApiError> {
        let path = path.as_ref().to_path_buf();
        info!("opening SQLite database at {}", path.display());

        let mut conn = Connection::open(&path).map_err(|e| {
            error!("failed to open SQLite database: {}", e);
            ApiError::from(e)
        })?;
        configure(&conn)?;
        apply_migrations(&mut conn)?;

        info!("database ready: {}", path.display());
        Ok(SqliteContext { path })
    }

    /// Opens a fresh connection for one request.
    pub fn connect(&self) -> Result<Connection, ApiError> {
        let conn = Connection::open(&self.path)?;
        configure(&conn)?;
        Ok(conn)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Opens a migrated in-memory database. Test helper for repository code.
pub fn open_in_memory() -> Result<Connection, ApiError> {
    let mut conn = Connection::open_in_memory()?;
    configure(&conn)?;
    apply_migrations(&mut conn)?;
    Ok(conn)
}

fn configure(conn: &Connection) -> Result<(), ApiError> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    Ok(())
}
