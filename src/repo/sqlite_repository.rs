use rusqlite::Connection;

/// Repository over a single request-scoped SQLite connection.
///
/// Holds the connection mutably so that multi-statement operations can
/// open transactions.
pub struct SqliteRepository<'conn> {
    pub(crate) conn: &'conn mut Connection,
}

impl<'conn> SqliteRepository<'conn> {

    pub fn new(conn: &'conn mut Connection) -> SqliteRepository<'conn> {
        SqliteRepository { conn }
    }
}

/// True when the error is a UNIQUE constraint violation, as raised by the
/// (owner_id, name, age) index on dogs.
pub(crate) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}
