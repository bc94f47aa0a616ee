use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::models::owner::{OwnerIdentity, OwnerRecord, OwnerWithCount};
use crate::repo::sqlite_repository::SqliteRepository;
use crate::repo::traits::owner_trait::OwnerTrait;
use crate::utils::errors::ApiError;

impl OwnerTrait for SqliteRepository<'_> {

    fn resolve_owner(&self, identity: &OwnerIdentity) -> Result<i64, ApiError> {
        resolve_owner(self.conn, identity)
    }

    fn list_owners(&self) -> Result<Vec<OwnerWithCount>, ApiError> {
        let mut stmt = self.conn.prepare(
            "SELECT o.id, o.full_name, o.block, o.apartment, COUNT(d.id) AS dog_count
             FROM owners o
             LEFT JOIN dogs d ON d.owner_id = o.id
             GROUP BY o.id, o.full_name, o.block, o.apartment
             ORDER BY o.full_name COLLATE NOCASE",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(OwnerWithCount {
                id: row.get(0)?,
                full_name: row.get(1)?,
                block: row.get(2)?,
                apartment: row.get(3)?,
                dog_count: row.get(4)?,
            })
        })?;

        let mut owners = Vec::new();
        for row in rows {
            owners.push(row?);
        }
        Ok(owners)
    }

    fn get_owner(&self, id: i64) -> Result<Option<OwnerRecord>, ApiError> {
        let row = self
            .conn
            .query_row(
                "SELECT o.id, o.full_name, o.block, o.apartment, o.created_at, COUNT(d.id)
                 FROM owners o
                 LEFT JOIN dogs d ON d.owner_id = o.id
                 WHERE o.id = ?1
                 GROUP BY o.id, o.full_name, o.block, o.apartment, o.created_at",
                [id],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                        row.get::<_, i64>(5)?,
                    ))
                },
            )
            .optional()?;

        match row {
            Some((id, full_name, block, apartment, created_at, dog_count)) => {
                Ok(Some(OwnerRecord {
                    id,
                    full_name,
                    block,
                    apartment,
                    created_at: parse_timestamp(&created_at)?,
                    dog_count,
                }))
            }
            None => Ok(None),
        }
    }
}

/// Looks up or inserts the owner, race-free: the UNIQUE constraint on
/// (full_name, block, apartment) makes the insert a no-op when another
/// request created the same owner first.
///
/// Takes a plain connection so it can run inside dog transactions.
pub fn resolve_owner(conn: &Connection, identity: &OwnerIdentity) -> Result<i64, ApiError> {
    conn.execute(
        "INSERT INTO owners (full_name, block, apartment, created_at)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT (full_name, block, apartment) DO NOTHING",
        params![
            identity.full_name,
            identity.block,
            identity.apartment,
            Utc::now().to_rfc3339(),
        ],
    )?;

    let id = conn.query_row(
        "SELECT id FROM owners WHERE full_name = ?1 AND block = ?2 AND apartment = ?3",
        params![identity.full_name, identity.block, identity.apartment],
        |row| row.get(0),
    )?;
    Ok(id)
}

pub(crate) fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, ApiError> {
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|_| {
            ApiError::InternalServerError(format!("timestamp inválido no banco: {value}"))
        })
}
