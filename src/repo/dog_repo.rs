use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use crate::models::dog::{DogChanges, DogRecord, NewDog};
use crate::repo::owner_repo::resolve_owner;
use crate::repo::sqlite_repository::{is_unique_violation, SqliteRepository};
use crate::repo::traits::dog_trait::DogTrait;
use crate::utils::errors::ApiError;

const NOT_FOUND: &str = "não encontrado";
const DUPLICATE: &str = "cachorro duplicado para este dono (mesmo nome e idade)";

const DOG_SELECT: &str =
    "SELECT d.id, d.name, d.breed, d.age, o.full_name, o.block, o.apartment, d.photo_url
     FROM dogs d
     JOIN owners o ON o.id = d.owner_id";

impl DogTrait for SqliteRepository<'_> {

    fn create_dog(&mut self, new_dog: &NewDog) -> Result<DogRecord, ApiError> {
        let tx = self.conn.transaction()?;
        let owner_id = resolve_owner(&tx, &new_dog.owner)?;

        let inserted = tx.execute(
            "INSERT INTO dogs (name, breed, age, owner_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                new_dog.name,
                new_dog.breed,
                new_dog.age,
                owner_id,
                Utc::now().to_rfc3339(),
            ],
        );
        match inserted {
            Ok(_) => {}
            Err(err) if is_unique_violation(&err) => {
                return Err(ApiError::Conflict(DUPLICATE.to_string()));
            }
            Err(err) => return Err(err.into()),
        }

        let id = tx.last_insert_rowid();
        let record = fetch_dog(&tx, id)?.ok_or_else(|| {
            ApiError::InternalServerError("registro recém-criado ausente".to_string())
        })?;
        tx.commit()?;
        Ok(record)
    }

    fn list_dogs(&self) -> Result<Vec<DogRecord>, ApiError> {
        let sql = format!("{DOG_SELECT} ORDER BY d.created_at DESC, d.id DESC");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], map_dog_row)?;

        let mut dogs = Vec::new();
        for row in rows {
            dogs.push(row?);
        }
        Ok(dogs)
    }

    fn get_dog(&self, id: i64) -> Result<Option<DogRecord>, ApiError> {
        fetch_dog(self.conn, id)
    }

    fn update_dog(&mut self, id: i64, changes: &DogChanges) -> Result<DogRecord, ApiError> {
        let tx = self.conn.transaction()?;

        let current = tx
            .query_row(
                "SELECT name, breed, age, owner_id FROM dogs WHERE id = ?1",
                [id],
                |row| {
                    Ok(CurrentDog {
                        name: row.get(0)?,
                        breed: row.get(1)?,
                        age: row.get(2)?,
                        owner_id: row.get(3)?,
                    })
                },
            )
            .optional()?
            .ok_or_else(|| ApiError::NotFound(NOT_FOUND.to_string()))?;

        let name = changes.name.as_deref().unwrap_or(&current.name);
        let breed = changes.breed.as_deref().unwrap_or(&current.breed);
        let age = changes.age.unwrap_or(current.age);
        let owner_id = match &changes.owner {
            Some(identity) => resolve_owner(&tx, identity)?,
            None => current.owner_id,
        };

        let updated = tx.execute(
            "UPDATE dogs SET name = ?1, breed = ?2, age = ?3, owner_id = ?4 WHERE id = ?5",
            params![name, breed, age, owner_id, id],
        );
        match updated {
            Ok(_) => {}
            Err(err) if is_unique_violation(&err) => {
                return Err(ApiError::Conflict(DUPLICATE.to_string()));
            }
            Err(err) => return Err(err.into()),
        }

        let record = fetch_dog(&tx, id)?
            .ok_or_else(|| ApiError::InternalServerError("registro atualizado ausente".to_string()))?;
        tx.commit()?;
        Ok(record)
    }

    fn delete_dog(&self, id: i64) -> Result<(), ApiError> {
        let deleted = self.conn.execute("DELETE FROM dogs WHERE id = ?1", [id])?;
        if deleted == 0 {
            return Err(ApiError::NotFound(NOT_FOUND.to_string()));
        }
        Ok(())
    }

    fn set_photo(&self, id: i64, photo_url: &str) -> Result<DogRecord, ApiError> {
        let updated = self.conn.execute(
            "UPDATE dogs SET photo_url = ?2 WHERE id = ?1",
            params![id, photo_url],
        )?;
        if updated == 0 {
            return Err(ApiError::NotFound(NOT_FOUND.to_string()));
        }
        fetch_dog(self.conn, id)?
            .ok_or_else(|| ApiError::InternalServerError("registro atualizado ausente".to_string()))
    }
}

struct CurrentDog {
    name: String,
    breed: String,
    age: i64,
    owner_id: i64,
}

fn fetch_dog(conn: &Connection, id: i64) -> Result<Option<DogRecord>, ApiError> {
    let sql = format!("{DOG_SELECT} WHERE d.id = ?1");
    let record = conn.query_row(&sql, [id], map_dog_row).optional()?;
    Ok(record)
}

fn map_dog_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<DogRecord> {
    Ok(DogRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        breed: row.get(2)?,
        age: row.get(3)?,
        full_name: row.get(4)?,
        block: row.get(5)?,
        apartment: row.get(6)?,
        photo_url: row.get(7)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::sqlite_context::open_in_memory;
    use crate::models::owner::OwnerIdentity;
    use crate::repo::traits::owner_trait::OwnerTrait;

    fn new_dog(name: &str, age: i64, owner_name: &str) -> NewDog {
        NewDog {
            name: name.to_string(),
            breed: "Labrador".to_string(),
            age,
            owner: OwnerIdentity {
                full_name: owner_name.to_string(),
                block: "B".to_string(),
                apartment: "203".to_string(),
            },
        }
    }

    #[test]
    fn test_create_dog_creates_one_owner_and_one_dog() {
        let mut conn = open_in_memory().unwrap();
        let mut repo = SqliteRepository::new(&mut conn);

        let record = repo.create_dog(&new_dog("Thor", 2, "Ana Souza")).unwrap();
        assert_eq!(record.name, "Thor");
        assert_eq!(record.full_name, "Ana Souza");
        assert!(record.photo_url.is_none());

        let owners: i64 = repo
            .conn
            .query_row("SELECT COUNT(*) FROM owners", [], |row| row.get(0))
            .unwrap();
        let dogs: i64 = repo
            .conn
            .query_row("SELECT COUNT(*) FROM dogs", [], |row| row.get(0))
            .unwrap();
        assert_eq!(owners, 1);
        assert_eq!(dogs, 1);
    }

    #[test]
    fn test_create_second_dog_reuses_owner() {
        let mut conn = open_in_memory().unwrap();
        let mut repo = SqliteRepository::new(&mut conn);

        repo.create_dog(&new_dog("Thor", 2, "Ana Souza")).unwrap();
        repo.create_dog(&new_dog("Luna", 4, "Ana Souza")).unwrap();

        let owners: i64 = repo
            .conn
            .query_row("SELECT COUNT(*) FROM owners", [], |row| row.get(0))
            .unwrap();
        assert_eq!(owners, 1);

        let owner_ids: i64 = repo
            .conn
            .query_row("SELECT COUNT(DISTINCT owner_id) FROM dogs", [], |row| row.get(0))
            .unwrap();
        assert_eq!(owner_ids, 1);
    }

    #[test]
    fn test_duplicate_dog_for_same_owner_is_conflict() {
        let mut conn = open_in_memory().unwrap();
        let mut repo = SqliteRepository::new(&mut conn);

        repo.create_dog(&new_dog("Thor", 2, "Ana Souza")).unwrap();
        let err = repo.create_dog(&new_dog("Thor", 2, "Ana Souza")).unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));

        let dogs: i64 = repo
            .conn
            .query_row("SELECT COUNT(*) FROM dogs", [], |row| row.get(0))
            .unwrap();
        assert_eq!(dogs, 1);
    }

    #[test]
    fn test_same_name_different_age_is_allowed() {
        let mut conn = open_in_memory().unwrap();
        let mut repo = SqliteRepository::new(&mut conn);

        repo.create_dog(&new_dog("Thor", 2, "Ana Souza")).unwrap();
        assert!(repo.create_dog(&new_dog("Thor", 3, "Ana Souza")).is_ok());
    }

    #[test]
    fn test_same_dog_different_owner_is_allowed() {
        let mut conn = open_in_memory().unwrap();
        let mut repo = SqliteRepository::new(&mut conn);

        repo.create_dog(&new_dog("Thor", 2, "Ana Souza")).unwrap();
        assert!(repo.create_dog(&new_dog("Thor", 2, "Bruno Lima")).is_ok());
    }

    #[test]
    fn test_list_dogs_newest_first() {
        let mut conn = open_in_memory().unwrap();
        let mut repo = SqliteRepository::new(&mut conn);

        repo.create_dog(&new_dog("Thor", 2, "Ana Souza")).unwrap();
        repo.create_dog(&new_dog("Luna", 4, "Ana Souza")).unwrap();

        let dogs = repo.list_dogs().unwrap();
        assert_eq!(dogs.len(), 2);
        assert_eq!(dogs[0].name, "Luna");
        assert_eq!(dogs[1].name, "Thor");
    }

    #[test]
    fn test_get_dog_missing_returns_none() {
        let mut conn = open_in_memory().unwrap();
        let repo = SqliteRepository::new(&mut conn);
        assert!(repo.get_dog(42).unwrap().is_none());
    }

    #[test]
    fn test_update_only_age_keeps_other_fields() {
        let mut conn = open_in_memory().unwrap();
        let mut repo = SqliteRepository::new(&mut conn);

        let created = repo.create_dog(&new_dog("Thor", 2, "Ana Souza")).unwrap();
        let changes = DogChanges {
            age: Some(5),
            ..DogChanges::default()
        };
        let updated = repo.update_dog(created.id, &changes).unwrap();

        assert_eq!(updated.age, 5);
        assert_eq!(updated.name, "Thor");
        assert_eq!(updated.breed, "Labrador");
        assert_eq!(updated.full_name, "Ana Souza");
    }

    #[test]
    fn test_update_reassigns_owner() {
        let mut conn = open_in_memory().unwrap();
        let mut repo = SqliteRepository::new(&mut conn);

        let created = repo.create_dog(&new_dog("Thor", 2, "Ana Souza")).unwrap();
        let changes = DogChanges {
            owner: Some(OwnerIdentity {
                full_name: "Bruno Lima".to_string(),
                block: "A".to_string(),
                apartment: "101".to_string(),
            }),
            ..DogChanges::default()
        };
        let updated = repo.update_dog(created.id, &changes).unwrap();

        assert_eq!(updated.full_name, "Bruno Lima");
        assert_eq!(updated.block, "A");

        // The previous owner is orphaned, not deleted.
        let owners: i64 = repo
            .conn
            .query_row("SELECT COUNT(*) FROM owners", [], |row| row.get(0))
            .unwrap();
        assert_eq!(owners, 2);
    }

    #[test]
    fn test_update_missing_dog_is_not_found() {
        let mut conn = open_in_memory().unwrap();
        let mut repo = SqliteRepository::new(&mut conn);

        let err = repo.update_dog(42, &DogChanges::default()).unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn test_update_into_duplicate_is_conflict() {
        let mut conn = open_in_memory().unwrap();
        let mut repo = SqliteRepository::new(&mut conn);

        repo.create_dog(&new_dog("Thor", 2, "Ana Souza")).unwrap();
        let second = repo.create_dog(&new_dog("Luna", 4, "Ana Souza")).unwrap();

        let changes = DogChanges {
            name: Some("Thor".to_string()),
            age: Some(2),
            ..DogChanges::default()
        };
        let err = repo.update_dog(second.id, &changes).unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));

        // Rolled back: Luna is unchanged.
        let luna = repo.get_dog(second.id).unwrap().unwrap();
        assert_eq!(luna.name, "Luna");
        assert_eq!(luna.age, 4);
    }

    #[test]
    fn test_update_to_same_values_is_not_a_conflict() {
        let mut conn = open_in_memory().unwrap();
        let mut repo = SqliteRepository::new(&mut conn);

        let created = repo.create_dog(&new_dog("Thor", 2, "Ana Souza")).unwrap();
        let changes = DogChanges {
            name: Some("Thor".to_string()),
            age: Some(2),
            ..DogChanges::default()
        };
        assert!(repo.update_dog(created.id, &changes).is_ok());
    }

    #[test]
    fn test_delete_dog_then_get_returns_none() {
        let mut conn = open_in_memory().unwrap();
        let mut repo = SqliteRepository::new(&mut conn);

        let created = repo.create_dog(&new_dog("Thor", 2, "Ana Souza")).unwrap();
        repo.delete_dog(created.id).unwrap();
        assert!(repo.get_dog(created.id).unwrap().is_none());
    }

    #[test]
    fn test_delete_missing_dog_is_not_found() {
        let mut conn = open_in_memory().unwrap();
        let repo = SqliteRepository::new(&mut conn);

        let err = repo.delete_dog(42).unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn test_delete_dog_keeps_owner() {
        let mut conn = open_in_memory().unwrap();
        let mut repo = SqliteRepository::new(&mut conn);

        let created = repo.create_dog(&new_dog("Thor", 2, "Ana Souza")).unwrap();
        repo.delete_dog(created.id).unwrap();

        let owners = repo.list_owners().unwrap();
        assert_eq!(owners.len(), 1);
        assert_eq!(owners[0].dog_count, 0);
    }

    #[test]
    fn test_set_photo_records_reference() {
        let mut conn = open_in_memory().unwrap();
        let mut repo = SqliteRepository::new(&mut conn);

        let created = repo.create_dog(&new_dog("Thor", 2, "Ana Souza")).unwrap();
        let updated = repo
            .set_photo(created.id, "/uploads/dog_1.png")
            .unwrap();
        assert_eq!(updated.photo_url.as_deref(), Some("/uploads/dog_1.png"));
    }

    #[test]
    fn test_set_photo_missing_dog_is_not_found() {
        let mut conn = open_in_memory().unwrap();
        let repo = SqliteRepository::new(&mut conn);

        let err = repo.set_photo(42, "/uploads/dog_42.png").unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn test_owner_counts_follow_dogs() {
        let mut conn = open_in_memory().unwrap();
        let mut repo = SqliteRepository::new(&mut conn);

        repo.create_dog(&new_dog("Thor", 2, "Ana Souza")).unwrap();
        repo.create_dog(&new_dog("Luna", 4, "Ana Souza")).unwrap();
        repo.create_dog(&new_dog("Rex", 1, "Bruno Lima")).unwrap();

        let owners = repo.list_owners().unwrap();
        assert_eq!(owners.len(), 2);
        assert_eq!(owners[0].full_name, "Ana Souza");
        assert_eq!(owners[0].dog_count, 2);
        assert_eq!(owners[1].full_name, "Bruno Lima");
        assert_eq!(owners[1].dog_count, 1);
    }
}
