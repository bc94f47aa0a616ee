use crate::models::dog::{DogChanges, DogRecord, NewDog};
use crate::utils::errors::ApiError;

pub trait DogTrait {
    /// Resolves the owner and inserts the dog in one transaction.
    /// A duplicate (owner, name, age) triple is a conflict.
    fn create_dog(&mut self, new_dog: &NewDog) -> Result<DogRecord, ApiError>;
    /// All dogs joined with owner fields, newest first.
    fn list_dogs(&self) -> Result<Vec<DogRecord>, ApiError>;
    fn get_dog(&self, id: i64) -> Result<Option<DogRecord>, ApiError>;
    /// Applies a partial update in one transaction. Omitted fields keep
    /// their current value.
    fn update_dog(&mut self, id: i64, changes: &DogChanges) -> Result<DogRecord, ApiError>;
    /// Hard delete. The owner is never deleted.
    fn delete_dog(&self, id: i64) -> Result<(), ApiError>;
    /// Records the photo reference path on the dog row.
    fn set_photo(&self, id: i64, photo_url: &str) -> Result<DogRecord, ApiError>;
}
