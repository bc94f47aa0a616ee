use crate::models::owner::{OwnerIdentity, OwnerRecord, OwnerWithCount};
use crate::utils::errors::ApiError;

pub trait OwnerTrait {
    /// Returns the id of the owner with this exact identity, inserting a
    /// new row if none exists. Safe under concurrent identical calls.
    fn resolve_owner(&self, identity: &OwnerIdentity) -> Result<i64, ApiError>;
    /// All owners with their dog counts, including zero, ordered by name.
    fn list_owners(&self) -> Result<Vec<OwnerWithCount>, ApiError>;
    fn get_owner(&self, id: i64) -> Result<Option<OwnerRecord>, ApiError>;
}
