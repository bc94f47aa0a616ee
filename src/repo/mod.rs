pub mod dog_repo;
pub mod owner_repo;
pub mod sqlite_repository;
pub mod traits;
