pub mod dog_trait;
pub mod owner_trait;
