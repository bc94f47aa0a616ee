pub mod dog_handlers;
pub mod owner_handlers;
pub mod photo_handlers;
