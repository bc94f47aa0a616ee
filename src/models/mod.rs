pub mod dog;
pub mod owner;
