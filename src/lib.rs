pub mod api;
pub mod handlers;
pub mod infrastructure;
pub mod models;
pub mod repo;
pub mod routes;
pub mod utils;
