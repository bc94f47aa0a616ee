pub mod migrations;
pub mod sqlite_context;
