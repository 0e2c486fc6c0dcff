pub mod memory_database;
pub mod repositories;
pub mod seed;
pub mod store;
