pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod schema;
pub mod seed;
pub mod serializer;
pub mod service;

pub const DEFAULT_DATABASE_URL: &str = "app.db";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:5555";
