//! Database module: models and schema for persistent storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `payload.rs`: insert payloads accepted by the actor
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `actor.rs`: the single owner of the connection pool; every read and write goes through it

pub mod actor;
pub mod models;
pub mod payload;
pub mod schema;

pub use actor::{DbActorHandle, spawn};
pub use models::DbFavoriteQuery;
pub use payload::FavoriteCreate;
pub use schema::SQLITE_INIT;
