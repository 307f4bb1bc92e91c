pub mod agent;
pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod server;
pub mod testgen;
pub mod utils;

pub use error::{AgentError, NlsqlError, TestGenError};
