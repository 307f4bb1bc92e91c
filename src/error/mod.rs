mod agent;
mod nlsql;
mod testgen;

pub use agent::AgentError;
pub use nlsql::{ApiErrorBody, ApiErrorObject, NlsqlError};
pub use testgen::TestGenError;
