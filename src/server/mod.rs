pub mod router;
pub mod routes;

pub use router::{NlsqlState, nlsql_router};
