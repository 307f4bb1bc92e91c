use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteCreate {
    pub query_text: String,
    pub sql_text: String,
}

impl FavoriteCreate {
    pub fn new(query_text: impl Into<String>, sql_text: impl Into<String>) -> Self {
        Self {
            query_text: query_text.into(),
            sql_text: sql_text.into(),
        }
    }
}

impl From<nlsql_schema::FavoriteCreateRequest> for FavoriteCreate {
    fn from(req: nlsql_schema::FavoriteCreateRequest) -> Self {
        Self {
            query_text: req.query_text,
            sql_text: req.sql_text,
        }
    }
}
