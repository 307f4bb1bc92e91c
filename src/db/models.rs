use chrono::{DateTime, Utc};
use nlsql_schema::FavoriteItem;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct DbFavoriteQuery {
    pub id: i64,
    pub query_text: String,
    pub sql_text: String,
    pub created_at: DateTime<Utc>,
}

impl From<DbFavoriteQuery> for FavoriteItem {
    fn from(row: DbFavoriteQuery) -> Self {
        Self {
            id: row.id,
            query_text: row.query_text,
            sql_text: row.sql_text,
            created_at: row.created_at,
        }
    }
}
