use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A saved natural-language query and the SQL generated for it.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FavoriteItem {
    pub id: i64,
    pub query_text: String,
    pub sql_text: String,
    pub created_at: DateTime<Utc>,
}

/// Body of `GET /api/favorites`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FavoritesListResponse {
    pub favorites: Vec<FavoriteItem>,
    pub total: usize,
    pub error: Option<String>,
}

impl FavoritesListResponse {
    pub fn from_items(favorites: Vec<FavoriteItem>) -> Self {
        Self {
            total: favorites.len(),
            favorites,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Default::default()
        }
    }
}

/// Body of `POST /api/favorites`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FavoriteCreateRequest {
    pub query_text: String,
    pub sql_text: String,
}

/// Response of `POST /api/favorites`.
///
/// A duplicate `query_text` is not an error: `already_exists` is set and `favorite` is null.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FavoriteCreateResponse {
    pub favorite: Option<FavoriteItem>,
    pub already_exists: bool,
    pub error: Option<String>,
}

impl FavoriteCreateResponse {
    pub fn created(favorite: FavoriteItem) -> Self {
        Self {
            favorite: Some(favorite),
            ..Default::default()
        }
    }

    pub fn already_exists() -> Self {
        Self {
            already_exists: true,
            ..Default::default()
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Default::default()
        }
    }
}

/// Response of `DELETE /api/favorites/{id}`.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct FavoriteDeleteResponse {
    pub deleted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn list_response_serializes_null_error() {
        let body = serde_json::to_value(FavoritesListResponse::from_items(Vec::new())).unwrap();
        assert_eq!(body, json!({ "favorites": [], "total": 0, "error": null }));
    }

    #[test]
    fn duplicate_response_keeps_envelope_shape() {
        let body = serde_json::to_value(FavoriteCreateResponse::already_exists()).unwrap();
        assert_eq!(
            body,
            json!({ "favorite": null, "already_exists": true, "error": null })
        );
    }
}
