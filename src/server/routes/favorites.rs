use crate::db::FavoriteCreate;
use crate::error::NlsqlError;
use crate::server::router::NlsqlState;
use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get},
};
use nlsql_schema::{
    FavoriteCreateRequest, FavoriteCreateResponse, FavoriteDeleteResponse, FavoriteItem,
    FavoritesListResponse,
};
use tracing::{error, info};

pub fn router() -> Router<NlsqlState> {
    Router::new()
        .route(
            "/api/favorites",
            get(list_favorites_handler).post(add_favorite_handler),
        )
        .route("/api/favorites/{id}", delete(delete_favorite_handler))
}

/// GET /api/favorites
///
/// Storage failures keep the list envelope: empty list, `error` set, status 500.
pub(super) async fn list_favorites_handler(State(state): State<NlsqlState>) -> Response {
    match state.db.list_favorites().await {
        Ok(rows) => {
            let items: Vec<FavoriteItem> = rows.into_iter().map(Into::into).collect();
            Json(FavoritesListResponse::from_items(items)).into_response()
        }
        Err(e) => {
            error!(error = %e, "failed to list favorites");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(FavoritesListResponse::failed(e.to_string())),
            )
                .into_response()
        }
    }
}

/// POST /api/favorites
///
/// A duplicate `query_text` answers 200 with `already_exists: true`.
pub(super) async fn add_favorite_handler(
    State(state): State<NlsqlState>,
    payload: Result<Json<FavoriteCreateRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(FavoriteCreateResponse::failed(rejection.body_text())),
            )
                .into_response();
        }
    };

    if req.query_text.trim().is_empty() || req.sql_text.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(FavoriteCreateResponse::failed(
                "query_text and sql_text must not be empty",
            )),
        )
            .into_response();
    }

    match state.db.add_favorite(FavoriteCreate::from(req)).await {
        Ok(row) => {
            info!(favorite.id = row.id, "favorite added");
            Json(FavoriteCreateResponse::created(row.into())).into_response()
        }
        Err(NlsqlError::DuplicateKey(query_text)) => {
            info!(query_text = %query_text, "favorite already exists");
            Json(FavoriteCreateResponse::already_exists()).into_response()
        }
        Err(e) => {
            error!(error = %e, "failed to add favorite");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(FavoriteCreateResponse::failed(e.to_string())),
            )
                .into_response()
        }
    }
}

/// DELETE /api/favorites/{id}
///
/// Deleting an unknown id is not an error; it reports `deleted: false`.
pub(super) async fn delete_favorite_handler(
    State(state): State<NlsqlState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<FavoriteDeleteResponse>, NlsqlError> {
    let Path(id) = id.map_err(|rejection| NlsqlError::Validation(rejection.body_text()))?;
    let deleted = state.db.delete_favorite(id).await?;
    info!(favorite.id = id, deleted, "favorite delete requested");
    Ok(Json(FavoriteDeleteResponse { deleted }))
}
