use crate::error::NlsqlError;
use crate::export::{render_csv, validate_identifier};
use crate::server::router::NlsqlState;
use axum::{
    Router,
    extract::{Path, State},
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
    routing::get,
};
use tracing::info;

const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

pub fn router() -> Router<NlsqlState> {
    Router::new().route("/api/table/{name}/download", get(download_table_handler))
}

/// GET /api/table/{name}/download
///
/// 400 for an unsafe or reserved name (checked before touching the database), 404 for a
/// table that does not exist.
pub(super) async fn download_table_handler(
    State(state): State<NlsqlState>,
    Path(name): Path<String>,
) -> Result<Response, NlsqlError> {
    let table = validate_identifier(&name)?;
    let dump = state.db.dump_table(table).await?;
    let body = render_csv(&dump)?;

    info!(
        table = %dump.table,
        rows = dump.rows.len(),
        bytes = body.len(),
        "table exported as csv"
    );

    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{}.csv\"", dump.table))
        .map_err(|e| NlsqlError::UnexpectedError(format!("invalid content-disposition: {e}")))?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(CSV_CONTENT_TYPE)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}
