use crate::db::models::DbFavoriteQuery;
use crate::db::payload::FavoriteCreate;
use crate::db::schema::SQLITE_INIT;
use crate::error::NlsqlError;
use crate::export::{TableDump, TableName};
use chrono::{SecondsFormat, Utc};
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteRow, SqliteSynchronous,
};
use sqlx::{Row, SqlitePool, TypeInfo, ValueRef};
use std::{str::FromStr, time::Duration};
use tracing::{debug, info};

#[derive(Debug)]
pub enum DbActorMessage {
    /// Re-run the idempotent schema DDL.
    EnsureSchema(RpcReplyPort<Result<(), NlsqlError>>),

    /// List all favorites, newest first.
    ListFavorites(RpcReplyPort<Result<Vec<DbFavoriteQuery>, NlsqlError>>),

    /// Insert a favorite unless its `query_text` is already stored.
    AddFavorite(
        FavoriteCreate,
        RpcReplyPort<Result<DbFavoriteQuery, NlsqlError>>,
    ),

    /// Delete a favorite by id; replies whether a row was removed.
    DeleteFavorite(i64, RpcReplyPort<Result<bool, NlsqlError>>),

    /// Whether a favorite with this `query_text` exists.
    FavoriteExists(String, RpcReplyPort<Result<bool, NlsqlError>>),

    /// Read the full contents of an existing table.
    DumpTable(TableName, RpcReplyPort<Result<TableDump, NlsqlError>>),
}

#[derive(Clone)]
pub struct DbActorHandle {
    actor: ActorRef<DbActorMessage>,
}

impl DbActorHandle {
    pub async fn ensure_schema(&self) -> Result<(), NlsqlError> {
        ractor::call!(self.actor, DbActorMessage::EnsureSchema)
            .map_err(|e| NlsqlError::RactorError(format!("DbActor EnsureSchema RPC failed: {e}")))?
    }

    pub async fn list_favorites(&self) -> Result<Vec<DbFavoriteQuery>, NlsqlError> {
        ractor::call!(self.actor, DbActorMessage::ListFavorites).map_err(|e| {
            NlsqlError::RactorError(format!("DbActor ListFavorites RPC failed: {e}"))
        })?
    }

    pub async fn add_favorite(
        &self,
        create: FavoriteCreate,
    ) -> Result<DbFavoriteQuery, NlsqlError> {
        ractor::call!(self.actor, DbActorMessage::AddFavorite, create)
            .map_err(|e| NlsqlError::RactorError(format!("DbActor AddFavorite RPC failed: {e}")))?
    }

    pub async fn delete_favorite(&self, id: i64) -> Result<bool, NlsqlError> {
        ractor::call!(self.actor, DbActorMessage::DeleteFavorite, id).map_err(|e| {
            NlsqlError::RactorError(format!("DbActor DeleteFavorite RPC failed: {e}"))
        })?
    }

    pub async fn favorite_exists(&self, query_text: &str) -> Result<bool, NlsqlError> {
        ractor::call!(
            self.actor,
            DbActorMessage::FavoriteExists,
            query_text.to_string()
        )
        .map_err(|e| NlsqlError::RactorError(format!("DbActor FavoriteExists RPC failed: {e}")))?
    }

    pub async fn dump_table(&self, table: TableName) -> Result<TableDump, NlsqlError> {
        ractor::call!(self.actor, DbActorMessage::DumpTable, table)
            .map_err(|e| NlsqlError::RactorError(format!("DbActor DumpTable RPC failed: {e}")))?
    }
}

struct DbActorState {
    pool: SqlitePool,
}

/// Sole owner of the SQLite pool.
///
/// Messages are handled one at a time, so the duplicate check and the insert in
/// `add_favorite` cannot interleave with another writer from this process.
struct DbActor;

#[ractor::async_trait]
impl Actor for DbActor {
    type Msg = DbActorMessage;
    type State = DbActorState;
    type Arguments = String;

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        database_url: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        let connect_opts = SqliteConnectOptions::from_str(database_url.as_str())
            .map_err(|e| ActorProcessingErr::from(format!("invalid database url: {e}")))?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5))
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        // SQLite creates the file but not its directory (default url is `db/database.db`).
        if let Some(parent) = connect_opts
            .get_filename()
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| ActorProcessingErr::from(format!("db directory create failed: {e}")))?;
        }

        let pool = SqlitePoolOptions::new()
            .connect_with(connect_opts)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db connect failed: {e}")))?;

        apply_schema(&pool)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db schema init failed: {e}")))?;

        info!("DbActor initialized");
        Ok(DbActorState { pool })
    }

    async fn post_stop(
        &self,
        _myself: ActorRef<Self::Msg>,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        state.pool.close().await;
        Ok(())
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            DbActorMessage::EnsureSchema(reply) => {
                let res = apply_schema(&state.pool).await;
                let _ = reply.send(res);
            }
            DbActorMessage::ListFavorites(reply) => {
                let res = self.list_favorites(&state.pool).await;
                let _ = reply.send(res);
            }
            DbActorMessage::AddFavorite(create, reply) => {
                let res = self.add_favorite(&state.pool, create).await;
                let _ = reply.send(res);
            }
            DbActorMessage::DeleteFavorite(id, reply) => {
                let res = self.delete_favorite(&state.pool, id).await;
                let _ = reply.send(res);
            }
            DbActorMessage::FavoriteExists(query_text, reply) => {
                let res = self.favorite_exists(&state.pool, &query_text).await;
                let _ = reply.send(res);
            }
            DbActorMessage::DumpTable(table, reply) => {
                let res = self.dump_table(&state.pool, &table).await;
                let _ = reply.send(res);
            }
        }
        Ok(())
    }
}

impl DbActor {
    async fn list_favorites(&self, pool: &SqlitePool) -> Result<Vec<DbFavoriteQuery>, NlsqlError> {
        let rows = sqlx::query_as::<_, DbFavoriteQuery>(
            r#"
        SELECT id, query_text, sql_text, created_at
        FROM query_favorites
        ORDER BY created_at DESC, id DESC
        "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    async fn add_favorite(
        &self,
        pool: &SqlitePool,
        create: FavoriteCreate,
    ) -> Result<DbFavoriteQuery, NlsqlError> {
        if self.favorite_exists(pool, &create.query_text).await? {
            return Err(NlsqlError::DuplicateKey(create.query_text));
        }

        let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, false);
        let row = sqlx::query_as::<_, DbFavoriteQuery>(
            r#"
        INSERT INTO query_favorites (query_text, sql_text, created_at)
        VALUES (?, ?, ?)
        RETURNING id, query_text, sql_text, created_at
        "#,
        )
        .bind(create.query_text)
        .bind(create.sql_text)
        .bind(created_at)
        .fetch_one(pool)
        .await?;

        debug!(favorite.id = row.id, "favorite stored");
        Ok(row)
    }

    async fn delete_favorite(&self, pool: &SqlitePool, id: i64) -> Result<bool, NlsqlError> {
        let result = sqlx::query("DELETE FROM query_favorites WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn favorite_exists(
        &self,
        pool: &SqlitePool,
        query_text: &str,
    ) -> Result<bool, NlsqlError> {
        let hit: Option<i64> =
            sqlx::query_scalar("SELECT 1 FROM query_favorites WHERE query_text = ? LIMIT 1")
                .bind(query_text)
                .fetch_optional(pool)
                .await?;

        Ok(hit.is_some())
    }

    async fn dump_table(
        &self,
        pool: &SqlitePool,
        table: &TableName,
    ) -> Result<TableDump, NlsqlError> {
        // SQLite resolves table names case-insensitively; use the stored spelling from here on.
        let stored: Option<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ? COLLATE NOCASE",
        )
        .bind(table.as_str())
        .fetch_optional(pool)
        .await?;
        let Some(stored) = stored else {
            return Err(NlsqlError::NotFound(format!("table {table} does not exist")));
        };

        let columns: Vec<String> =
            sqlx::query_scalar("SELECT name FROM pragma_table_info(?) ORDER BY cid")
                .bind(stored.as_str())
                .fetch_all(pool)
                .await?;

        // `stored` matched a validated identifier, so it is plain `[A-Za-z0-9_]`.
        let select = format!("SELECT * FROM \"{stored}\"");
        let rows = sqlx::query(&select)
            .fetch_all(pool)
            .await?
            .iter()
            .map(|row| render_row(row, columns.len()))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(table = %stored, columns = columns.len(), rows = rows.len(), "table dumped");
        Ok(TableDump {
            table: stored,
            columns,
            rows,
        })
    }
}

fn render_row(row: &SqliteRow, width: usize) -> Result<Vec<String>, sqlx::Error> {
    (0..width).map(|index| render_cell(row, index)).collect()
}

/// Renders one cell by its runtime storage class, not the declared column type.
fn render_cell(row: &SqliteRow, index: usize) -> Result<String, sqlx::Error> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(String::new());
    }
    let storage_class = raw.type_info().name().to_string();

    match storage_class.as_str() {
        "INTEGER" | "BOOLEAN" => row
            .try_get_unchecked::<i64, _>(index)
            .map(|v| v.to_string()),
        "REAL" => row.try_get_unchecked::<f64, _>(index).map(format_real),
        "BLOB" => row.try_get_unchecked::<Vec<u8>, _>(index).map(|bytes| {
            bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut acc, b| {
                acc.push_str(&format!("{b:02x}"));
                acc
            })
        }),
        _ => row.try_get_unchecked::<String, _>(index),
    }
}

/// Whole reals keep a fractional digit (`9.0`, not `9`) so they stay distinguishable from integers.
fn format_real(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// Spawn the database actor and return a cloneable handle.
pub async fn spawn(database_url: &str) -> Result<DbActorHandle, NlsqlError> {
    let (actor, _jh) = ractor::Actor::spawn(None, DbActor, database_url.to_string())
        .await
        .map_err(|e| NlsqlError::RactorError(format!("failed to spawn DbActor: {e}")))?;

    Ok(DbActorHandle { actor })
}

async fn apply_schema(pool: &SqlitePool) -> Result<(), NlsqlError> {
    for stmt in SQLITE_INIT.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(pool).await?;
    }
    Ok(())
}
