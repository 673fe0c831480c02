use std::collections::BTreeMap;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool, postgres::PgPoolOptions, types::Json};
use time::OffsetDateTime;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use super::{MatchMutation, Store};
use crate::error::{AppError, AppResult};
use crate::models::{Availability, LikeEdge, Match, MatchStatus, TimeSlot, User, UserPair};
use crate::utils::constant::DB_MAX_CONNECTIONS;

/// PostgreSQL-backed store.
///
/// Uniqueness of likes and matches is enforced by table constraints (see
/// `migrations/`); match updates lock the row with `SELECT ... FOR UPDATE`.
#[derive(Debug, Clone)]
pub struct PgStore {
    db_pool: PgPool,
}

#[derive(Debug, FromRow)]
struct MatchRow {
    id: Uuid,
    user_low: Uuid,
    user_high: Uuid,
    availabilities: Json<BTreeMap<Uuid, Availability>>,
    scheduled_slot: Option<Json<TimeSlot>>,
    status: MatchStatus,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl TryFrom<MatchRow> for Match {
    type Error = AppError;

    fn try_from(row: MatchRow) -> AppResult<Self> {
        let participants = UserPair::new(row.user_low, row.user_high).map_err(|_| {
            error!(match_id = %row.id, "Stored match has identical participants");
            AppError::Internal
        })?;

        Ok(Match {
            id: row.id,
            participants,
            availabilities: row.availabilities.0,
            scheduled_slot: row.scheduled_slot.map(|slot| slot.0),
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl PgStore {
    /// Wraps an existing pool. Migrations are not run.
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    /// Connects to `database_url` and applies the embedded migrations.
    #[instrument(skip_all, err)]
    pub async fn connect(database_url: &str) -> AppResult<Self> {
        let db_pool = PgPoolOptions::new()
            .max_connections(DB_MAX_CONNECTIONS)
            .connect(database_url)
            .await?;
        info!("Connected to PostgreSQL");

        sqlx::migrate!("./migrations").run(&db_pool).await?;
        info!("Database migrations applied");

        Ok(Self::new(db_pool))
    }

    #[inline]
    pub fn pool(&self) -> &PgPool {
        &self.db_pool
    }
}

/// Maps a unique-constraint violation to `Conflict`, anything else to `Db`.
fn conflict_on_unique(e: sqlx::Error, message: &'static str) -> AppError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => AppError::Conflict(message),
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
            AppError::NotFound("User not found")
        }
        _ => AppError::Db(e),
    }
}

#[async_trait]
impl Store for PgStore {
    fn name(&self) -> &'static str {
        "postgres"
    }

    async fn user_exists(&self, user_id: Uuid) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(user_id)
            .fetch_one(&self.db_pool)
            .await?;
        Ok(exists)
    }

    async fn insert_user(&self, user: &User) -> AppResult<()> {
        sqlx::query("INSERT INTO users (id, name, created_at) VALUES ($1, $2, $3)")
            .bind(user.id)
            .bind(&user.name)
            .bind(user.created_at)
            .execute(&self.db_pool)
            .await
            .map_err(|e| conflict_on_unique(e, "User already exists"))?;
        Ok(())
    }

    async fn insert_like(&self, edge: &LikeEdge) -> AppResult<()> {
        sqlx::query("INSERT INTO likes (liker_id, liked_id, created_at) VALUES ($1, $2, $3)")
            .bind(edge.liker_id)
            .bind(edge.liked_id)
            .bind(edge.created_at)
            .execute(&self.db_pool)
            .await
            .map_err(|e| conflict_on_unique(e, "Already liked this user"))?;
        Ok(())
    }

    async fn delete_like(&self, liker_id: Uuid, liked_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM likes WHERE liker_id = $1 AND liked_id = $2")
            .bind(liker_id)
            .bind(liked_id)
            .execute(&self.db_pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn like_exists(&self, liker_id: Uuid, liked_id: Uuid) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM likes WHERE liker_id = $1 AND liked_id = $2)",
        )
        .bind(liker_id)
        .bind(liked_id)
        .fetch_one(&self.db_pool)
        .await?;
        Ok(exists)
    }

    #[instrument(skip(self, now))]
    async fn find_or_create_match(&self, pair: UserPair, now: OffsetDateTime) -> AppResult<Match> {
        // Losing a creation race is fine: DO NOTHING, then read the winner's row.
        let inserted = sqlx::query(
            r#"
            INSERT INTO matches (id, user_low, user_high, status, created_at, updated_at)
            VALUES ($1, $2, $3, 'matched', $4, $4)
            ON CONFLICT (user_low, user_high) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(pair.low())
        .bind(pair.high())
        .bind(now)
        .execute(&self.db_pool)
        .await?;
        debug!(created = inserted.rows_affected() > 0, "Match upserted");

        let row: MatchRow = sqlx::query_as(
            r#"
            SELECT id, user_low, user_high, availabilities, scheduled_slot,
                   status, created_at, updated_at
            FROM matches
            WHERE user_low = $1 AND user_high = $2
            "#,
        )
        .bind(pair.low())
        .bind(pair.high())
        .fetch_one(&self.db_pool)
        .await?;

        Match::try_from(row)
    }

    async fn find_match_for_user(
        &self,
        match_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<Match>> {
        let row: Option<MatchRow> = sqlx::query_as(
            r#"
            SELECT id, user_low, user_high, availabilities, scheduled_slot,
                   status, created_at, updated_at
            FROM matches
            WHERE id = $1 AND (user_low = $2 OR user_high = $2)
            "#,
        )
        .bind(match_id)
        .bind(user_id)
        .fetch_optional(&self.db_pool)
        .await?;

        row.map(Match::try_from).transpose()
    }

    async fn list_matches_for_user(&self, user_id: Uuid) -> AppResult<Vec<Match>> {
        let rows: Vec<MatchRow> = sqlx::query_as(
            r#"
            SELECT id, user_low, user_high, availabilities, scheduled_slot,
                   status, created_at, updated_at
            FROM matches
            WHERE user_low = $1 OR user_high = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db_pool)
        .await?;

        rows.into_iter().map(Match::try_from).collect()
    }

    #[instrument(skip(self, apply), err)]
    async fn update_match(
        &self,
        match_id: Uuid,
        apply: &mut MatchMutation<'_>,
    ) -> AppResult<Match> {
        let mut tx = self.db_pool.begin().await?;

        let row: MatchRow = sqlx::query_as(
            r#"
            SELECT id, user_low, user_high, availabilities, scheduled_slot,
                   status, created_at, updated_at
            FROM matches
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(match_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(AppError::NotFound("Match not found"))?;

        let mut m = Match::try_from(row)?;
        // An error here drops `tx`, which rolls the transaction back.
        apply(&mut m)?;

        sqlx::query(
            r#"
            UPDATE matches
            SET availabilities = $2, scheduled_slot = $3, status = $4, updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(m.id)
        .bind(Json(&m.availabilities))
        .bind(m.scheduled_slot.as_ref().map(Json))
        .bind(m.status)
        .bind(m.updated_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        debug!(status = %m.status, "Match updated");

        Ok(m)
    }

    async fn close(&self) {
        info!("Closing PostgreSQL pool");
        self.db_pool.close().await;
    }
}
