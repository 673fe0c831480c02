//! # Storage Collaborator
//!
//! The core never talks to a database directly. It goes through [`Store`],
//! which offers find/insert/update primitives with the guarantees the core
//! relies on:
//!
//! - like edges are unique per ordered pair ([`Store::insert_like`] fails with
//!   [`AppError::Conflict`](crate::error::AppError::Conflict) on a duplicate)
//! - matches are unique per unordered pair ([`Store::find_or_create_match`] is an upsert)
//! - [`Store::update_match`] is an atomic read-modify-write of one match
//!
//! ## Implementations
//!
//! - [`MemoryStore`] - process-local maps, used in development and tests
//! - [`PgStore`] - PostgreSQL through `sqlx`, used in production

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{LikeEdge, Match, User, UserPair};

/// Mutation applied to a match inside [`Store::update_match`].
///
/// Returning an error aborts the update and leaves the stored record untouched.
pub type MatchMutation<'a> = dyn FnMut(&mut Match) -> AppResult<()> + Send + 'a;

#[async_trait]
pub trait Store: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    async fn user_exists(&self, user_id: Uuid) -> AppResult<bool>;

    /// Fails with `Conflict` if the id is taken.
    async fn insert_user(&self, user: &User) -> AppResult<()>;

    /// Fails with `Conflict` if the ordered pair is already recorded.
    async fn insert_like(&self, edge: &LikeEdge) -> AppResult<()>;

    /// Returns whether an edge was removed.
    async fn delete_like(&self, liker_id: Uuid, liked_id: Uuid) -> AppResult<bool>;

    async fn like_exists(&self, liker_id: Uuid, liked_id: Uuid) -> AppResult<bool>;

    /// Returns the match for `pair`, creating it in the `matched` state if absent.
    ///
    /// Concurrent calls for the same pair all return the same record.
    async fn find_or_create_match(&self, pair: UserPair, now: OffsetDateTime) -> AppResult<Match>;

    /// The match `match_id`, only if `user_id` participates in it.
    async fn find_match_for_user(&self, match_id: Uuid, user_id: Uuid)
    -> AppResult<Option<Match>>;

    /// All matches `user_id` participates in, newest first.
    async fn list_matches_for_user(&self, user_id: Uuid) -> AppResult<Vec<Match>>;

    /// Runs `apply` on match `match_id` while holding it exclusively, then persists the result.
    ///
    /// Fails with `NotFound` if the match does not exist.
    async fn update_match(
        &self,
        match_id: Uuid,
        apply: &mut MatchMutation<'_>,
    ) -> AppResult<Match>;

    /// Releases backend resources at shutdown.
    async fn close(&self) {}
}
