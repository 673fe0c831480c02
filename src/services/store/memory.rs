use async_trait::async_trait;
use dashmap::{DashMap, mapref::entry::Entry};
use time::OffsetDateTime;
use tracing::{debug, instrument, trace};
use uuid::Uuid;

use super::{MatchMutation, Store};
use crate::error::{AppError, AppResult};
use crate::models::{LikeEdge, Match, User, UserPair};

/// In-process store backed by [`DashMap`]s.
///
/// Every map entry is guarded by its shard lock, which gives the per-record
/// atomicity [`Store`] promises without any extra locking.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: DashMap<Uuid, User>,
    /// `(liker_id, liked_id)` -> edge
    likes: DashMap<(Uuid, Uuid), LikeEdge>,
    matches: DashMap<Uuid, Match>,
    /// Unordered pair -> match id, the uniqueness index for matches
    match_by_pair: DashMap<UserPair, Uuid>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn user_exists(&self, user_id: Uuid) -> AppResult<bool> {
        Ok(self.users.contains_key(&user_id))
    }

    async fn insert_user(&self, user: &User) -> AppResult<()> {
        match self.users.entry(user.id) {
            Entry::Occupied(_) => Err(AppError::Conflict("User already exists")),
            Entry::Vacant(slot) => {
                slot.insert(user.clone());
                Ok(())
            }
        }
    }

    async fn insert_like(&self, edge: &LikeEdge) -> AppResult<()> {
        match self.likes.entry((edge.liker_id, edge.liked_id)) {
            Entry::Occupied(_) => Err(AppError::Conflict("Already liked this user")),
            Entry::Vacant(slot) => {
                slot.insert(edge.clone());
                Ok(())
            }
        }
    }

    async fn delete_like(&self, liker_id: Uuid, liked_id: Uuid) -> AppResult<bool> {
        Ok(self.likes.remove(&(liker_id, liked_id)).is_some())
    }

    async fn like_exists(&self, liker_id: Uuid, liked_id: Uuid) -> AppResult<bool> {
        Ok(self.likes.contains_key(&(liker_id, liked_id)))
    }

    #[instrument(skip(self, now))]
    async fn find_or_create_match(&self, pair: UserPair, now: OffsetDateTime) -> AppResult<Match> {
        let match_id = match self.match_by_pair.entry(pair) {
            Entry::Occupied(existing) => {
                trace!("Match already exists for pair");
                *existing.get()
            }
            Entry::Vacant(slot) => {
                let created = Match::new(pair, now);
                let id = created.id;
                self.matches.insert(id, created);
                slot.insert(id);
                debug!(match_id = %id, "Created match");
                id
            }
        };

        self.matches
            .get(&match_id)
            .map(|m| m.value().clone())
            .ok_or(AppError::Internal)
    }

    async fn find_match_for_user(
        &self,
        match_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<Match>> {
        Ok(self
            .matches
            .get(&match_id)
            .filter(|m| m.participants.contains(user_id))
            .map(|m| m.value().clone()))
    }

    async fn list_matches_for_user(&self, user_id: Uuid) -> AppResult<Vec<Match>> {
        let mut found: Vec<Match> = self
            .matches
            .iter()
            .filter(|m| m.participants.contains(user_id))
            .map(|m| m.value().clone())
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn update_match(
        &self,
        match_id: Uuid,
        apply: &mut MatchMutation<'_>,
    ) -> AppResult<Match> {
        let mut stored = self
            .matches
            .get_mut(&match_id)
            .ok_or(AppError::NotFound("Match not found"))?;

        // Mutate a copy so a failed mutation leaves the record as it was.
        let mut draft = stored.value().clone();
        apply(&mut draft)?;
        *stored = draft;

        Ok(stored.value().clone())
    }
}
