//! # Like Graph
//!
//! Directed like edges between users. When an edge meets its reverse, the
//! pair gets a match record. Unliking only removes the edge; what happens to
//! an existing match afterwards is decided elsewhere.

use time::OffsetDateTime;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::store::Store;
use crate::error::{AppError, AppResult};
use crate::models::{LikeEdge, LikeResponse, UserPair};

pub struct LikeService;

impl LikeService {
    /// Records that `liker_id` likes `liked_id` and reports whether this completes a match.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidOperation`] - `liker_id == liked_id`
    /// - [`AppError::NotFound`] - `liked_id` does not exist
    /// - [`AppError::Conflict`] - this like was already recorded
    #[instrument(skip(store), err)]
    pub async fn like_user(
        store: &dyn Store,
        liker_id: Uuid,
        liked_id: Uuid,
    ) -> AppResult<LikeResponse> {
        if liker_id == liked_id {
            warn!("User attempted to like themselves");
            return Err(AppError::InvalidOperation("Cannot like yourself"));
        }

        if !store.user_exists(liked_id).await? {
            warn!("Liked user does not exist");
            return Err(AppError::NotFound("User not found"));
        }

        let now = OffsetDateTime::now_utc();
        store
            .insert_like(&LikeEdge {
                liker_id,
                liked_id,
                created_at: now,
            })
            .await?;
        debug!("Like edge recorded");

        if !store.like_exists(liked_id, liker_id).await? {
            return Ok(LikeResponse {
                is_match: false,
                match_id: None,
            });
        }

        let pair = UserPair::new(liker_id, liked_id)?;
        let m = store.find_or_create_match(pair, now).await?;
        info!(match_id = %m.id, "Mutual like, match available");

        Ok(LikeResponse {
            is_match: true,
            match_id: Some(m.id),
        })
    }

    /// Removes the like edge if present. Absent edges are not an error.
    #[instrument(skip(store), err)]
    pub async fn unlike_user(store: &dyn Store, liker_id: Uuid, liked_id: Uuid) -> AppResult<()> {
        if store.delete_like(liker_id, liked_id).await? {
            info!("Like removed");
        } else {
            debug!("No like to remove");
        }
        Ok(())
    }
}
