use std::sync::Arc;

use tokio::task::JoinHandle;

use super::{CredentialSource, FollowService};
use crate::models::ShowId;
use crate::store::ShowStore;

/// Optimistic unfollow: the show leaves local state immediately and the
/// remote delete runs in a detached task.
///
/// The remote outcome never reaches the caller and local state is never
/// restored. A failed delete leaves the show unfollowed locally but still
/// followed remotely; it is only logged.
pub struct FollowedShowsSync {
    store: Arc<dyn ShowStore>,
    service: Arc<dyn FollowService>,
    credentials: Arc<dyn CredentialSource>,
}

impl FollowedShowsSync {
    pub fn new(
        store: Arc<dyn ShowStore>,
        service: Arc<dyn FollowService>,
        credentials: Arc<dyn CredentialSource>,
    ) -> Self {
        Self {
            store,
            service,
            credentials,
        }
    }

    /// Removes `show_id` from the followed set, then dispatches one remote
    /// delete. Must be called inside a tokio runtime.
    ///
    /// The returned handle only tells when the request finished. Dropping it
    /// detaches the request.
    pub fn unfollow(&self, show_id: ShowId) -> JoinHandle<()> {
        if self.store.remove_followed_show(show_id) {
            tracing::info!("Unfollowed show {}", show_id);
        } else {
            tracing::debug!("Show {} was not followed locally", show_id);
        }

        let service = Arc::clone(&self.service);
        let token = self.credentials.token();

        tokio::spawn(async move {
            match service.unfollow(show_id, token).await {
                Ok(()) => tracing::debug!("{} confirmed unfollow of show {}", service.name(), show_id),
                Err(e) => tracing::warn!(
                    "Remote unfollow of show {} failed on {}: {}",
                    show_id,
                    service.name(),
                    e
                ),
            }
        })
    }
}
