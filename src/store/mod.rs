mod memory;

pub use memory::InMemoryShowStore;

use crate::models::{ShowId, ShowSummary, UpcomingEpisodeRef};

/// Read projections over the user's shows plus the single mutation the
/// unfollow flow is allowed to issue.
pub trait ShowStore: Send + Sync {
    fn basic_show_info_for_all_shows(&self) -> Vec<ShowSummary>;

    fn basic_show_info_for_upcoming_episodes(&self) -> Vec<UpcomingEpisodeRef>;

    /// Removes `show_id` from the followed set. Returns whether the set changed.
    fn remove_followed_show(&self, show_id: ShowId) -> bool;
}
