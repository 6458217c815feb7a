use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use std::sync::{PoisonError, RwLock};

use super::ShowStore;
use crate::error::AppError;
use crate::models::{ShowId, ShowRecord, ShowSnapshot, ShowSummary, UpcomingEpisodeRef};

/// Show store held in memory and persisted as a JSON snapshot.
///
/// The followed set is exactly the list of records; removing a show drops it
/// from both projections.
pub struct InMemoryShowStore {
    shows: RwLock<Vec<ShowRecord>>,
}

impl InMemoryShowStore {
    pub fn new(records: Vec<ShowRecord>) -> Self {
        let mut seen = HashSet::new();
        let shows = records
            .into_iter()
            .filter(|record| {
                let first = seen.insert(record.summary.id);
                if !first {
                    tracing::warn!("Dropping duplicate show {} from snapshot", record.summary.id);
                }
                first
            })
            .collect();

        Self {
            shows: RwLock::new(shows),
        }
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        let file = File::open(path)?;
        let snapshot: ShowSnapshot = serde_json::from_reader(BufReader::new(file))?;
        tracing::debug!("Loaded {} shows from {}", snapshot.shows.len(), path.display());
        Ok(Self::new(snapshot.shows))
    }

    pub fn save(&self, path: &Path) -> Result<(), AppError> {
        let snapshot = ShowSnapshot {
            shows: self.read().clone(),
        };
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, &snapshot)?;
        writer.flush()?;
        tracing::debug!("Saved {} shows to {}", snapshot.shows.len(), path.display());
        Ok(())
    }

    pub fn is_following(&self, show_id: ShowId) -> bool {
        self.read().iter().any(|record| record.summary.id == show_id)
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<ShowRecord>> {
        self.shows.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ShowStore for InMemoryShowStore {
    fn basic_show_info_for_all_shows(&self) -> Vec<ShowSummary> {
        self.read().iter().map(|record| record.summary.clone()).collect()
    }

    fn basic_show_info_for_upcoming_episodes(&self) -> Vec<UpcomingEpisodeRef> {
        let mut upcoming: Vec<UpcomingEpisodeRef> =
            self.read().iter().filter_map(ShowRecord::upcoming).collect();
        upcoming.sort_by_key(|item| item.next_episode.air_date);
        upcoming
    }

    fn remove_followed_show(&self, show_id: ShowId) -> bool {
        let mut shows = self.shows.write().unwrap_or_else(PoisonError::into_inner);
        let before = shows.len();
        shows.retain(|record| record.summary.id != show_id);
        shows.len() != before
    }
}
