use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::cli::Command;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::follow::{FollowService, FollowedShowsSync, HttpFollowClient, StaticCredential};
use crate::formatting::{format_air_date, maybe_pluralize, poster_url, season_episode_code};
use crate::models::ShowId;
use crate::schedule::{is_upcoming, label_for};
use crate::store::{InMemoryShowStore, ShowStore};

pub struct App {
    config: AppConfig,
    store: Arc<InMemoryShowStore>,
    sync: FollowedShowsSync,
}

impl App {
    pub fn new_with_config(config: AppConfig) -> Result<Self, AppError> {
        let store = Arc::new(InMemoryShowStore::load(&config.store.snapshot)?);
        let service = Arc::new(HttpFollowClient::new(&config.api)?);
        Ok(Self::with_parts(config, store, service))
    }

    pub fn with_parts(
        config: AppConfig,
        store: Arc<InMemoryShowStore>,
        service: Arc<dyn FollowService>,
    ) -> Self {
        let credentials = Arc::new(StaticCredential::from(&config.auth));
        let sync = FollowedShowsSync::new(store.clone(), service, credentials);

        Self {
            config,
            store,
            sync,
        }
    }

    pub async fn run(&self, command: &Command, now: NaiveDateTime) -> Result<(), AppError> {
        match command {
            Command::Following => {
                for line in self.following_lines() {
                    println!("{}", line);
                }
            }
            Command::Upcoming => {
                for line in self.upcoming_lines(now) {
                    println!("{}", line);
                }
            }
            Command::Unfollow { show_ids } => self.unfollow(show_ids).await?,
        }
        Ok(())
    }

    pub fn following_lines(&self) -> Vec<String> {
        self.store
            .basic_show_info_for_all_shows()
            .into_iter()
            .map(|show| {
                let mut line = format!(
                    "[{}] {} | {} {} | {} {} | {}",
                    show.id,
                    show.name,
                    show.num_seasons,
                    maybe_pluralize(show.num_seasons.into(), "season"),
                    show.num_episodes,
                    maybe_pluralize(show.num_episodes.into(), "episode"),
                    show.status
                );
                if let Some(url) = poster_url(show.poster_path.as_deref()) {
                    line.push_str(&format!(" | {}", url));
                }
                line
            })
            .collect()
    }

    /// Upcoming episodes in store order, labeled relative to `now`. Episodes
    /// that already aired are skipped.
    pub fn upcoming_lines(&self, now: NaiveDateTime) -> Vec<String> {
        self.store
            .basic_show_info_for_upcoming_episodes()
            .into_iter()
            .filter(|item| {
                let keep = is_upcoming(item.next_episode.air_date, now);
                if !keep {
                    tracing::debug!(
                        "Skipping {} episode that aired {}",
                        item.show_name,
                        item.next_episode.air_date
                    );
                }
                keep
            })
            .map(|item| {
                let episode = &item.next_episode;
                format!(
                    "{:<12} {:<8} {} - {} ({})",
                    label_for(episode.air_date, now).to_string(),
                    season_episode_code(episode.season_number, episode.episode_number),
                    item.show_name,
                    episode.name,
                    format_air_date(episode.air_date)
                )
            })
            .collect()
    }

    /// Unfollows each show, persists the snapshot, then waits for the remote
    /// deletes so the process does not exit underneath them.
    async fn unfollow(&self, show_ids: &[ShowId]) -> Result<(), AppError> {
        let pending: Vec<_> = show_ids.iter().map(|&id| self.sync.unfollow(id)).collect();

        self.store.save(&self.config.store.snapshot)?;
        tracing::info!("Saved snapshot to {}", self.config.store.snapshot.display());

        for handle in pending {
            if let Err(e) = handle.await {
                tracing::warn!("Unfollow task did not complete: {}", e);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::follow::MockFollowService;
    use crate::models::ShowSnapshot;
    use chrono::NaiveDate;
    use serde_json::json;

    fn snapshot() -> ShowSnapshot {
        serde_json::from_value(json!({
            "shows": [
                {
                    "id": 95396,
                    "name": "Severance",
                    "numEpisodes": 19,
                    "numSeasons": 2,
                    "posterPath": "/sev.jpg",
                    "status": "Returning Series",
                    "nextEpisode": {
                        "airDate": "2024-02-05",
                        "seasonNumber": 3,
                        "episodeNumber": 1,
                        "name": "Premiere",
                        "overview": ""
                    }
                },
                {
                    "id": 136315,
                    "name": "The Bear",
                    "numEpisodes": 1,
                    "numSeasons": 1,
                    "status": "Returning Series",
                    "nextEpisode": {
                        "airDate": "2024-01-03",
                        "seasonNumber": 1,
                        "episodeNumber": 2,
                        "name": "Hands",
                        "overview": ""
                    }
                },
                {
                    "id": 60059,
                    "name": "Better Call Saul",
                    "numEpisodes": 63,
                    "numSeasons": 6,
                    "status": "Ended",
                    "nextEpisode": {
                        "airDate": "2023-12-20",
                        "seasonNumber": 6,
                        "episodeNumber": 13,
                        "name": "Saul Gone",
                        "overview": ""
                    }
                }
            ]
        }))
        .unwrap()
    }

    fn app_with(service: MockFollowService, dir: &tempfile::TempDir) -> App {
        let mut config = AppConfig::default();
        config.store.snapshot = dir.path().join("shows.json");
        config.auth.token = Some("jwt".to_string());

        let store = Arc::new(InMemoryShowStore::new(snapshot().shows));
        App::with_parts(config, store, Arc::new(service))
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(18, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_following_lines() {
        let dir = tempfile::tempdir().unwrap();
        let app = app_with(MockFollowService::new(), &dir);

        let lines = app.following_lines();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "[95396] Severance | 2 seasons | 19 episodes | Returning Series | https://image.tmdb.org/t/p/w185/sev.jpg"
        );
        assert_eq!(lines[1], "[136315] The Bear | 1 season | 1 episode | Returning Series");
    }

    #[test]
    fn test_upcoming_lines_skip_aired_episodes() {
        let dir = tempfile::tempdir().unwrap();
        let app = app_with(MockFollowService::new(), &dir);

        let lines = app.upcoming_lines(now());
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("In 2 days"));
        assert!(lines[0].contains("S1 E2"));
        assert!(lines[0].contains("The Bear - Hands (Wednesday, January 3rd)"));
        assert!(lines[1].starts_with("In 1 month"));
        assert!(lines[1].contains("Severance"));
    }

    #[tokio::test]
    async fn test_unfollow_persists_snapshot_and_dispatches() {
        let mut service = MockFollowService::new();
        service.expect_name().return_const("mock");
        service
            .expect_unfollow()
            .withf(|id, token| *id == 136315 && token.as_deref() == Some("jwt"))
            .times(1)
            .returning(|_, _| Ok(()));

        let dir = tempfile::tempdir().unwrap();
        let app = app_with(service, &dir);

        app.run(&Command::Unfollow { show_ids: vec![136315] }, now())
            .await
            .unwrap();

        assert!(!app.store.is_following(136315));
        let reloaded = InMemoryShowStore::load(&dir.path().join("shows.json")).unwrap();
        assert!(!reloaded.is_following(136315));
        assert!(reloaded.is_following(95396));
        assert_eq!(app.upcoming_lines(now()).len(), 1);
    }
}
