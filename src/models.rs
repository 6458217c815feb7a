use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type ShowId = u64;

/// Basic info about a followed show, as projected by the show store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowSummary {
    pub id: ShowId,
    pub name: String,
    #[serde(default)]
    pub num_episodes: u32,
    #[serde(default)]
    pub num_seasons: u32,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextEpisode {
    pub air_date: NaiveDate,
    pub season_number: u32,
    pub episode_number: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub overview: String,
}

/// A followed show together with its next episode to air.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingEpisodeRef {
    pub show_id: ShowId,
    pub show_name: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    pub next_episode: NextEpisode,
}

/// A show as stored in a snapshot file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowRecord {
    #[serde(flatten)]
    pub summary: ShowSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_episode: Option<NextEpisode>,
}

impl ShowRecord {
    pub fn upcoming(&self) -> Option<UpcomingEpisodeRef> {
        self.next_episode.as_ref().map(|episode| UpcomingEpisodeRef {
            show_id: self.summary.id,
            show_name: self.summary.name.clone(),
            poster_path: self.summary.poster_path.clone(),
            next_episode: episode.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShowSnapshot {
    #[serde(default)]
    pub shows: Vec<ShowRecord>,
}
