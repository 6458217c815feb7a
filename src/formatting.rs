use chrono::{Datelike, NaiveDate};

const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w185";

pub fn maybe_pluralize(count: i64, noun: &str) -> String {
    if count == 1 {
        noun.to_string()
    } else {
        format!("{}s", noun)
    }
}

/// Full poster URL for a TMDB poster path, if the show has one.
pub fn poster_url(poster_path: Option<&str>) -> Option<String> {
    poster_path
        .filter(|path| !path.is_empty())
        .map(|path| format!("{}{}", POSTER_BASE_URL, path))
}

pub fn season_episode_code(season: u32, episode: u32) -> String {
    format!("S{} E{}", season, episode)
}

/// Long air date, e.g. "Wednesday, January 3rd".
pub fn format_air_date(date: NaiveDate) -> String {
    let day = date.day();
    let suffix = match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}{}", date.format("%A, %B "), day, suffix)
}
