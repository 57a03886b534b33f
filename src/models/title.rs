use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A catalog entry from the popular-titles feed.
///
/// Identity is `id` alone: two titles are the same item exactly when their
/// ids match, regardless of the display attributes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Title {
    /// Stable unique identifier from the upstream catalog
    pub id: i64,
    /// Display title
    pub title: String,
    /// Release date; absent, empty, or unparseable on the wire becomes None
    #[serde(default, deserialize_with = "super::deserialize_release_date")]
    pub release_date: Option<NaiveDate>,
    /// Poster image path (e.g. "/abc123.jpg"), used to build the image URL
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Average vote score, 0.0 to 10.0
    #[serde(default)]
    pub vote_average: f64,
}
