use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

/// Media-kind filter for catalog searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Movie,
    Show,
}

impl SearchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchKind::Movie => "movie",
            SearchKind::Show => "show",
        }
    }
}

/// One search result from the catalog.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Candidate {
    #[serde(rename = "ratingKey")]
    pub rating_key: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    #[serde(default)]
    pub year: Option<i32>,
}

/// Catalog faults, kept distinguishable so a transport failure is never
/// silently confused with a confirmed-absent episode.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
    #[error("episode S{season:02}E{episode:02} not in catalog")]
    EpisodeNotFound { season: i32, episode: i32 },
}

/// The media-catalog collaborator. Production talks to Plex; tests plug
/// in deterministic fakes.
#[async_trait]
pub trait Catalog {
    async fn search(&self, query: &str, kind: SearchKind) -> Result<Vec<Candidate>, CatalogError>;

    /// Resolve a specific episode of a show candidate. Errors with
    /// `EpisodeNotFound` when the show exists but the episode does not.
    async fn episode(
        &self,
        show: &Candidate,
        season: i32,
        episode: i32,
    ) -> Result<(), CatalogError>;
}
