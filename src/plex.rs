use crate::catalog::{Candidate, Catalog, CatalogError, SearchKind};
use crate::config::ConfigError;
use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;

#[derive(Debug, Deserialize)]
struct Container<T> {
    #[serde(rename = "Metadata", default = "Vec::new")]
    metadata: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(rename = "MediaContainer")]
    container: Container<T>,
}

/// One entry of a show's `allLeaves` listing: `parentIndex` is the season
/// number, `index` the episode number.
#[derive(Debug, Deserialize)]
struct Leaf {
    #[serde(rename = "parentIndex", default)]
    parent_index: Option<i32>,
    #[serde(default)]
    index: Option<i32>,
}

pub struct PlexClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl PlexClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
            token: token.into(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = std::env::var("PLEX_BASEURL")
            .map_err(|_| ConfigError::MissingEnv("PLEX_BASEURL"))?;
        let token =
            std::env::var("PLEX_TOKEN").map_err(|_| ConfigError::MissingEnv("PLEX_TOKEN"))?;
        Ok(Self::new(base_url, token))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, CatalogError> {
        Ok(self
            .client
            .get(format!("{}{}", self.base_url, path))
            .header("X-Plex-Token", &self.token)
            .header("Accept", "application/json")
            .query(query)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
}

#[async_trait]
impl Catalog for PlexClient {
    async fn search(&self, query: &str, kind: SearchKind) -> Result<Vec<Candidate>, CatalogError> {
        let response: Envelope<Candidate> = self
            .get_json(
                "/library/search",
                &[("query", query), ("searchTypes", kind.as_str())],
            )
            .await?;
        Ok(response.container.metadata)
    }

    async fn episode(
        &self,
        show: &Candidate,
        season: i32,
        episode: i32,
    ) -> Result<(), CatalogError> {
        let path = format!("/library/metadata/{}/allLeaves", show.rating_key);
        let response: Envelope<Leaf> = self.get_json(&path, &[]).await?;
        let found = response
            .container
            .metadata
            .iter()
            .any(|leaf| leaf.parent_index == Some(season) && leaf.index == Some(episode));
        if found {
            Ok(())
        } else {
            Err(CatalogError::EpisodeNotFound { season, episode })
        }
    }
}
