use crate::catalog::{Catalog, CatalogError, SearchKind};

/// The parser and the catalog disagree on punctuation conventions, so
/// titles are compared case-insensitively with colons and apostrophes
/// stripped from both sides. Nothing fuzzier than that.
pub fn normalize(title: &str) -> String {
    title.to_lowercase().replace([':', '\''], "").trim().to_string()
}

/// Is the movie `(title, year?)` present in the catalog? The first
/// candidate whose normalized title matches (and whose year matches, when
/// one was parsed) settles it.
pub async fn movie_present<C: Catalog>(
    catalog: &C,
    title: &str,
    year: Option<i32>,
) -> Result<bool, CatalogError> {
    let want = normalize(title);
    for candidate in catalog.search(title, SearchKind::Movie).await? {
        if candidate.kind != SearchKind::Movie.as_str() {
            continue;
        }
        if normalize(&candidate.title) == want {
            match year {
                Some(year) => {
                    if candidate.year == Some(year) {
                        return Ok(true);
                    }
                }
                None => return Ok(true),
            }
        }
    }
    Ok(false)
}

/// Outcome of a single episode check. `Fault` is kept separate from
/// `Absent` so a dead catalog never reads as a clean "not there" in the
/// logs, even though the keep-the-folder policy is the same for both.
#[derive(Debug)]
pub enum EpisodeStatus {
    Present,
    Absent,
    Fault(CatalogError),
}

impl EpisodeStatus {
    pub fn is_present(&self) -> bool {
        matches!(self, EpisodeStatus::Present)
    }
}

/// Look for a specific episode: search shows by series name, then ask the
/// first normalized-matching show for season/episode.
pub async fn episode_present<C: Catalog>(
    catalog: &C,
    series: &str,
    season: i32,
    episode: i32,
) -> EpisodeStatus {
    let want = normalize(series);
    let shows = match catalog.search(series, SearchKind::Show).await {
        Ok(shows) => shows,
        Err(err) => return EpisodeStatus::Fault(err),
    };
    for show in shows {
        if show.kind != SearchKind::Show.as_str() {
            continue;
        }
        if normalize(&show.title) == want {
            return match catalog.episode(&show, season, episode).await {
                Ok(()) => EpisodeStatus::Present,
                Err(CatalogError::EpisodeNotFound { .. }) => EpisodeStatus::Absent,
                Err(err) => EpisodeStatus::Fault(err),
            };
        }
    }
    EpisodeStatus::Absent
}
