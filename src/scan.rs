use crate::catalog::Catalog;
use crate::parse::{NameParser, episode_id, is_video};
use crate::reconcile::{EpisodeStatus, episode_present};
use anyhow::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Aggregate verdict for one TV folder.
#[derive(Debug, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Every video file parsed and every episode is in the catalog.
    Removable,
    /// A video file did not parse as an episode; nothing safe can be said
    /// about the folder, so the scan stopped there.
    Unparseable(PathBuf),
    /// Episode ids that were absent from the catalog or whose lookup
    /// faulted. The whole folder stays.
    Missing(Vec<String>),
}

impl ScanOutcome {
    pub fn removable(&self) -> bool {
        matches!(self, ScanOutcome::Removable)
    }
}

/// Walk a TV folder and check every video file against the catalog.
///
/// An unparseable file is a hard stop; a missing episode is noted and the
/// scan continues so every gap gets reported. A folder with no video
/// files at all comes back `Removable`.
pub async fn scan_tv_folder<P: NameParser, C: Catalog>(
    parser: &P,
    catalog: &C,
    folder: &Path,
) -> Result<ScanOutcome> {
    let folder_base = folder.file_name().map(Path::new).unwrap_or(folder);
    let mut missing = Vec::new();

    for entry in WalkDir::new(folder).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if !is_video(path) {
            continue;
        }

        // Re-scope the path under the folder's own name so the parser can
        // fall back to it for the series title.
        let rel = path.strip_prefix(folder).unwrap_or(path);
        let scoped = folder_base.join(rel);

        let Some(guess) = parser.episode(&scoped) else {
            println!(
                "  {} '{}' does not parse as an episode, keeping folder",
                "!".yellow(),
                rel.display()
            );
            return Ok(ScanOutcome::Unparseable(path.to_path_buf()));
        };

        let id = episode_id(guess.season, guess.episode);
        println!("  checking {} of '{}'", id, guess.series);
        match episode_present(catalog, &guess.series, guess.season, guess.episode).await {
            EpisodeStatus::Present => {}
            EpisodeStatus::Absent => {
                println!("  {} {} not in catalog", "x".yellow(), id);
                missing.push(id);
            }
            EpisodeStatus::Fault(err) => {
                println!("  {} catalog fault for {}: {}", "x".red(), id, err);
                missing.push(id);
            }
        }
    }

    if missing.is_empty() {
        Ok(ScanOutcome::Removable)
    } else {
        Ok(ScanOutcome::Missing(missing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Candidate, CatalogError, SearchKind};
    use crate::parse::FilenameParser;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::fs;
    use tempfile::TempDir;

    struct FakeCatalog {
        series: String,
        episodes: HashSet<(i32, i32)>,
        fault_on: HashSet<(i32, i32)>,
    }

    impl FakeCatalog {
        fn new(series: &str, episodes: &[(i32, i32)]) -> Self {
            Self {
                series: series.to_string(),
                episodes: episodes.iter().copied().collect(),
                fault_on: HashSet::new(),
            }
        }
    }

    #[async_trait]
    impl Catalog for FakeCatalog {
        async fn search(
            &self,
            _query: &str,
            _kind: SearchKind,
        ) -> Result<Vec<Candidate>, CatalogError> {
            Ok(vec![Candidate {
                rating_key: "1".to_string(),
                kind: "show".to_string(),
                title: self.series.clone(),
                year: None,
            }])
        }

        async fn episode(
            &self,
            _show: &Candidate,
            season: i32,
            episode: i32,
        ) -> Result<(), CatalogError> {
            if self.fault_on.contains(&(season, episode)) {
                return Err(CatalogError::Unavailable("connection reset".to_string()));
            }
            if self.episodes.contains(&(season, episode)) {
                Ok(())
            } else {
                Err(CatalogError::EpisodeNotFound { season, episode })
            }
        }
    }

    fn tv_folder(dir: &TempDir, name: &str, files: &[&str]) -> PathBuf {
        let folder = dir.path().join(name);
        fs::create_dir_all(&folder).unwrap();
        for file in files {
            let path = folder.join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::File::create(&path).unwrap();
        }
        folder
    }

    #[tokio::test]
    async fn test_all_episodes_present_is_removable() {
        let dir = TempDir::new().unwrap();
        let folder = tv_folder(
            &dir,
            "Show.Name.S01.1080p",
            &["Show.Name.S01E01.mkv", "Show.Name.S01E02.mkv"],
        );
        let catalog = FakeCatalog::new("Show Name", &[(1, 1), (1, 2)]);

        let outcome = scan_tv_folder(&FilenameParser, &catalog, &folder).await.unwrap();
        assert_eq!(outcome, ScanOutcome::Removable);
    }

    #[tokio::test]
    async fn test_one_missing_episode_keeps_folder_and_reports_all() {
        let dir = TempDir::new().unwrap();
        let folder = tv_folder(
            &dir,
            "Show.Name.S01.1080p",
            &[
                "Show.Name.S01E01.mkv",
                "Show.Name.S01E02.mkv",
                "Show.Name.S01E03.mkv",
            ],
        );
        let catalog = FakeCatalog::new("Show Name", &[(1, 1)]);

        let outcome = scan_tv_folder(&FilenameParser, &catalog, &folder).await.unwrap();
        assert_eq!(
            outcome,
            ScanOutcome::Missing(vec!["S01E02".to_string(), "S01E03".to_string()])
        );
    }

    #[tokio::test]
    async fn test_lookup_fault_keeps_folder() {
        let dir = TempDir::new().unwrap();
        let folder = tv_folder(
            &dir,
            "Show.Name.S01.1080p",
            &["Show.Name.S01E01.mkv", "Show.Name.S01E02.mkv"],
        );
        let mut catalog = FakeCatalog::new("Show Name", &[(1, 1), (1, 2)]);
        catalog.fault_on.insert((1, 2));

        let outcome = scan_tv_folder(&FilenameParser, &catalog, &folder).await.unwrap();
        assert_eq!(outcome, ScanOutcome::Missing(vec!["S01E02".to_string()]));
    }

    #[tokio::test]
    async fn test_unparseable_video_file_aborts_scan() {
        let dir = TempDir::new().unwrap();
        let folder = tv_folder(
            &dir,
            "Mixed.Stuff",
            &["Show.Name.S01E01.mkv", "holiday-clip.mkv"],
        );
        let catalog = FakeCatalog::new("Show Name", &[(1, 1)]);

        let outcome = scan_tv_folder(&FilenameParser, &catalog, &folder).await.unwrap();
        assert!(matches!(outcome, ScanOutcome::Unparseable(path)
            if path.file_name().unwrap() == "holiday-clip.mkv"));
    }

    #[tokio::test]
    async fn test_non_video_files_are_ignored() {
        let dir = TempDir::new().unwrap();
        let folder = tv_folder(
            &dir,
            "Show.Name.S01.1080p",
            &["Show.Name.S01E01.mkv", "Show.Name.S01E01.srt", "notes.txt"],
        );
        let catalog = FakeCatalog::new("Show Name", &[(1, 1)]);

        let outcome = scan_tv_folder(&FilenameParser, &catalog, &folder).await.unwrap();
        assert_eq!(outcome, ScanOutcome::Removable);
    }

    #[tokio::test]
    async fn test_nested_files_are_scanned() {
        let dir = TempDir::new().unwrap();
        let folder = tv_folder(
            &dir,
            "Show.Name.S01.1080p",
            &["disc1/Show.Name.S01E01.mkv", "disc2/Show.Name.S01E02.mkv"],
        );
        let catalog = FakeCatalog::new("Show Name", &[(1, 1)]);

        let outcome = scan_tv_folder(&FilenameParser, &catalog, &folder).await.unwrap();
        assert_eq!(outcome, ScanOutcome::Missing(vec!["S01E02".to_string()]));
    }

    #[tokio::test]
    async fn test_series_title_from_folder_when_filename_is_bare() {
        let dir = TempDir::new().unwrap();
        let folder = tv_folder(&dir, "Show.Name.S01.1080p", &["S01E01.mkv"]);
        let catalog = FakeCatalog::new("Show Name", &[(1, 1)]);

        let outcome = scan_tv_folder(&FilenameParser, &catalog, &folder).await.unwrap();
        assert_eq!(outcome, ScanOutcome::Removable);
    }

    // Intended policy: a TV folder with no video files has nothing left
    // to confirm and counts as removable.
    #[tokio::test]
    async fn test_empty_folder_is_removable() {
        let dir = TempDir::new().unwrap();
        let folder = tv_folder(&dir, "Show.Name.S01.1080p", &[]);
        let catalog = FakeCatalog::new("Show Name", &[]);

        let outcome = scan_tv_folder(&FilenameParser, &catalog, &folder).await.unwrap();
        assert_eq!(outcome, ScanOutcome::Removable);
    }
}
