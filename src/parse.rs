use regex::Regex;
use std::{path::Path, sync::LazyLock};

/// Video extensions worth reconciling against the catalog.
pub const VIDEO_EXTENSIONS: [&str; 8] = ["mp4", "mkv", "avi", "mov", "wmv", "flv", "ts", "m4v"];

/// What a folder name looks like it holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classified {
    Movie { title: String, year: Option<i32> },
    EpisodeCollection,
    Unrecognized,
}

/// Best-effort guess for a single episode file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeGuess {
    pub series: String,
    pub season: i32,
    pub episode: i32,
}

/// Filename heuristics behind a trait so tests can substitute
/// deterministic fakes for the whole parse step.
pub trait NameParser {
    fn classify(&self, name: &str) -> Classified;
    fn episode(&self, path: &Path) -> Option<EpisodeGuess>;
}

/// The production parser, backed by the regexes below.
#[derive(Debug, Default, Clone, Copy)]
pub struct FilenameParser;

impl NameParser for FilenameParser {
    fn classify(&self, name: &str) -> Classified {
        classify(name)
    }

    fn episode(&self, path: &Path) -> Option<EpisodeGuess> {
        parse_episode(path)
    }
}

// S01E02, s1e3, Season 1 Episode 2, S01.E02, ... The leading alternation
// stands in for \b because underscores are word characters and would
// otherwise hide markers in names like `show_s02e15`.
static RE_SXXEXX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|[\W_])s(?:eason)?[._\-\s]*(\d{1,2})[._\-\s]*e(?:pisode)?[._\-\s]*(\d{1,3})")
        .unwrap()
});

// 1x02 style
static RE_XEP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:^|[\W_])(\d{1,2})x(\d{2,3})(?:[\W_]|$)").unwrap());

// A bare season marker, enough to call a folder an episode collection
static RE_SEASON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:^|[\W_])s(?:eason)?[._\-\s]*\d{1,2}(?:[\W_]|$)").unwrap());

static RE_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").unwrap());

// Patterns that indicate the start of release metadata (case insensitive)
static RE_METADATA: LazyLock<Regex> = LazyLock::new(|| {
    let patterns = [
        r"[Ss]\d+",
        r"[Ee]\d+",
        r"\b(?:19|20)\d{2}\b",
        r"\d{3,4}p",
        r"(?i)(?:bluray|brrip|webrip|web-dl|hdtv|dvdrip|xvid|x264|x265|h264|h265)",
        r"(?i)(?:proper|repack|internal|limited|unrated|extended|directors\.cut)",
        r"(?i)season[._\-\s]*\d+",
        r"\[.*?\]",
        r"\(.*?\)",
    ];
    Regex::new(&patterns.join("|")).unwrap()
});

pub fn episode_id(season: i32, episode: i32) -> String {
    format!("S{:02}E{:02}", season, episode)
}

fn clean(raw: &str) -> String {
    raw.replace(['.', '_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Title portion before the first metadata marker, plus whether a marker
/// was found at all.
fn split_title(name: &str) -> (Option<String>, bool) {
    let (end, marked) = match RE_METADATA.find(name) {
        Some(m) => (m.start(), true),
        None => (name.len(), false),
    };
    let cleaned = clean(&name[..end]);
    let title = if cleaned.is_empty() { None } else { Some(cleaned) };
    (title, marked)
}

/// Classify a folder's base name. A name with no episode marker, no year
/// and no release metadata gives the heuristic nothing to go on and comes
/// back `Unrecognized`.
pub fn classify(name: &str) -> Classified {
    if RE_SXXEXX.is_match(name) || RE_XEP.is_match(name) || RE_SEASON.is_match(name) {
        return Classified::EpisodeCollection;
    }

    let year = RE_YEAR
        .find_iter(name)
        .last()
        .and_then(|m| m.as_str().parse().ok());
    let (title, marked) = split_title(name);

    match title {
        Some(title) if year.is_some() || marked => Classified::Movie { title, year },
        _ => Classified::Unrecognized,
    }
}

fn find_episode_marker(stem: &str) -> Option<(i32, i32, usize)> {
    for re in [&*RE_SXXEXX, &*RE_XEP] {
        if let Some(caps) = re.captures_iter(stem).last() {
            let whole = caps.get(0)?;
            let season = caps.get(1)?.as_str().parse().ok()?;
            let episode = caps.get(2)?.as_str().parse().ok()?;
            return Some((season, episode, whole.start()));
        }
    }
    None
}

/// Parse one video file into an episode guess. The path is expected to be
/// scoped to its top-level folder (e.g. `Show.S01/S01E02.mkv`) so the
/// folder name can stand in for the series when the filename alone has no
/// title, as with bare `S01E02.mkv` files.
pub fn parse_episode(path: &Path) -> Option<EpisodeGuess> {
    let stem = path.file_stem()?.to_str()?;
    let (season, episode, start) = find_episode_marker(stem)?;

    let mut series = split_title(&stem[..start]).0;
    if series.is_none() {
        let components: Vec<_> = path.components().collect();
        if components.len() > 1 {
            if let Some(folder) = components.first().and_then(|c| c.as_os_str().to_str()) {
                series = split_title(folder).0;
            }
        }
    }

    Some(EpisodeGuess {
        series: series?,
        season,
        episode,
    })
}

pub fn is_video(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| VIDEO_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}
