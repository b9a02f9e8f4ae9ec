use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

pub type TrackId = String;

/// Tag metadata as read by the library scanner 🏷️
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub artist: Vec<String>,
    #[serde(default)]
    pub album: String,
    #[serde(default)]
    pub genre: Vec<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub duration: f64, // seconds
    #[serde(default)]
    pub track_no: Option<u32>,
    #[serde(default)]
    pub year: Option<u32>,
}

/// Lower-cased, accent-stripped copy of the searchable fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoweredMetadata {
    pub artist: String, // joined with ", "
    pub album: String,
    pub genre: String, // joined with ", "
    pub title: String,
}

impl LoweredMetadata {
    pub fn from_metadata(metadata: &Metadata) -> Self {
        Self {
            artist: strip_accents(&metadata.artist.join(", ")),
            album: strip_accents(&metadata.album),
            genre: strip_accents(&metadata.genre.join(", ")),
            title: strip_accents(&metadata.title),
        }
    }

    /// `needle` must already be lowered with [`strip_accents`].
    pub fn matches(&self, needle: &str) -> bool {
        self.artist.contains(needle)
            || self.album.contains(needle)
            || self.genre.contains(needle)
            || self.title.contains(needle)
    }
}

/// A single library entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "TrackRecord")]
pub struct Track {
    pub id: TrackId,
    pub path: PathBuf,
    pub metadata: Metadata,
    #[serde(skip_serializing)]
    lowered: LoweredMetadata,
}

// On-disk shape; the lowered copy is rebuilt on load.
#[derive(Deserialize)]
struct TrackRecord {
    id: TrackId,
    path: PathBuf,
    #[serde(default)]
    metadata: Metadata,
}

impl From<TrackRecord> for Track {
    fn from(record: TrackRecord) -> Self {
        Track::new(record.id, record.path, record.metadata)
    }
}

impl Track {
    pub fn new(id: impl Into<TrackId>, path: impl Into<PathBuf>, metadata: Metadata) -> Self {
        let lowered = LoweredMetadata::from_metadata(&metadata);
        Self {
            id: id.into(),
            path: path.into(),
            metadata,
            lowered,
        }
    }

    pub fn lowered(&self) -> &LoweredMetadata {
        &self.lowered
    }

    /// Display title, falling back to the file name for untagged files.
    pub fn display_title(&self) -> String {
        if !self.metadata.title.trim().is_empty() {
            return self.metadata.title.clone();
        }
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| self.id.clone())
    }
}

/// Lower-case `input` and drop combining marks after NFD decomposition,
/// so "Beyoncé" and "beyonce" compare equal.
pub fn strip_accents(input: &str) -> String {
    input
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}
