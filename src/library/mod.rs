pub mod folders;
pub mod track;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub use track::{strip_accents, LoweredMetadata, Metadata, Track, TrackId};

/// Which collection the library panel is showing 📚
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TracksCursor {
    #[default]
    Library,
    Playlist,
}

/// An unfiltered collection plus its current search result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackSet {
    pub all: Vec<Track>,
    pub sub: Vec<Track>,
}

impl TrackSet {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self {
            sub: tracks.clone(),
            all: tracks,
        }
    }

    /// Recompute `sub` from `all`. An empty query resets the filter.
    pub fn filter(&mut self, query: &str) {
        if query.is_empty() {
            self.sub = self.all.clone();
            return;
        }

        let needle = strip_accents(query);
        self.sub = self
            .all
            .iter()
            .filter(|track| track.lowered().matches(&needle))
            .cloned()
            .collect();
    }
}

/// Library and playlist views side by side.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tracks {
    pub library: TrackSet,
    pub playlist: TrackSet,
}

impl Tracks {
    pub fn view(&self, cursor: TracksCursor) -> &TrackSet {
        match cursor {
            TracksCursor::Library => &self.library,
            TracksCursor::Playlist => &self.playlist,
        }
    }

    pub fn view_mut(&mut self, cursor: TracksCursor) -> &mut TrackSet {
        match cursor {
            TracksCursor::Library => &mut self.library,
            TracksCursor::Playlist => &mut self.playlist,
        }
    }

    /// Look ids up in the full library, keeping the order of `ids` and
    /// skipping unknown ones.
    pub fn resolve(&self, ids: &[TrackId]) -> Vec<Track> {
        ids.iter()
            .filter_map(|id| self.library.all.iter().find(|t| &t.id == id))
            .cloned()
            .collect()
    }
}

/// Saved playlist as reported by the playlist collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tracks: Vec<TrackId>,
}

/// Read a JSON array of tracks produced by the library scanner.
pub fn load_library(path: &Path) -> Result<Vec<Track>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read library file {}", path.display()))?;
    let tracks: Vec<Track> = serde_json::from_str(&content)
        .with_context(|| format!("invalid library file {}", path.display()))?;
    Ok(tracks)
}
