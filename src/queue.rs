//! Playback queue 📋
//!
//! An ordered list of tracks, a cursor on the one playing, and the
//! pre-shuffle order kept aside so shuffle can be turned off again.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::library::Track;
use crate::player::RepeatMode;

/// Below this position, "previous" goes to the previous track; above it,
/// the current track restarts.
pub const REPLAY_THRESHOLD_SECS: f64 = 5.0;

#[derive(Debug, Clone, Default, PartialEq)]
struct Backup {
    tracks: Vec<Track>,
    cursor: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Queue {
    tracks: Vec<Track>,
    cursor: Option<usize>,
    backup: Option<Backup>,
}

impl Queue {
    /// Out-of-range cursors are dropped.
    pub fn new(tracks: Vec<Track>, cursor: Option<usize>) -> Self {
        let cursor = cursor.filter(|&c| c < tracks.len());
        Self {
            tracks,
            cursor,
            backup: None,
        }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn current(&self) -> Option<&Track> {
        self.cursor.and_then(|c| self.tracks.get(c))
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Pre-shuffle order, if the queue is currently shuffled.
    pub fn backup(&self) -> Option<(&[Track], Option<usize>)> {
        self.backup.as_ref().map(|b| (b.tracks.as_slice(), b.cursor))
    }

    /// Returns false (and leaves the cursor alone) when out of range.
    pub fn set_cursor(&mut self, index: usize) -> bool {
        if index >= self.tracks.len() {
            return false;
        }
        self.cursor = Some(index);
        true
    }

    /// Index "next" lands on, or `None` when playback should stop.
    pub fn next_index(&self, repeat: RepeatMode) -> Option<usize> {
        if self.tracks.is_empty() {
            return None;
        }
        let last = self.tracks.len() - 1;

        let candidate = match (repeat, self.cursor) {
            (RepeatMode::One, Some(c)) => c,
            (RepeatMode::All, Some(c)) if c == last => 0,
            (_, Some(c)) => c + 1,
            (_, None) => 0,
        };

        (candidate <= last).then_some(candidate)
    }

    /// Index "previous" lands on, or `None` when playback should stop.
    ///
    /// Past [`REPLAY_THRESHOLD_SECS`] into the track, the current index is
    /// replayed whatever the repeat mode.
    pub fn previous_index(&self, repeat: RepeatMode, position_secs: f64) -> Option<usize> {
        let cursor = self.cursor?;
        let last = self.tracks.len().checked_sub(1)?;

        if position_secs >= REPLAY_THRESHOLD_SECS {
            return Some(cursor);
        }

        match repeat {
            RepeatMode::One => Some(cursor),
            RepeatMode::All if cursor == 0 => Some(last),
            _ => cursor.checked_sub(1),
        }
    }

    /// Empty the queue and forget any shuffle backup.
    pub fn clear(&mut self) {
        self.tracks.clear();
        self.cursor = None;
        self.backup = None;
    }

    /// Shuffle everything except the current track, which moves to the front.
    ///
    /// The current track is picked before the remainder is partitioned, so
    /// shuffling never loses or duplicates an entry. With no current track
    /// the whole queue is shuffled and the cursor stays unset.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.backup = Some(Backup {
            tracks: self.tracks.clone(),
            cursor: self.cursor,
        });

        match self.cursor {
            Some(cursor) => {
                let current = self.tracks.remove(cursor);
                self.tracks.shuffle(rng);
                self.tracks.insert(0, current);
                self.cursor = Some(0);
            }
            None => self.tracks.shuffle(rng),
        }
    }

    /// Restore the pre-shuffle order. The cursor follows the playing track
    /// into the restored order. Returns false if there was nothing to restore.
    pub fn unshuffle(&mut self) -> bool {
        let Some(backup) = self.backup.take() else {
            return false;
        };

        let playing = self.current().map(|t| t.id.clone());
        let cursor = match playing {
            Some(id) => {
                let same_slot = backup
                    .cursor
                    .filter(|&c| backup.tracks.get(c).is_some_and(|t| t.id == id));
                same_slot.or_else(|| backup.tracks.iter().position(|t| t.id == id))
            }
            None => backup.cursor,
        };

        self.cursor = cursor.filter(|&c| c < backup.tracks.len());
        self.tracks = backup.tracks;
        true
    }

    /// Drop everything queued after the current track.
    pub fn clear_after_cursor(&mut self) {
        match self.cursor {
            Some(cursor) => self.tracks.truncate(cursor + 1),
            None => self.tracks.clear(),
        }
    }

    /// Remove the entry `offset` places after the current track
    /// (`offset == 0` is the next one). Returns false when out of range.
    pub fn remove_relative(&mut self, offset: usize) -> bool {
        let Some(index) = self.after_cursor().checked_add(offset) else {
            return false;
        };
        if index >= self.tracks.len() {
            return false;
        }
        self.tracks.remove(index);
        true
    }

    pub fn append(&mut self, tracks: impl IntoIterator<Item = Track>) {
        self.tracks.extend(tracks);
    }

    /// Queue tracks to play right after the current one.
    pub fn insert_after_cursor(&mut self, tracks: impl IntoIterator<Item = Track>) {
        let tail = self.tracks.split_off(self.after_cursor());
        self.tracks.extend(tracks);
        self.tracks.extend(tail);
    }

    /// Replace the queue wholesale (e.g. after a drag-and-drop reorder).
    /// The cursor follows the current track, or is cleared if it is gone.
    pub fn replace(&mut self, tracks: Vec<Track>) {
        let playing = self.current().map(|t| t.id.clone());
        self.cursor = playing.and_then(|id| tracks.iter().position(|t| t.id == id));
        self.tracks = tracks;
    }

    fn after_cursor(&self) -> usize {
        self.cursor.map_or(0, |c| c + 1)
    }
}
