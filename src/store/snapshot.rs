use serde::Serialize;

use crate::config::UserConfig;
use crate::library::{Playlist, Track, TracksCursor};
use crate::notifications::Notification;
use crate::player::{PlayerStatus, RepeatMode};

use super::state::AppState;

/// Read-only projection handed to the UI layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreSnapshot {
    pub config: UserConfig,
    pub notifications: Vec<Notification>,
    /// Active view, unfiltered.
    pub library: Vec<Track>,
    /// Active view, filtered.
    pub tracks: Vec<Track>,
    pub playlists: Option<Vec<Playlist>>,
    pub queue: Vec<Track>,
    pub queue_cursor: Option<usize>,
    pub player_status: PlayerStatus,
    pub refreshing_library: bool,
    pub refresh_progress: f32,
    pub repeat: RepeatMode,
    pub shuffle: bool,
    pub tracks_cursor: TracksCursor,
}

impl StoreSnapshot {
    pub fn project(state: &AppState, config: &UserConfig) -> Self {
        let view = state.active_view();
        Self {
            config: config.clone(),
            notifications: state.notifications.clone(),
            library: view.all.clone(),
            tracks: view.sub.clone(),
            playlists: state.playlists.clone(),
            queue: state.queue.tracks().to_vec(),
            queue_cursor: state.queue.cursor(),
            player_status: state.status,
            refreshing_library: state.refreshing_library,
            refresh_progress: state.refresh_progress,
            repeat: state.repeat,
            shuffle: state.shuffle,
            tracks_cursor: state.tracks_cursor,
        }
    }
}
