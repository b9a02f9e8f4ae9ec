use std::path::PathBuf;

use crate::library::{Playlist, Track, TrackId, TracksCursor};
use crate::notifications::{Notification, NotificationId};

/// Everything the store reacts to. One variant, one transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // Library
    RefreshLibrary { tracks: Vec<Track> },
    RefreshConfig,
    SelectAndPlay { id: TrackId },
    FilterSearch { query: String },
    SetTracksCursor { cursor: TracksCursor },
    LibraryReset,
    RefreshStart,
    RefreshEnd,
    RefreshProgress { percentage: f32 },
    /// `None` when the folder picker was dismissed.
    AddFolders { folders: Option<Vec<PathBuf>> },
    RemoveFolder { index: usize },

    // Player
    Toggle,
    Play,
    Pause,
    Stop,
    Next,
    Previous,
    ToggleShuffle,
    CycleRepeat,
    JumpTo { seconds: f64 },

    // Queue
    QueuePlay { index: usize },
    QueueClear,
    /// Offset counted from the track after the cursor.
    QueueRemove { offset: usize },
    QueueAdd { tracks: Vec<Track> },
    QueueAddNext { tracks: Vec<Track> },
    SetQueue { tracks: Vec<Track> },

    // Notifications
    NotificationAdd { notification: Notification },
    NotificationRemove { id: NotificationId },

    // Playlists
    PlaylistsRefresh { playlists: Vec<Playlist> },
    PlaylistLoad { tracks: Vec<Track> },
}

impl Action {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::RefreshLibrary { .. } => "refresh_library",
            Self::RefreshConfig => "refresh_config",
            Self::SelectAndPlay { .. } => "select_and_play",
            Self::FilterSearch { .. } => "filter_search",
            Self::SetTracksCursor { .. } => "set_tracks_cursor",
            Self::LibraryReset => "library_reset",
            Self::RefreshStart => "refresh_start",
            Self::RefreshEnd => "refresh_end",
            Self::RefreshProgress { .. } => "refresh_progress",
            Self::AddFolders { .. } => "add_folders",
            Self::RemoveFolder { .. } => "remove_folder",
            Self::Toggle => "toggle",
            Self::Play => "play",
            Self::Pause => "pause",
            Self::Stop => "stop",
            Self::Next => "next",
            Self::Previous => "previous",
            Self::ToggleShuffle => "toggle_shuffle",
            Self::CycleRepeat => "cycle_repeat",
            Self::JumpTo { .. } => "jump_to",
            Self::QueuePlay { .. } => "queue_play",
            Self::QueueClear => "queue_clear",
            Self::QueueRemove { .. } => "queue_remove",
            Self::QueueAdd { .. } => "queue_add",
            Self::QueueAddNext { .. } => "queue_add_next",
            Self::SetQueue { .. } => "set_queue",
            Self::NotificationAdd { .. } => "notification_add",
            Self::NotificationRemove { .. } => "notification_remove",
            Self::PlaylistsRefresh { .. } => "playlists_refresh",
            Self::PlaylistLoad { .. } => "playlist_load",
        }
    }
}
