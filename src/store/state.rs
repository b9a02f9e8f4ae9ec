use rand::Rng;
use tracing::info;

use crate::library::{Playlist, TrackSet, Tracks, TracksCursor};
use crate::notifications::Notification;
use crate::player::{parse_uri, AudioCommand, PlayerStatus, RepeatMode};
use crate::queue::Queue;

use super::action::Action;

/// What the audio output reports right before a transition.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Playback {
    pub paused: bool,
    pub position_secs: f64,
}

/// Outcome of one transition: whether subscribers must hear about it,
/// and what the audio output must do.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transition {
    pub changed: bool,
    pub commands: Vec<AudioCommand>,
}

impl Transition {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn changed() -> Self {
        Self {
            changed: true,
            commands: Vec::new(),
        }
    }

    fn emit_if(changed: bool) -> Self {
        Self {
            changed,
            commands: Vec::new(),
        }
    }
}

/// The whole in-memory state of the player.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub tracks: Tracks,
    pub tracks_cursor: TracksCursor,
    pub queue: Queue,
    pub playlists: Option<Vec<Playlist>>,
    pub status: PlayerStatus,
    pub notifications: Vec<Notification>,
    pub refreshing_library: bool,
    pub refresh_progress: f32,
    pub repeat: RepeatMode,
    pub shuffle: bool,
}

impl AppState {
    /// The collection currently shown (library or playlist).
    pub fn active_view(&self) -> &TrackSet {
        self.tracks.view(self.tracks_cursor)
    }

    /// Apply `action`. Folder actions are config-backed and go through
    /// `Store::dispatch` instead; here they are inert.
    pub fn reduce<R: Rng + ?Sized>(
        &mut self,
        action: Action,
        playback: Playback,
        rng: &mut R,
    ) -> Transition {
        match action {
            Action::RefreshLibrary { tracks } => {
                self.tracks.library = TrackSet::new(tracks);
                self.tracks.playlist = TrackSet::default();
                Transition::changed()
            }
            Action::RefreshConfig => Transition::changed(),
            Action::SelectAndPlay { id } => self.select_and_play(&id, rng),
            Action::FilterSearch { query } => {
                self.tracks.view_mut(self.tracks_cursor).filter(&query);
                Transition::changed()
            }
            Action::SetTracksCursor { cursor } => {
                self.tracks_cursor = cursor;
                Transition::changed()
            }
            Action::LibraryReset => Transition::none(),
            Action::RefreshStart => {
                self.refreshing_library = true;
                Transition::changed()
            }
            Action::RefreshEnd => {
                self.refreshing_library = false;
                self.refresh_progress = 0.0;
                Transition::changed()
            }
            Action::RefreshProgress { percentage } => {
                self.refresh_progress = if percentage.is_nan() {
                    0.0
                } else {
                    percentage.clamp(0.0, 100.0)
                };
                Transition::changed()
            }
            Action::AddFolders { .. } | Action::RemoveFolder { .. } => Transition::none(),

            Action::Toggle => {
                if playback.paused {
                    self.resume()
                } else {
                    self.pause()
                }
            }
            Action::Play => self.resume(),
            Action::Pause => self.pause(),
            Action::Stop => self.stop(),
            Action::Next => match self.queue.next_index(self.repeat) {
                Some(index) => self.play_index(index),
                None => self.stop(),
            },
            Action::Previous => {
                match self.queue.previous_index(self.repeat, playback.position_secs) {
                    Some(index) => self.play_index(index),
                    None => self.stop(),
                }
            }
            Action::ToggleShuffle => {
                if self.shuffle {
                    self.queue.unshuffle();
                } else {
                    self.queue.shuffle(rng);
                }
                self.shuffle = !self.shuffle;
                Transition::changed()
            }
            Action::CycleRepeat => {
                self.repeat = self.repeat.cycle();
                Transition::changed()
            }
            Action::JumpTo { seconds } => Transition {
                changed: false,
                commands: vec![AudioCommand::Seek(seconds)],
            },

            Action::QueuePlay { index } => {
                if index < self.queue.len() {
                    self.play_index(index)
                } else {
                    Transition::none()
                }
            }
            Action::QueueClear => {
                self.queue.clear_after_cursor();
                Transition::changed()
            }
            Action::QueueRemove { offset } => Transition::emit_if(self.queue.remove_relative(offset)),
            Action::QueueAdd { tracks } => {
                self.queue.append(tracks);
                Transition::changed()
            }
            Action::QueueAddNext { tracks } => {
                self.queue.insert_after_cursor(tracks);
                Transition::changed()
            }
            Action::SetQueue { tracks } => {
                self.queue.replace(tracks);
                Transition::changed()
            }

            Action::NotificationAdd { notification } => {
                self.notifications.push(notification);
                Transition::changed()
            }
            Action::NotificationRemove { id } => {
                let before = self.notifications.len();
                self.notifications.retain(|n| n.id != id);
                Transition::emit_if(self.notifications.len() != before)
            }

            Action::PlaylistsRefresh { playlists } => {
                self.playlists = Some(playlists);
                Transition::changed()
            }
            Action::PlaylistLoad { tracks } => {
                *self.tracks.view_mut(self.tracks_cursor) = TrackSet::new(tracks);
                Transition::changed()
            }
        }
    }

    /// Build a new queue from the active filtered view, starting at `id`.
    fn select_and_play<R: Rng + ?Sized>(&mut self, id: &str, rng: &mut R) -> Transition {
        let tracks = self.active_view().sub.clone();
        let Some(position) = tracks.iter().position(|t| t.id == id) else {
            return Transition::none();
        };

        let mut queue = Queue::new(tracks, Some(position));
        if self.shuffle {
            queue.shuffle(rng);
        }
        self.queue = queue;

        match self.queue.cursor() {
            Some(cursor) => self.play_index(cursor),
            None => Transition::none(),
        }
    }

    fn play_index(&mut self, index: usize) -> Transition {
        let Some(track) = self.queue.get(index) else {
            return self.stop();
        };
        let uri = parse_uri(&track.path);
        info!(id = %track.id, index, "playing");

        self.queue.set_cursor(index);
        self.status = PlayerStatus::Playing;
        Transition {
            changed: true,
            commands: vec![AudioCommand::Load(uri), AudioCommand::Play],
        }
    }

    /// Resume the current track, start the queue from the top if nothing is
    /// current, or stop when there is nothing to play.
    fn resume(&mut self) -> Transition {
        if self.queue.current().is_some() {
            self.status = PlayerStatus::Playing;
            Transition {
                changed: true,
                commands: vec![AudioCommand::Play],
            }
        } else if !self.queue.is_empty() {
            self.play_index(0)
        } else {
            self.stop()
        }
    }

    fn pause(&mut self) -> Transition {
        self.status = PlayerStatus::Paused;
        Transition {
            changed: true,
            commands: vec![AudioCommand::Pause],
        }
    }

    fn stop(&mut self) -> Transition {
        info!("stopped");
        self.queue.clear();
        self.status = PlayerStatus::Stopped;
        Transition {
            changed: true,
            commands: vec![AudioCommand::Pause, AudioCommand::Unload],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::{Metadata, Track};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn track(id: &str, title: &str) -> Track {
        Track::new(
            id,
            format!("/music/{id}.mp3"),
            Metadata {
                title: title.to_string(),
                ..Default::default()
            },
        )
    }

    fn library() -> Vec<Track> {
        vec![track("a", "Alpha"), track("b", "Bravo"), track("c", "Charlie")]
    }

    fn state_with_queue(ids: &[&str], cursor: Option<usize>) -> AppState {
        let tracks = ids.iter().map(|id| track(id, id)).collect();
        AppState {
            queue: Queue::new(tracks, cursor),
            status: PlayerStatus::Playing,
            ..Default::default()
        }
    }

    fn run(state: &mut AppState, action: Action) -> Transition {
        state.reduce(action, Playback::default(), &mut StdRng::seed_from_u64(9))
    }

    #[test]
    fn refresh_library_resets_playlist_view() {
        let mut state = AppState::default();
        state.tracks.playlist = TrackSet::new(vec![track("p", "P")]);

        let t = run(&mut state, Action::RefreshLibrary { tracks: library() });
        assert!(t.changed);
        assert_eq!(state.tracks.library.all.len(), 3);
        assert_eq!(state.tracks.library.sub.len(), 3);
        assert!(state.tracks.playlist.all.is_empty());
    }

    #[test]
    fn select_and_play_builds_queue_from_filtered_view() {
        let mut state = AppState::default();
        run(&mut state, Action::RefreshLibrary { tracks: library() });
        run(&mut state, Action::FilterSearch { query: "r".into() }); // Bravo, Charlie

        let t = run(&mut state, Action::SelectAndPlay { id: "c".into() });
        assert_eq!(state.queue.len(), 2);
        assert_eq!(state.queue.cursor(), Some(1));
        assert_eq!(state.status, PlayerStatus::Playing);
        assert_eq!(
            t.commands,
            vec![AudioCommand::Load("file:///music/c.mp3".into()), AudioCommand::Play]
        );
    }

    #[test]
    fn select_and_play_unknown_id_is_noop() {
        let mut state = AppState::default();
        run(&mut state, Action::RefreshLibrary { tracks: library() });
        let before = state.clone();

        let t = run(&mut state, Action::SelectAndPlay { id: "zzz".into() });
        assert_eq!(t, Transition::none());
        assert_eq!(state, before);
    }

    #[test]
    fn select_and_play_with_shuffle_puts_selection_first() {
        let mut state = AppState {
            shuffle: true,
            ..Default::default()
        };
        run(&mut state, Action::RefreshLibrary { tracks: library() });
        run(&mut state, Action::SelectAndPlay { id: "b".into() });

        assert_eq!(state.queue.cursor(), Some(0));
        assert_eq!(state.queue.current().unwrap().id, "b");
        let (backup, cursor) = state.queue.backup().unwrap();
        assert_eq!(backup.len(), 3);
        assert_eq!(cursor, Some(1));
    }

    #[test]
    fn next_reaching_the_end_stops_with_empty_queue() {
        let mut state = state_with_queue(&["a", "b", "c"], Some(0));

        run(&mut state, Action::Next);
        assert_eq!(state.queue.cursor(), Some(1));
        assert_eq!(state.queue.current().unwrap().id, "b");

        let mut state = state_with_queue(&["a", "b", "c"], Some(2));
        let t = run(&mut state, Action::Next);
        assert_eq!(state.status, PlayerStatus::Stopped);
        assert!(state.queue.is_empty());
        assert_eq!(state.queue.cursor(), None);
        assert!(t.changed);
        assert_eq!(t.commands, vec![AudioCommand::Pause, AudioCommand::Unload]);
    }

    #[test]
    fn previous_replays_current_after_threshold() {
        let mut state = state_with_queue(&["a", "b"], Some(1));
        let playback = Playback {
            paused: false,
            position_secs: 30.0,
        };
        state.reduce(Action::Previous, playback, &mut StdRng::seed_from_u64(0));
        assert_eq!(state.queue.cursor(), Some(1));

        run(&mut state, Action::Previous);
        assert_eq!(state.queue.cursor(), Some(0));

        run(&mut state, Action::Previous);
        assert_eq!(state.status, PlayerStatus::Stopped);
    }

    #[test]
    fn toggle_follows_output_paused_flag() {
        let mut state = state_with_queue(&["a"], Some(0));

        let t = run(&mut state, Action::Toggle); // output reports playing
        assert_eq!(state.status, PlayerStatus::Paused);
        assert_eq!(t.commands, vec![AudioCommand::Pause]);

        let paused = Playback {
            paused: true,
            position_secs: 0.0,
        };
        let t = state.reduce(Action::Toggle, paused, &mut StdRng::seed_from_u64(0));
        assert_eq!(state.status, PlayerStatus::Playing);
        assert_eq!(t.commands, vec![AudioCommand::Play]);
    }

    #[test]
    fn play_on_empty_queue_stops() {
        let mut state = AppState::default();
        let t = run(&mut state, Action::Play);
        assert_eq!(state.status, PlayerStatus::Stopped);
        assert!(t.changed);
    }

    #[test]
    fn stop_keeps_library() {
        let mut state = state_with_queue(&["a", "b"], Some(0));
        state.tracks.library = TrackSet::new(library());

        run(&mut state, Action::Stop);
        assert!(state.queue.is_empty());
        assert_eq!(state.tracks.library.all.len(), 3);
    }

    #[test]
    fn jump_to_seeks_without_emitting() {
        let mut state = state_with_queue(&["a"], Some(0));
        let before = state.clone();
        let t = run(&mut state, Action::JumpTo { seconds: 42.5 });

        assert!(!t.changed);
        assert_eq!(t.commands, vec![AudioCommand::Seek(42.5)]);
        assert_eq!(state, before);
    }

    #[test]
    fn queue_play_out_of_range_is_noop() {
        let mut state = state_with_queue(&["a", "b"], Some(0));
        assert_eq!(run(&mut state, Action::QueuePlay { index: 5 }), Transition::none());

        let t = run(&mut state, Action::QueuePlay { index: 1 });
        assert!(t.changed);
        assert_eq!(state.queue.cursor(), Some(1));
    }

    #[test]
    fn queue_remove_out_of_range_does_not_emit() {
        let mut state = state_with_queue(&["a", "b", "c"], Some(1));
        let before = state.clone();

        let t = run(&mut state, Action::QueueRemove { offset: 4 });
        assert!(!t.changed);
        assert_eq!(state, before);
    }

    #[test]
    fn shuffle_toggle_roundtrip() {
        let mut state = state_with_queue(&["a", "b", "c", "d", "e"], Some(2));
        let original = state.queue.tracks().to_vec();

        run(&mut state, Action::ToggleShuffle);
        assert!(state.shuffle);
        assert_eq!(state.queue.cursor(), Some(0));
        assert_eq!(state.queue.current().unwrap().id, "c");

        run(&mut state, Action::ToggleShuffle);
        assert!(!state.shuffle);
        assert_eq!(state.queue.tracks(), original.as_slice());
        assert_eq!(state.queue.cursor(), Some(2));
    }

    #[test]
    fn refresh_progress_is_clamped_and_reset() {
        let mut state = AppState::default();
        run(&mut state, Action::RefreshStart);
        assert!(state.refreshing_library);

        run(&mut state, Action::RefreshProgress { percentage: 140.0 });
        assert_eq!(state.refresh_progress, 100.0);

        run(&mut state, Action::RefreshEnd);
        assert!(!state.refreshing_library);
        assert_eq!(state.refresh_progress, 0.0);
    }

    #[test]
    fn refresh_progress_nan_reads_as_zero() {
        let mut state = AppState::default();
        run(&mut state, Action::RefreshProgress { percentage: 40.0 });

        let t = run(&mut state, Action::RefreshProgress { percentage: f32::NAN });
        assert!(t.changed);
        assert_eq!(state.refresh_progress, 0.0);

        run(&mut state, Action::RefreshProgress { percentage: -3.0 });
        assert_eq!(state.refresh_progress, 0.0);
    }

    #[test]
    fn set_queue_emits_and_follows_current_track() {
        let mut state = state_with_queue(&["a", "b", "c"], Some(1));

        let t = run(
            &mut state,
            Action::SetQueue {
                tracks: vec![track("c", "c"), track("b", "b")],
            },
        );
        assert!(t.changed);
        assert!(t.commands.is_empty());
        assert_eq!(state.queue.len(), 2);
        assert_eq!(state.queue.current().unwrap().id, "b");

        run(
            &mut state,
            Action::SetQueue {
                tracks: vec![track("z", "z")],
            },
        );
        assert_eq!(state.queue.cursor(), None);
    }

    #[test]
    fn queue_edits_while_shuffled_are_dropped_on_unshuffle() {
        let mut state = state_with_queue(&["a", "b", "c"], Some(0));
        run(&mut state, Action::ToggleShuffle);

        run(
            &mut state,
            Action::QueueAdd {
                tracks: vec![track("z", "z")],
            },
        );
        assert_eq!(state.queue.len(), 4);

        run(&mut state, Action::ToggleShuffle);
        let ids: Vec<&str> = state.queue.tracks().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert_eq!(state.queue.cursor(), Some(0));
    }

    #[test]
    fn playlist_load_targets_active_view() {
        let mut state = AppState::default();
        run(&mut state, Action::RefreshLibrary { tracks: library() });
        run(
            &mut state,
            Action::SetTracksCursor {
                cursor: TracksCursor::Playlist,
            },
        );
        run(
            &mut state,
            Action::PlaylistLoad {
                tracks: vec![track("p", "Papa")],
            },
        );

        assert_eq!(state.active_view().all.len(), 1);
        assert_eq!(state.tracks.library.all.len(), 3);

        run(&mut state, Action::FilterSearch { query: "zulu".into() });
        assert!(state.tracks.playlist.sub.is_empty());
        assert_eq!(state.tracks.library.sub.len(), 3);
    }

    #[test]
    fn library_reset_does_nothing() {
        let mut state = state_with_queue(&["a"], Some(0));
        let before = state.clone();
        assert_eq!(run(&mut state, Action::LibraryReset), Transition::none());
        assert_eq!(state, before);
    }
}
