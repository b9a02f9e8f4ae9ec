//! The application store 🎛️
//!
//! Owns [`AppState`], forwards playback side effects to an [`AudioOutput`],
//! persists music folders through a [`ConfigStore`] and tells subscribers
//! when something visible changed.

pub mod action;
pub mod snapshot;
pub mod state;
pub mod subscribers;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::config::{ConfigStore, UserConfig};
use crate::error::StoreError;
use crate::library::folders;
use crate::notifications::{self, Notification, NotificationId, NotificationKind};
use crate::player::AudioOutput;

pub use action::Action;
pub use snapshot::StoreSnapshot;
pub use state::{AppState, Playback, Transition};
pub use subscribers::{Subscribers, SubscriptionId};

pub struct Store<O, C, R = StdRng> {
    state: AppState,
    output: O,
    config: C,
    rng: R,
    subscribers: Subscribers,
    next_notification_id: NotificationId,
}

impl<O, C> Store<O, C, StdRng>
where
    O: AudioOutput,
    C: ConfigStore,
{
    /// Store with an OS-seeded shuffle generator.
    pub fn with_entropy(output: O, config: C) -> Self {
        Self::new(output, config, StdRng::from_os_rng())
    }
}

impl<O, C, R> Store<O, C, R>
where
    O: AudioOutput,
    C: ConfigStore,
    R: Rng,
{
    pub fn new(output: O, config: C, rng: R) -> Self {
        Self {
            state: AppState::default(),
            output,
            config,
            rng,
            subscribers: Subscribers::default(),
            next_notification_id: 1,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot::project(&self.state, self.config.get())
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&AppState) + 'static,
    {
        self.subscribers.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Apply one action. Only folder actions can fail, when the config
    /// cannot be saved.
    pub fn dispatch(&mut self, action: Action) -> Result<(), StoreError> {
        debug!(action = action.name(), "dispatch");

        let transition = match action {
            Action::AddFolders { folders } => self.add_folders(folders)?,
            Action::RemoveFolder { index } => self.remove_folder(index)?,
            action => {
                let playback = Playback {
                    paused: self.output.is_paused(),
                    position_secs: self.output.position(),
                };
                self.state.reduce(action, playback, &mut self.rng)
            }
        };

        self.apply(transition);
        Ok(())
    }

    /// Show a toast for `lifetime`; [`Store::tick`] takes it down.
    pub fn notify(
        &mut self,
        kind: NotificationKind,
        content: impl Into<String>,
        lifetime: Duration,
    ) -> Result<NotificationId, StoreError> {
        let id = self.next_notification_id;
        self.next_notification_id += 1;

        let notification = Notification::new(id, kind, content, lifetime, Instant::now());
        self.dispatch(Action::NotificationAdd { notification })?;
        Ok(id)
    }

    /// Remove toasts whose deadline has passed.
    pub fn tick(&mut self, now: Instant) -> Result<(), StoreError> {
        for id in notifications::expired(&self.state.notifications, now) {
            self.dispatch(Action::NotificationRemove { id })?;
        }
        Ok(())
    }

    fn apply(&mut self, transition: Transition) {
        for command in &transition.commands {
            if let Err(e) = command.apply(&mut self.output) {
                warn!(?command, error = %e, "audio output rejected command");
            }
        }
        if transition.changed {
            self.subscribers.notify(&self.state);
        }
    }

    fn add_folders(&mut self, added: Option<Vec<PathBuf>>) -> Result<Transition, StoreError> {
        let Some(added) = added else {
            return Ok(Transition::none());
        };

        let resolved: Vec<PathBuf> = added
            .iter()
            .filter_map(|folder| match folders::resolve(folder) {
                Ok(path) => Some(path),
                Err(e) => {
                    warn!(folder = %folder.display(), error = %e, "skipping unresolvable folder");
                    None
                }
            })
            .collect();

        let mut config = self.config.get().clone();
        config.music_folders = folders::merge(&config.music_folders, resolved);
        self.commit_config(config)
    }

    fn remove_folder(&mut self, index: usize) -> Result<Transition, StoreError> {
        let mut config = self.config.get().clone();
        if index >= config.music_folders.len() {
            return Ok(Transition::none());
        }

        config.music_folders.remove(index);
        self.commit_config(config)
    }

    /// Install and save `config`. On a failed save the previous config is
    /// put back, so memory never runs ahead of disk.
    fn commit_config(&mut self, config: UserConfig) -> Result<Transition, StoreError> {
        let previous = self.config.get().clone();
        self.config.set(config);
        if let Err(e) = self.config.save() {
            self.config.set(previous);
            return Err(e.into());
        }
        Ok(Transition::changed())
    }
}

impl<O, C, R> std::fmt::Debug for Store<O, C, R>
where
    O: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("output", &self.output)
            .field("subscribers", &self.subscribers)
            .finish()
    }
}
