use crate::player::traits::AudioOutput;
use anyhow::{bail, Result};
use tracing::debug;

/// Output that plays nothing but keeps the state a real device would
/// report. Used by the command-line driver and for headless runs.
#[derive(Debug, Clone, PartialEq)]
pub struct NullOutput {
    pub src: Option<String>,
    pub paused: bool,
    pub position: f64,
}

impl Default for NullOutput {
    fn default() -> Self {
        Self {
            src: None,
            paused: true,
            position: 0.0,
        }
    }
}

impl AudioOutput for NullOutput {
    fn load(&mut self, uri: &str) -> Result<()> {
        debug!(uri, "load");
        self.src = Some(uri.to_string());
        self.position = 0.0;
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        if self.src.is_none() {
            bail!("no source loaded");
        }
        self.paused = false;
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.paused = true;
        Ok(())
    }

    fn seek(&mut self, position_secs: f64) -> Result<()> {
        if self.src.is_none() {
            bail!("no source loaded");
        }
        self.position = position_secs.max(0.0);
        Ok(())
    }

    fn unload(&mut self) -> Result<()> {
        self.src = None;
        self.position = 0.0;
        self.paused = true;
        Ok(())
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn position(&self) -> f64 {
        self.position
    }
}
