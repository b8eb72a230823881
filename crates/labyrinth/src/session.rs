//! # Game Session
//!
//! Owns the assembler, the scene and the player, and drives regeneration.
//!
//! ```text
//! start() ──> clear scene ──> assemble ──> spawn player
//!                  ^
//!                  │ timer elapsed
//! request_reset() ─┴─ update(dt) ...
//! ```
//!
//! Resets go through `&mut self`, so two can never overlap.

use std::time::Duration;

use labyrinth_procedural::{MazeAssembler, MazeConfig, MazeRun};
use labyrinth_shared::RESET_DELAY_SECS;

use crate::error::{SessionError, SessionResult};
use crate::scene::Scene;
use crate::spawner::{Actor, PlayerSpawner};

/// Session tuning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// Time between a reset request and the regeneration.
    pub reset_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            reset_delay: Duration::from_secs_f32(RESET_DELAY_SECS),
        }
    }
}

/// One play session over a regenerating maze.
#[derive(Debug)]
pub struct GameSession {
    assembler: MazeAssembler,
    scene: Scene,
    spawner: PlayerSpawner,
    config: SessionConfig,
    player: Option<Actor>,
    reset_timer: Option<Duration>,
    started: bool,
    resets: u32,
}

impl GameSession {
    /// Creates a session. Nothing is generated until [`Self::start`].
    #[must_use]
    pub fn new(assembler: MazeAssembler, config: SessionConfig) -> Self {
        Self {
            assembler,
            scene: Scene::new(),
            spawner: PlayerSpawner::default(),
            config,
            player: None,
            reset_timer: None,
            started: false,
            resets: 0,
        }
    }

    /// Creates a session from a loaded maze configuration.
    ///
    /// # Errors
    ///
    /// Fails if the configuration's catalog cannot be built.
    pub fn from_maze_config(maze: &MazeConfig, config: SessionConfig) -> SessionResult<Self> {
        Ok(Self::new(MazeAssembler::from_config(maze)?, config))
    }

    /// The assembler.
    #[must_use]
    pub fn assembler(&self) -> &MazeAssembler {
        &self.assembler
    }

    /// The latest run.
    #[must_use]
    pub fn run(&self) -> Option<&MazeRun> {
        self.assembler.last_run()
    }

    /// Everything instantiated for the current maze.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The spawned player, if spawning succeeded.
    #[must_use]
    pub fn player(&self) -> Option<&Actor> {
        self.player.as_ref()
    }

    /// Session tuning.
    #[must_use]
    pub const fn config(&self) -> SessionConfig {
        self.config
    }

    /// Completed resets.
    #[must_use]
    pub const fn resets(&self) -> u32 {
        self.resets
    }

    /// Time left before a requested reset fires.
    #[must_use]
    pub const fn reset_remaining(&self) -> Option<Duration> {
        self.reset_timer
    }

    /// Generates the first maze and spawns the player.
    ///
    /// # Errors
    ///
    /// Fails if the player cannot be spawned. The maze stays in the scene.
    pub fn start(&mut self) -> SessionResult<&Actor> {
        self.started = true;
        self.regenerate()
    }

    /// Arms the reset timer. A request while one is pending is ignored.
    ///
    /// # Errors
    ///
    /// `NotStarted` before [`Self::start`].
    pub fn request_reset(&mut self) -> SessionResult<()> {
        if !self.started {
            return Err(SessionError::NotStarted);
        }
        if self.reset_timer.is_none() {
            tracing::info!("Reset requested; regenerating in {:?}", self.config.reset_delay);
            self.reset_timer = Some(self.config.reset_delay);
        }
        Ok(())
    }

    /// Advances the reset timer. Returns true if a reset happened.
    ///
    /// # Errors
    ///
    /// Fails if the reset fired and the player could not be respawned.
    pub fn update(&mut self, dt: Duration) -> SessionResult<bool> {
        let Some(remaining) = self.reset_timer else {
            return Ok(false);
        };

        let remaining = remaining.saturating_sub(dt);
        if remaining.is_zero() {
            self.reset_now()?;
            Ok(true)
        } else {
            self.reset_timer = Some(remaining);
            Ok(false)
        }
    }

    /// Clears the scene, regenerates and respawns without waiting.
    ///
    /// # Errors
    ///
    /// `NotStarted` before [`Self::start`], or a spawn failure.
    pub fn reset_now(&mut self) -> SessionResult<&Actor> {
        if !self.started {
            return Err(SessionError::NotStarted);
        }
        self.reset_timer = None;
        self.resets += 1;
        tracing::info!("Resetting maze (reset {})", self.resets);
        self.regenerate()
    }

    fn regenerate(&mut self) -> SessionResult<&Actor> {
        self.player = None;
        self.scene.clear();
        self.assembler.assemble_with(&mut self.scene);

        let actor = self.spawner.spawn(&self.assembler)?;
        Ok(self.player.insert(actor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_reset_delay() {
        assert_eq!(SessionConfig::default().reset_delay, Duration::from_secs(4));
    }
}
