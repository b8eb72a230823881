//! # Player Spawner
//!
//! Places the controllable actor on the start room's spawn point once a maze
//! has finished assembling.

use labyrinth_procedural::{AssemblyError, MazeAssembler};
use labyrinth_shared::{Transform, PLAYER_TAG};

use crate::error::SessionResult;

/// A spawned actor.
#[derive(Clone, Debug, PartialEq)]
pub struct Actor {
    /// Tag the rest of the game looks the actor up by.
    pub tag: String,
    /// World position and orientation.
    pub transform: Transform,
}

/// Spawns actors at the maze's spawn anchor.
#[derive(Clone, Debug)]
pub struct PlayerSpawner {
    tag: String,
}

impl PlayerSpawner {
    /// Spawner for actors carrying `tag`.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }

    /// Spawns an actor on the latest run's spawn anchor.
    ///
    /// # Errors
    ///
    /// `NotReady` while the assembler has no completed run, or the
    /// assembler's error when the start section or its anchor is missing.
    pub fn spawn(&self, assembler: &MazeAssembler) -> SessionResult<Actor> {
        if !assembler.is_generated() {
            return Err(AssemblyError::NotReady.into());
        }

        let transform = assembler.spawn_anchor()?;
        tracing::info!("Spawned '{}' at {:?}", self.tag, transform.position);

        Ok(Actor {
            tag: self.tag.clone(),
            transform,
        })
    }
}

impl Default for PlayerSpawner {
    fn default() -> Self {
        Self::new(PLAYER_TAG)
    }
}
