//! # LABYRINTH
//!
//! The main game crate, hosting maze assembly inside a play session.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        GAME SESSION                          │
//! │                                                              │
//! │  ┌──────────────────┐  placed   ┌──────────────────┐         │
//! │  │  MazeAssembler   │──────────>│      Scene       │         │
//! │  │  (procedural)    │ sections  │  (SceneObjects)  │         │
//! │  └────────┬─────────┘           └──────────────────┘         │
//! │           │ spawn anchor                                     │
//! │           v                                                  │
//! │  ┌──────────────────┐           ┌──────────────────┐         │
//! │  │  PlayerSpawner   │──────────>│      Actor       │         │
//! │  └──────────────────┘           └──────────────────┘         │
//! │                                                              │
//! │  request_reset() ── 4s timer ──> clear, assemble, respawn    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `error`: Session error type
//! - `scene`: Instantiated sections
//! - `spawner`: Player placement
//! - `session`: Start, reset and regeneration

pub mod error;
pub mod scene;
pub mod session;
pub mod spawner;

// Re-export the units
pub use labyrinth_procedural as procedural;
pub use labyrinth_shared as shared;

// Re-export commonly used types
pub use error::{SessionError, SessionResult};
pub use scene::{Scene, SceneObject, SceneObjectId};
pub use session::{GameSession, SessionConfig};
pub use spawner::{Actor, PlayerSpawner};
