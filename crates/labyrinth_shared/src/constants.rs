//! # Generation Constants
//!
//! Defaults shared by the catalog loader, the assembler and the host session.

// =============================================================================
// MAZE SHAPE
// =============================================================================

/// Default number of T-junctions placed right after the start section.
pub const DEFAULT_NUMBER_OF_TJUNCTIONS: u32 = 2;

/// Default main-sequence length, start and end included.
pub const DEFAULT_MAZE_LENGTH: u32 = 20;

/// Smallest meaningful maze: a start section welded to an end section.
pub const MIN_MAZE_LENGTH: u32 = 2;

/// Quota value meaning "no cap".
pub const UNLIMITED_APPEARANCES: u32 = u32::MAX;

// =============================================================================
// ALIGNMENT
// =============================================================================

/// Maximum distance between a welded entry anchor and the exit it was aligned onto.
pub const ALIGNMENT_TOLERANCE: f32 = 1e-4;

/// Vectors shorter than this are treated as degenerate directions.
pub const DIRECTION_EPSILON: f32 = 1e-6;

// =============================================================================
// SESSION
// =============================================================================

/// Seconds between a reset request and the regenerated maze.
pub const RESET_DELAY_SECS: f32 = 4.0;

/// Tag carried by the controllable actor.
pub const PLAYER_TAG: &str = "Player";
