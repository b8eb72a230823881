//! # LABYRINTH Procedural Assembly
//!
//! Builds a walkable maze out of modular sections.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same seed + same catalog always produces the same runs
//! 2. **Welded**: Every section's entry lands exactly on the previous exit
//! 3. **Quota-bound**: No section type is placed more often than its cap
//! 4. **Best-effort**: Configuration problems become diagnostics, never panics
//!
//! ## Core Components
//!
//! - `SectionCatalog`: Start, end, dead-end and the hallway/junction pools
//! - `PlacedSection`: An instantiated section and its frame alignment
//! - `MazeAssembler`: The phase-ordered generation pass
//! - `MazeConfig`: TOML catalog loading
//!
//! ## Example
//!
//! ```rust,ignore
//! use labyrinth_procedural::{MazeAssembler, MazeConfig};
//!
//! let config = MazeConfig::from_file("data/maze/catalog.toml")?;
//! let mut assembler = MazeAssembler::from_config(&config)?;
//!
//! let run = assembler.assemble();
//! assert!(run.is_generated());
//!
//! // Where the player appears
//! let spawn = assembler.spawn_anchor()?;
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod assembler;
mod branch;
pub mod catalog;
pub mod config;
pub mod error;
pub mod geometry;
pub mod placement;
pub mod seed;

pub use assembler::{AssemblyListener, AssemblyPhase, MazeAssembler, MazeRun, MazeSettings};
pub use catalog::{available_types, select, SectionCatalog, SectionCounts, SectionType};
pub use config::{AnchorConfig, GeometryConfig, MazeConfig, SectionConfig, TransformConfig};
pub use error::{AssemblyError, AssemblyResult};
pub use geometry::{AnchorName, ConnectorKind, ConnectorPair, SectionGeometry};
pub use placement::{PlacedSection, SectionHandle, SectionRole};
pub use seed::MazeSeed;
