//! # Catalog Configuration
//!
//! Catalogs live in external TOML files, loaded once at startup.
//!
//! ```toml
//! seed = 42
//! number_of_tjunctions = 2
//! maze_length = 20
//!
//! [[geometry]]
//! name = "hallway_straight"
//! anchors = [
//!   { name = "A1", position = [-1.0, 0.0, 0.0] },
//!   { name = "A2", position = [1.0, 0.0, 0.0] },
//!   { name = "B1", position = [-1.0, 0.0, 4.0] },
//!   { name = "B2", position = [1.0, 0.0, 4.0] },
//! ]
//!
//! [[hallways]]
//! geometry = "hallway_straight"
//! max_appearances = 8
//! ```
//!
//! A missing `start`, `end` or `dead_end` table loads fine and shows up as a
//! run diagnostic. A reference to an undefined geometry does not load.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::Deserialize;

use labyrinth_shared::{
    Quaternion, Transform, Vec3, DEFAULT_MAZE_LENGTH, DEFAULT_NUMBER_OF_TJUNCTIONS, MIN_MAZE_LENGTH,
    UNLIMITED_APPEARANCES,
};

use crate::assembler::{MazeAssembler, MazeSettings};
use crate::catalog::{SectionCatalog, SectionType};
use crate::error::{AssemblyError, AssemblyResult};
use crate::geometry::{AnchorName, SectionGeometry};
use crate::seed::MazeSeed;

/// A transform as authored in TOML. Rotation is `[x, y, z, w]`.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TransformConfig {
    /// Position, default origin.
    #[serde(default)]
    pub position: [f32; 3],
    /// Rotation quaternion, default identity.
    #[serde(default)]
    pub rotation: Option<[f32; 4]>,
    /// Uniform scale, default 1.
    #[serde(default)]
    pub scale: Option<f32>,
}

impl TransformConfig {
    /// Converts to a runtime transform.
    #[must_use]
    pub fn to_transform(&self) -> Transform {
        Transform::new(
            Vec3::from_array(self.position),
            self.rotation
                .map_or(Quaternion::IDENTITY, |r| Quaternion::from_array(r).normalize()),
            self.scale.unwrap_or(1.0),
        )
    }
}

/// One named anchor.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AnchorConfig {
    /// Which anchor.
    pub name: AnchorName,
    /// Local position.
    #[serde(default)]
    pub position: [f32; 3],
    /// Local rotation `[x, y, z, w]`.
    #[serde(default)]
    pub rotation: Option<[f32; 4]>,
}

/// One geometry definition.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GeometryConfig {
    /// Unique name referenced by section entries.
    pub name: String,
    /// Default instantiation transform.
    #[serde(default)]
    pub base: TransformConfig,
    /// Named anchors in local space.
    #[serde(default)]
    pub anchors: Vec<AnchorConfig>,
}

impl GeometryConfig {
    /// Builds the runtime geometry.
    #[must_use]
    pub fn to_geometry(&self) -> SectionGeometry {
        self.anchors.iter().fold(
            SectionGeometry::new(self.name.clone()).with_base(self.base.to_transform()),
            |geometry, anchor| {
                let local = TransformConfig {
                    position: anchor.position,
                    rotation: anchor.rotation,
                    scale: None,
                };
                geometry.with_anchor_transform(anchor.name, local.to_transform())
            },
        )
    }
}

/// A catalog entry referencing a geometry by name.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SectionConfig {
    /// Geometry name.
    pub geometry: String,
    /// Quota per run; absent means unlimited.
    #[serde(default)]
    pub max_appearances: Option<u32>,
}

/// A full maze configuration file.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MazeConfig {
    /// Fixed seed; absent means a fresh one per assembler.
    #[serde(default)]
    pub seed: Option<u64>,
    /// T-junctions placed after the start.
    #[serde(default = "default_number_of_tjunctions")]
    pub number_of_tjunctions: u32,
    /// Main-sequence length, start and end included.
    #[serde(default = "default_maze_length")]
    pub maze_length: u32,
    /// Geometry definitions.
    #[serde(default, rename = "geometry")]
    pub geometries: Vec<GeometryConfig>,
    /// Start section.
    #[serde(default)]
    pub start: Option<SectionConfig>,
    /// End section.
    #[serde(default)]
    pub end: Option<SectionConfig>,
    /// Dead-end section for junction branches.
    #[serde(default)]
    pub dead_end: Option<SectionConfig>,
    /// Filler pool.
    #[serde(default)]
    pub hallways: Vec<SectionConfig>,
    /// T-junction pool.
    #[serde(default)]
    pub junctions: Vec<SectionConfig>,
}

const fn default_number_of_tjunctions() -> u32 {
    DEFAULT_NUMBER_OF_TJUNCTIONS
}

const fn default_maze_length() -> u32 {
    DEFAULT_MAZE_LENGTH
}

impl MazeConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(source: &str) -> AssemblyResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> AssemblyResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        tracing::info!("Loaded maze catalog from {}", path.display());
        Self::from_toml_str(&source)
    }

    /// Maze shape.
    #[must_use]
    pub const fn settings(&self) -> MazeSettings {
        MazeSettings {
            number_of_tjunctions: self.number_of_tjunctions,
            maze_length: self.maze_length,
        }
    }

    /// Checks the parts a run cannot recover from.
    pub fn validate(&self) -> AssemblyResult<()> {
        if self.maze_length < MIN_MAZE_LENGTH {
            return Err(AssemblyError::InvalidConfig(format!(
                "maze_length must be at least {MIN_MAZE_LENGTH}, got {}",
                self.maze_length
            )));
        }

        let mut seen = HashSet::new();
        for geometry in &self.geometries {
            if !seen.insert(geometry.name.as_str()) {
                return Err(AssemblyError::InvalidConfig(format!(
                    "geometry '{}' is defined more than once",
                    geometry.name
                )));
            }
        }

        for (label, section) in self.single_sections() {
            if section.max_appearances == Some(0) {
                return Err(AssemblyError::InvalidConfig(format!(
                    "{label} section must allow at least one appearance"
                )));
            }
        }

        for section in self.all_sections() {
            if !seen.contains(section.geometry.as_str()) {
                return Err(AssemblyError::UnknownGeometry(section.geometry.clone()));
            }
        }
        Ok(())
    }

    /// Builds the runtime catalog.
    pub fn build_catalog(&self) -> AssemblyResult<SectionCatalog> {
        self.validate()?;

        let geometries: HashMap<&str, SectionGeometry> = self
            .geometries
            .iter()
            .map(|g| (g.name.as_str(), g.to_geometry()))
            .collect();

        let resolve = |section: &SectionConfig| -> AssemblyResult<SectionType> {
            let geometry = geometries
                .get(section.geometry.as_str())
                .cloned()
                .ok_or_else(|| AssemblyError::UnknownGeometry(section.geometry.clone()))?;
            Ok(SectionType::with_quota(
                geometry,
                section.max_appearances.unwrap_or(UNLIMITED_APPEARANCES),
            ))
        };

        Ok(SectionCatalog {
            start: self.start.as_ref().map(&resolve).transpose()?,
            end: self.end.as_ref().map(&resolve).transpose()?,
            dead_end: self.dead_end.as_ref().map(&resolve).transpose()?,
            hallways: self.hallways.iter().map(&resolve).collect::<AssemblyResult<_>>()?,
            junctions: self.junctions.iter().map(&resolve).collect::<AssemblyResult<_>>()?,
        })
    }

    fn single_sections(&self) -> impl Iterator<Item = (&'static str, &SectionConfig)> {
        [("start", &self.start), ("end", &self.end), ("dead-end", &self.dead_end)]
            .into_iter()
            .filter_map(|(label, section)| section.as_ref().map(|s| (label, s)))
    }

    fn all_sections(&self) -> impl Iterator<Item = &SectionConfig> {
        self.single_sections()
            .map(|(_, section)| section)
            .chain(&self.hallways)
            .chain(&self.junctions)
    }
}

impl MazeAssembler {
    /// Builds an assembler from a loaded configuration.
    ///
    /// Uses the configured seed, or a fresh one when none is pinned.
    pub fn from_config(config: &MazeConfig) -> AssemblyResult<Self> {
        let catalog = config.build_catalog()?;
        let seed = config.seed.map_or_else(MazeSeed::from_entropy, MazeSeed::new);
        Ok(Self::new(catalog, config.settings(), seed))
    }
}
