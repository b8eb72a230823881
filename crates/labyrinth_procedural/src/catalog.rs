//! # Section Catalog & Quota Tracking
//!
//! The catalog is immutable once built. Usage counts live on the run, so two
//! runs never share quota.
//!
//! Each pool (hallways, junctions, dead ends) is tracked and drawn from
//! separately: listing the same geometry in two pools gives it two quotas.

use std::sync::Arc;

use rand::Rng;

use labyrinth_shared::UNLIMITED_APPEARANCES;

use crate::geometry::SectionGeometry;
use crate::placement::SectionRole;

/// Immutable catalog entry.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionType {
    /// The placeable asset.
    pub geometry: Arc<SectionGeometry>,
    /// Placements allowed per run.
    pub max_appearances: u32,
}

impl SectionType {
    /// Entry with no appearance cap.
    #[must_use]
    pub fn unlimited(geometry: SectionGeometry) -> Self {
        Self::with_quota(geometry, UNLIMITED_APPEARANCES)
    }

    /// Entry allowed at most `max_appearances` times per run.
    #[must_use]
    pub fn with_quota(geometry: SectionGeometry, max_appearances: u32) -> Self {
        Self {
            geometry: Arc::new(geometry),
            max_appearances,
        }
    }

    /// Geometry name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.geometry.name()
    }
}

/// Everything the assembler may place.
#[derive(Clone, Debug, Default)]
pub struct SectionCatalog {
    /// First section, placed at the origin.
    pub start: Option<SectionType>,
    /// Last section of the main sequence.
    pub end: Option<SectionType>,
    /// Attached to every junction's branch connector.
    pub dead_end: Option<SectionType>,
    /// Filler pool.
    pub hallways: Vec<SectionType>,
    /// T-junction pool.
    pub junctions: Vec<SectionType>,
}

impl SectionCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start section.
    #[must_use]
    pub fn with_start(mut self, start: SectionType) -> Self {
        self.start = Some(start);
        self
    }

    /// Sets the end section.
    #[must_use]
    pub fn with_end(mut self, end: SectionType) -> Self {
        self.end = Some(end);
        self
    }

    /// Sets the dead-end section.
    #[must_use]
    pub fn with_dead_end(mut self, dead_end: SectionType) -> Self {
        self.dead_end = Some(dead_end);
        self
    }

    /// Adds a hallway to the filler pool.
    #[must_use]
    pub fn with_hallway(mut self, hallway: SectionType) -> Self {
        self.hallways.push(hallway);
        self
    }

    /// Adds a T-junction to the junction pool.
    #[must_use]
    pub fn with_junction(mut self, junction: SectionType) -> Self {
        self.junctions.push(junction);
        self
    }
}

/// Per-run usage counts, one slot per catalog entry.
///
/// Reset to zero at the start of every run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SectionCounts {
    start: u32,
    end: u32,
    dead_end: u32,
    hallways: Vec<u32>,
    junctions: Vec<u32>,
}

impl SectionCounts {
    /// Zeroed counts sized for `catalog`.
    #[must_use]
    pub fn for_catalog(catalog: &SectionCatalog) -> Self {
        Self {
            start: 0,
            end: 0,
            dead_end: 0,
            hallways: vec![0; catalog.hallways.len()],
            junctions: vec![0; catalog.junctions.len()],
        }
    }

    /// Times the entry at (`role`, `index`) was placed this run.
    #[must_use]
    pub fn count(&self, role: SectionRole, index: usize) -> u32 {
        match role {
            SectionRole::Start if index == 0 => self.start,
            SectionRole::End if index == 0 => self.end,
            SectionRole::DeadEnd if index == 0 => self.dead_end,
            SectionRole::Hallway => self.hallways.get(index).copied().unwrap_or(0),
            SectionRole::Junction => self.junctions.get(index).copied().unwrap_or(0),
            _ => 0,
        }
    }

    /// Counts one placement of a single-entry pool (start, end, dead end)
    /// if its quota allows it.
    pub(crate) fn claim(&mut self, role: SectionRole, section: &SectionType) -> bool {
        let slot = &mut self.pool_mut(role)[0];
        if *slot < section.max_appearances {
            *slot += 1;
            true
        } else {
            false
        }
    }

    /// Mutable slot(s) backing the pool for `role`.
    pub(crate) fn pool_mut(&mut self, role: SectionRole) -> &mut [u32] {
        match role {
            SectionRole::Start => std::slice::from_mut(&mut self.start),
            SectionRole::End => std::slice::from_mut(&mut self.end),
            SectionRole::DeadEnd => std::slice::from_mut(&mut self.dead_end),
            SectionRole::Hallway => &mut self.hallways,
            SectionRole::Junction => &mut self.junctions,
        }
    }
}

/// Indices of every entry in `pool` whose count is still under its quota.
#[must_use]
pub fn available_types(pool: &[SectionType], counts: &[u32]) -> Vec<usize> {
    pool.iter()
        .zip(counts)
        .enumerate()
        .filter(|(_, (section, count))| **count < section.max_appearances)
        .map(|(index, _)| index)
        .collect()
}

/// Draws uniformly among the available entries and counts the draw.
///
/// Returns `None` once the pool is exhausted. That is a normal terminal
/// condition for the calling phase, not an error.
pub fn select<R: Rng + ?Sized>(
    pool: &[SectionType],
    counts: &mut [u32],
    rng: &mut R,
) -> Option<usize> {
    let available = available_types(pool, counts);
    if available.is_empty() {
        return None;
    }
    let chosen = available[rng.gen_range(0..available.len())];
    counts[chosen] += 1;
    Some(chosen)
}
