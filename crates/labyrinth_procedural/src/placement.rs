//! # Placed Sections & Frame Alignment
//!
//! A `PlacedSection` is one instantiated catalog entry with a world transform.
//!
//! ## Alignment
//!
//! Given a target pair `(E1, E2)` and the section's entry pair `(A1, A2)`:
//!
//! 1. translate by `E1 - A1`
//! 2. rotate about the section pivot by the minimal rotation taking
//!    `A1 - A2` onto `E1 - E2`
//! 3. translate by `E1 - A1'` to undo the drift from rotating about the pivot
//!
//! `A1` ends up on `E1` and the entry direction matches the target direction.
//! Roll about that direction is not constrained: whatever roll the geometry
//! was authored with is what the placed section keeps.

use std::fmt;
use std::sync::Arc;

use labyrinth_shared::{Quaternion, Transform, Vec3};

use crate::error::{AssemblyError, AssemblyResult};
use crate::geometry::{AnchorName, ConnectorKind, ConnectorPair, SectionGeometry};

/// What a section is for within the maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SectionRole {
    /// First section of the main sequence.
    Start,
    /// T-junction on the main sequence.
    Junction,
    /// Filler on the main sequence.
    Hallway,
    /// Last section of the main sequence.
    End,
    /// Branch hanging off a junction.
    DeadEnd,
}

impl SectionRole {
    /// Returns true for roles that extend the main sequence.
    #[must_use]
    pub const fn is_main_sequence(self) -> bool {
        !matches!(self, Self::DeadEnd)
    }

    /// Lowercase name used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Junction => "T-junction",
            Self::Hallway => "hallway",
            Self::End => "end",
            Self::DeadEnd => "dead end",
        }
    }
}

impl fmt::Display for SectionRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable handle to a section within one run (placement order).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionHandle(pub usize);

/// One instantiated section.
#[derive(Clone, Debug)]
pub struct PlacedSection {
    handle: SectionHandle,
    role: SectionRole,
    catalog_index: usize,
    geometry: Arc<SectionGeometry>,
    transform: Transform,
    aligned: bool,
    parent: Option<SectionHandle>,
}

impl PlacedSection {
    /// Instantiates `geometry` at its default transform.
    #[must_use]
    pub fn instantiate(
        handle: SectionHandle,
        role: SectionRole,
        catalog_index: usize,
        geometry: Arc<SectionGeometry>,
    ) -> Self {
        let transform = geometry.base();
        Self {
            handle,
            role,
            catalog_index,
            geometry,
            transform,
            aligned: false,
            parent: None,
        }
    }

    /// Marks this section as a branch of `junction`.
    #[must_use]
    pub fn with_parent(mut self, junction: SectionHandle) -> Self {
        self.parent = Some(junction);
        self
    }

    /// Handle within the run.
    #[must_use]
    pub const fn handle(&self) -> SectionHandle {
        self.handle
    }

    /// Role within the maze.
    #[must_use]
    pub const fn role(&self) -> SectionRole {
        self.role
    }

    /// Index of the catalog entry within its pool.
    #[must_use]
    pub const fn catalog_index(&self) -> usize {
        self.catalog_index
    }

    /// The instantiated geometry.
    #[must_use]
    pub fn geometry(&self) -> &SectionGeometry {
        &self.geometry
    }

    /// Geometry name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.geometry.name()
    }

    /// World transform.
    #[must_use]
    pub const fn transform(&self) -> Transform {
        self.transform
    }

    /// Moves the section without touching its orientation.
    pub fn set_position(&mut self, position: Vec3) {
        self.transform.position = position;
    }

    /// Whether `align_to` succeeded on this section.
    #[must_use]
    pub const fn is_aligned(&self) -> bool {
        self.aligned
    }

    /// The junction this branch hangs off, if any.
    #[must_use]
    pub const fn parent(&self) -> Option<SectionHandle> {
        self.parent
    }

    /// World position of a named anchor.
    #[must_use]
    pub fn anchor_position(&self, name: AnchorName) -> Option<Vec3> {
        self.geometry
            .anchor(name)
            .map(|local| self.transform.transform_point(local.position))
    }

    /// World position and orientation of a named anchor.
    #[must_use]
    pub fn anchor_transform(&self, name: AnchorName) -> Option<Transform> {
        self.geometry
            .anchor(name)
            .map(|local| self.transform.mul_transform(local))
    }

    /// World-space connector pair, or the first anchor that is missing.
    pub fn connector(&self, kind: ConnectorKind) -> AssemblyResult<ConnectorPair> {
        let (first, second) = kind.anchors();
        let p1 = self.require(first)?;
        let p2 = self.require(second)?;
        Ok(ConnectorPair::new(p1, p2))
    }

    fn require(&self, anchor: AnchorName) -> AssemblyResult<Vec3> {
        self.anchor_position(anchor)
            .ok_or_else(|| AssemblyError::MissingConnector {
                section: self.name().to_owned(),
                anchor,
            })
    }

    /// Welds this section's entry pair onto `target`.
    ///
    /// The entry pair is resolved before anything moves; on error the section
    /// keeps its current transform.
    pub fn align_to(&mut self, target: ConnectorPair) -> AssemblyResult<()> {
        let entry = self.connector(ConnectorKind::Entry)?;

        // Translate A1 onto E1
        self.transform.position += target.p1 - entry.p1;

        // Rotate about the pivot so A1->A2 follows E1->E2
        let rotation = Quaternion::from_rotation_arc(entry.direction(), target.direction());
        self.transform.rotation = (rotation * self.transform.rotation).normalize();

        // Re-weld A1 after the pivot rotation moved it
        let drifted = self.require(AnchorName::A1)?;
        self.transform.position += target.p1 - drifted;

        self.aligned = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use labyrinth_shared::ALIGNMENT_TOLERANCE;
    use std::f32::consts::FRAC_PI_2;

    fn hallway() -> Arc<SectionGeometry> {
        Arc::new(
            SectionGeometry::new("hallway")
                .with_connector(
                    ConnectorKind::Entry,
                    Vec3::new(-1.0, 0.0, 0.0),
                    Vec3::new(1.0, 0.0, 0.0),
                )
                .with_connector(
                    ConnectorKind::Exit,
                    Vec3::new(-1.0, 0.0, 4.0),
                    Vec3::new(1.0, 0.0, 4.0),
                ),
        )
    }

    #[test]
    fn test_straight_weld_is_translation() {
        let mut section =
            PlacedSection::instantiate(SectionHandle(1), SectionRole::Hallway, 0, hallway());
        let target = ConnectorPair::new(Vec3::new(-1.0, 0.0, 4.0), Vec3::new(1.0, 0.0, 4.0));

        section.align_to(target).unwrap();

        assert!(section.is_aligned());
        assert!(section
            .transform()
            .position
            .abs_diff_eq(Vec3::new(0.0, 0.0, 4.0), ALIGNMENT_TOLERANCE));
        assert!((section.transform().rotation * Vec3::Z).abs_diff_eq(Vec3::Z, 1e-4));
        let exit = section.connector(ConnectorKind::Exit).unwrap();
        assert!(exit.p1.abs_diff_eq(Vec3::new(-1.0, 0.0, 8.0), ALIGNMENT_TOLERANCE));
    }

    #[test]
    fn test_turning_weld_lands_a1_on_e1() {
        // A right-hand exit: the next section should run along +X.
        let target = ConnectorPair::new(Vec3::new(1.0, 0.0, 3.0), Vec3::new(1.0, 0.0, 1.0));
        let mut section =
            PlacedSection::instantiate(SectionHandle(1), SectionRole::DeadEnd, 0, hallway());

        section.align_to(target).unwrap();

        let a1 = section.anchor_position(AnchorName::A1).unwrap();
        let a2 = section.anchor_position(AnchorName::A2).unwrap();
        assert!(a1.abs_diff_eq(target.p1, ALIGNMENT_TOLERANCE));
        assert!(a2.abs_diff_eq(target.p2, ALIGNMENT_TOLERANCE));

        let forward = section.transform().rotation * Vec3::Z;
        assert!(forward.abs_diff_eq(Vec3::X, 1e-4));
    }

    #[test]
    fn test_weld_respects_offset_pivot_and_base_rotation() {
        let geometry = Arc::new(
            SectionGeometry::new("skewed")
                .with_base(Transform::new(
                    Vec3::new(5.0, 2.0, -3.0),
                    Quaternion::from_axis_angle(Vec3::Y, FRAC_PI_2),
                    1.0,
                ))
                .with_connector(
                    ConnectorKind::Entry,
                    Vec3::new(0.0, 0.0, -2.0),
                    Vec3::new(0.5, 0.0, -2.0),
                ),
        );
        let target = ConnectorPair::new(Vec3::new(10.0, 1.0, 10.0), Vec3::new(10.0, 1.0, 11.0));
        let mut section =
            PlacedSection::instantiate(SectionHandle(0), SectionRole::Hallway, 0, geometry);

        section.align_to(target).unwrap();

        let a1 = section.anchor_position(AnchorName::A1).unwrap();
        let a2 = section.anchor_position(AnchorName::A2).unwrap();
        assert!(a1.abs_diff_eq(target.p1, ALIGNMENT_TOLERANCE));
        let entry_dir = (a1 - a2).normalize_or_zero();
        assert!(entry_dir.abs_diff_eq(target.direction().normalize_or_zero(), 1e-4));
    }

    #[test]
    fn test_missing_entry_leaves_section_unaligned() {
        let geometry = Arc::new(
            SectionGeometry::new("broken")
                .with_base(Transform::from_position(Vec3::new(3.0, 0.0, 0.0)))
                .with_anchor(AnchorName::A1, Vec3::ZERO),
        );
        let mut section =
            PlacedSection::instantiate(SectionHandle(2), SectionRole::Hallway, 0, geometry);
        let before = section.transform();

        let err = section
            .align_to(ConnectorPair::new(Vec3::Z, Vec3::X))
            .unwrap_err();

        assert_eq!(
            err,
            AssemblyError::MissingConnector {
                section: "broken".to_owned(),
                anchor: AnchorName::A2,
            }
        );
        assert_eq!(section.transform(), before);
        assert!(!section.is_aligned());
    }
}
