//! # Section Geometry
//!
//! The placeable asset behind every catalog entry.
//!
//! A geometry is authored in its own local space. It carries the transform a
//! fresh copy is instantiated with, plus a set of named anchors:
//!
//! ```text
//!            C1   C2                 A = entry pair
//!             *---*                  B = exit pair
//!   A1 *      |   |      * B1        C = branch pair (junctions only)
//!      |======+===+======|
//!   A2 *                 * B2
//! ```
//!
//! Connector pairs are read in world space after placement; the spawn anchor
//! is read by the player spawner once generation completes.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use labyrinth_shared::{Transform, Vec3};

/// Named anchor on a section geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AnchorName {
    /// First entry connector point.
    A1,
    /// Second entry connector point.
    A2,
    /// First exit connector point.
    B1,
    /// Second exit connector point.
    B2,
    /// First branch connector point.
    C1,
    /// Second branch connector point.
    C2,
    /// Where the controllable actor appears.
    SpawnPoint,
}

impl AnchorName {
    /// Display name used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A1 => "ConnectionPointA1",
            Self::A2 => "ConnectionPointA2",
            Self::B1 => "ConnectionPointB1",
            Self::B2 => "ConnectionPointB2",
            Self::C1 => "ConnectionPointC1",
            Self::C2 => "ConnectionPointC2",
            Self::SpawnPoint => "SpawnPoint",
        }
    }
}

impl fmt::Display for AnchorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which connector pair of a section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConnectorKind {
    /// `A1`/`A2`: welded onto the previous exit.
    Entry,
    /// `B1`/`B2`: where the next main-sequence section attaches.
    Exit,
    /// `C1`/`C2`: where a junction's dead end attaches.
    Branch,
}

impl ConnectorKind {
    /// The two anchors making up this pair, `p1` first.
    #[must_use]
    pub const fn anchors(self) -> (AnchorName, AnchorName) {
        match self {
            Self::Entry => (AnchorName::A1, AnchorName::A2),
            Self::Exit => (AnchorName::B1, AnchorName::B2),
            Self::Branch => (AnchorName::C1, AnchorName::C2),
        }
    }
}

/// A pair of connector points in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConnectorPair {
    /// The point the next section's `A1` lands on.
    pub p1: Vec3,
    /// Together with `p1`, fixes the direction the next section faces.
    pub p2: Vec3,
}

impl ConnectorPair {
    /// Creates a new pair.
    #[must_use]
    pub const fn new(p1: Vec3, p2: Vec3) -> Self {
        Self { p1, p2 }
    }

    /// `p1 - p2`, the direction used by frame alignment.
    #[must_use]
    pub fn direction(&self) -> Vec3 {
        self.p1 - self.p2
    }
}

/// A placeable modular geometry unit.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionGeometry {
    name: String,
    base: Transform,
    anchors: HashMap<AnchorName, Transform>,
}

impl SectionGeometry {
    /// Creates a geometry with no anchors and an identity base transform.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base: Transform::IDENTITY,
            anchors: HashMap::new(),
        }
    }

    /// Sets the transform a fresh instance starts with.
    #[must_use]
    pub fn with_base(mut self, base: Transform) -> Self {
        self.base = base;
        self
    }

    /// Adds an unrotated anchor at a local position.
    #[must_use]
    pub fn with_anchor(self, name: AnchorName, position: Vec3) -> Self {
        self.with_anchor_transform(name, Transform::from_position(position))
    }

    /// Adds an anchor with a full local transform.
    #[must_use]
    pub fn with_anchor_transform(mut self, name: AnchorName, local: Transform) -> Self {
        self.anchors.insert(name, local);
        self
    }

    /// Adds both anchors of a connector pair.
    #[must_use]
    pub fn with_connector(self, kind: ConnectorKind, p1: Vec3, p2: Vec3) -> Self {
        let (a, b) = kind.anchors();
        self.with_anchor(a, p1).with_anchor(b, p2)
    }

    /// Geometry name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Default instantiation transform.
    #[must_use]
    pub const fn base(&self) -> Transform {
        self.base
    }

    /// Local transform of a named anchor, if authored.
    #[must_use]
    pub fn anchor(&self, name: AnchorName) -> Option<&Transform> {
        self.anchors.get(&name)
    }

    /// Returns true if both anchors of `kind` are authored.
    #[must_use]
    pub fn has_connector(&self, kind: ConnectorKind) -> bool {
        let (a, b) = kind.anchors();
        self.anchors.contains_key(&a) && self.anchors.contains_key(&b)
    }
}
