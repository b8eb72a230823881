//! Mathematical types shared between the generator and its host.
//!
//! Right-handed, Y-up. Rotations are unit quaternions; `a * b` applies `b` first.

use serde::{Deserialize, Serialize};

use crate::constants::DIRECTION_EPSILON;

/// 3D Vector - position, direction, offset
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
}

impl Vec3 {
    /// Creates a new Vec3
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Zero vector
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Unit X vector
    pub const X: Self = Self::new(1.0, 0.0, 0.0);

    /// Unit Y vector
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);

    /// Unit Z vector
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    /// Creates from array
    #[must_use]
    pub const fn from_array(arr: [f32; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }

    /// Dot product
    #[must_use]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product (right-handed)
    #[must_use]
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Length squared (avoids sqrt)
    #[must_use]
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    /// Length
    #[must_use]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Unit vector in the same direction, or `ZERO` for degenerate input.
    #[must_use]
    pub fn normalize_or_zero(self) -> Self {
        let len = self.length();
        if len <= DIRECTION_EPSILON {
            Self::ZERO
        } else {
            self * (1.0 / len)
        }
    }

    /// Returns true if every component is within `tolerance` of `other`.
    #[must_use]
    pub fn abs_diff_eq(self, other: Self, tolerance: f32) -> bool {
        (self.x - other.x).abs() <= tolerance
            && (self.y - other.y).abs() <= tolerance
            && (self.z - other.z).abs() <= tolerance
    }
}

impl std::ops::Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl std::ops::AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl std::ops::Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl std::ops::Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

/// Quaternion for rotations
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
    /// W component
    pub w: f32,
}

impl Quaternion {
    /// Creates a new quaternion
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Identity rotation
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Creates from `[x, y, z, w]`
    #[must_use]
    pub const fn from_array(arr: [f32; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }

    /// Rotation of `angle` radians about `axis` (right-hand rule).
    ///
    /// A degenerate axis yields the identity.
    #[must_use]
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let axis = axis.normalize_or_zero();
        if axis == Vec3::ZERO {
            return Self::IDENTITY;
        }
        let (sin, cos) = (angle * 0.5).sin_cos();
        Self::new(axis.x * sin, axis.y * sin, axis.z * sin, cos)
    }

    /// Minimal rotation taking direction `from` onto direction `to`.
    ///
    /// The rotation is about `from × to` by the angle between the two. Parallel or
    /// degenerate inputs give the identity. Antiparallel inputs give a half turn
    /// about an axis orthogonal to `from`: world up projected off `from` when that
    /// is usable, otherwise world X. Roll about `to` is left unconstrained.
    #[must_use]
    pub fn from_rotation_arc(from: Vec3, to: Vec3) -> Self {
        let from = from.normalize_or_zero();
        let to = to.normalize_or_zero();
        if from == Vec3::ZERO || to == Vec3::ZERO {
            return Self::IDENTITY;
        }

        let d = from.dot(to);
        if d >= 1.0 - DIRECTION_EPSILON {
            return Self::IDENTITY;
        }
        if d <= -1.0 + DIRECTION_EPSILON {
            let mut axis = (Vec3::Y - from * from.dot(Vec3::Y)).normalize_or_zero();
            if axis == Vec3::ZERO {
                axis = (Vec3::X - from * from.dot(Vec3::X)).normalize_or_zero();
            }
            return Self::new(axis.x, axis.y, axis.z, 0.0);
        }

        // Half-way form: (from × to, 1 + from·to), normalized, is the rotation
        // about the cross axis by acos(from·to).
        let c = from.cross(to);
        Self::new(c.x, c.y, c.z, 1.0 + d).normalize()
    }

    /// Length of the 4-vector
    #[must_use]
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt()
    }

    /// Unit quaternion, or the identity if degenerate
    #[must_use]
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len <= DIRECTION_EPSILON {
            return Self::IDENTITY;
        }
        let inv = 1.0 / len;
        Self::new(self.x * inv, self.y * inv, self.z * inv, self.w * inv)
    }

    /// Rotates a vector
    #[must_use]
    pub fn rotate(self, v: Vec3) -> Vec3 {
        let q = Vec3::new(self.x, self.y, self.z);
        let t = q.cross(v) * 2.0;
        v + t * self.w + q.cross(t)
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl std::ops::Mul for Quaternion {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        )
    }
}

impl std::ops::Mul<Vec3> for Quaternion {
    type Output = Vec3;
    fn mul(self, rhs: Vec3) -> Vec3 {
        self.rotate(rhs)
    }
}

/// Transform - position + rotation + scale
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Position
    pub position: Vec3,
    /// Scale (uniform)
    pub scale: f32,
    /// Rotation
    pub rotation: Quaternion,
}

impl Transform {
    /// Creates a new transform
    #[must_use]
    pub const fn new(position: Vec3, rotation: Quaternion, scale: f32) -> Self {
        Self { position, scale, rotation }
    }

    /// Identity transform
    pub const IDENTITY: Self = Self::new(Vec3::ZERO, Quaternion::IDENTITY, 1.0);

    /// Unrotated, unscaled transform at `position`
    #[must_use]
    pub const fn from_position(position: Vec3) -> Self {
        Self::new(position, Quaternion::IDENTITY, 1.0)
    }

    /// Maps a point from local space into the space this transform lives in.
    #[must_use]
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation * (local * self.scale)
    }

    /// Maps a local orientation into the space this transform lives in.
    #[must_use]
    pub fn transform_rotation(&self, local: Quaternion) -> Quaternion {
        (self.rotation * local).normalize()
    }

    /// Composes `self` (parent) with `child`, giving the child's world transform.
    #[must_use]
    pub fn mul_transform(&self, child: &Self) -> Self {
        Self::new(
            self.transform_point(child.position),
            self.transform_rotation(child.rotation),
            self.scale * child.scale,
        )
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
