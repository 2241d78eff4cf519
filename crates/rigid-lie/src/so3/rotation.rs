use std::fmt;

use glam::{DMat3, DQuat, DVec3, DVec4};
use rand::Rng;

use super::ops::{rot2vec, vec2rot};
use crate::display::write_rows;
use crate::{DVecF64, LieError};

/// A 3D rotation `C_ba`, stored as a 3x3 rotation matrix.
///
/// `C_ba` maps coordinates expressed in frame `a` to coordinates expressed in frame `b`.
///
/// # Important
///
/// Composition and inversion never re-project the result onto SO(3). Long chains of products
/// accumulate round-off; call [`reproject`](Rotation::reproject) when that matters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    c_ba: DMat3,
}

impl Default for Rotation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Rotation {
    /// Dimension of the tangent space.
    pub const DOF: usize = 3;

    /// The identity rotation.
    pub const IDENTITY: Self = Self {
        c_ba: DMat3::IDENTITY,
    };

    /// Create a rotation from a matrix, taken as is.
    /// NOTE: the matrix should be proper orthonormal
    #[inline]
    pub fn from_matrix(c_ba: DMat3) -> Self {
        Self { c_ba }
    }

    /// Create a rotation from a matrix, forcing it onto SO(3) with `vec2rot(rot2vec(C))`.
    pub fn from_matrix_reprojected(c_ba: DMat3) -> Self {
        let mut rotation = Self { c_ba };
        rotation.reproject();
        rotation
    }

    /// Create the rotation `C_ba = vec2rot(aaxis_ab, num_terms)`.
    ///
    /// `num_terms == 0` selects the closed form, see [`vec2rot`](super::vec2rot).
    #[inline]
    pub fn from_axis_angle(aaxis_ab: DVec3, num_terms: u32) -> Self {
        Self {
            c_ba: vec2rot(aaxis_ab, num_terms),
        }
    }

    /// Lie algebra -> Lie group, using the closed-form exponential map.
    #[inline]
    pub fn exp(aaxis_ab: DVec3) -> Self {
        Self::from_axis_angle(aaxis_ab, 0)
    }

    /// Create a rotation from a dynamically-sized axis-angle vector.
    ///
    /// # Errors
    ///
    /// Returns [`LieError::DimensionMismatch`] if `aaxis_ab` does not have exactly 3 elements.
    pub fn try_from_slice(aaxis_ab: &[f64]) -> Result<Self, LieError> {
        LieError::check_dimension(Self::DOF, aaxis_ab.len())?;
        Ok(Self::exp(DVec3::new(aaxis_ab[0], aaxis_ab[1], aaxis_ab[2])))
    }

    /// Sample a rotation uniformly from SO(3).
    ///
    /// Points drawn uniformly inside the unit 4-ball and pushed onto its boundary are uniform on
    /// the unit quaternions, hence on SO(3).
    pub fn from_random() -> Self {
        let mut rng = rand::rng();
        loop {
            let v = DVec4::new(
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
            );
            let norm_sq = v.length_squared();
            if norm_sq > 1.0e-6 && norm_sq <= 1.0 {
                let q = DQuat::from_vec4(v / norm_sq.sqrt());
                return Self {
                    c_ba: DMat3::from_quat(q),
                };
            }
        }
    }

    /// The underlying rotation matrix `C_ba`.
    #[inline]
    pub fn matrix(&self) -> DMat3 {
        self.c_ba
    }

    /// Lie group -> Lie algebra, `aaxis_ab = rot2vec(C_ba)`.
    #[inline]
    pub fn vec(&self) -> DVec3 {
        rot2vec(self.c_ba)
    }

    /// The inverse rotation, i.e. the transpose.
    #[inline]
    pub fn inverse(&self) -> Self {
        Self {
            c_ba: self.c_ba.transpose(),
        }
    }

    /// Right-multiply by `rhs` in place: `C = C * C_rhs`.
    #[inline]
    pub fn compose_in_place(&mut self, rhs: &Self) {
        self.c_ba = self.c_ba * rhs.c_ba;
    }

    /// Right-multiply by `rhs`: returns `C * C_rhs`.
    #[inline]
    pub fn compose(&self, rhs: &Self) -> Self {
        let mut out = *self;
        out.compose_in_place(rhs);
        out
    }

    /// Right-multiply by the inverse of `rhs` in place: `C = C * C_rhsᵀ`.
    #[inline]
    pub fn compose_inverse_in_place(&mut self, rhs: &Self) {
        self.c_ba = self.c_ba * rhs.c_ba.transpose();
    }

    /// Right-multiply by the inverse of `rhs`: returns `C * C_rhsᵀ`.
    #[inline]
    pub fn compose_inverse(&self, rhs: &Self) -> Self {
        let mut out = *self;
        out.compose_inverse_in_place(rhs);
        out
    }

    /// Rotate a point: `p_b = C_ba * p_a`.
    #[inline]
    pub fn transform(&self, p_a: DVec3) -> DVec3 {
        self.c_ba * p_a
    }

    /// Force the matrix back onto SO(3) with an exponential/logarithm round trip.
    pub fn reproject(&mut self) {
        self.c_ba = vec2rot(rot2vec(self.c_ba), 0);
    }
}

impl TryFrom<&[f64]> for Rotation {
    type Error = LieError;

    fn try_from(aaxis_ab: &[f64]) -> Result<Self, Self::Error> {
        Self::try_from_slice(aaxis_ab)
    }
}

impl TryFrom<&DVecF64> for Rotation {
    type Error = LieError;

    fn try_from(aaxis_ab: &DVecF64) -> Result<Self, Self::Error> {
        Self::try_from_slice(aaxis_ab.as_slice())
    }
}

impl From<Rotation> for DMat3 {
    fn from(rotation: Rotation) -> Self {
        rotation.c_ba
    }
}

impl std::ops::Mul<Rotation> for Rotation {
    type Output = Rotation;

    fn mul(self, rhs: Self) -> Self::Output {
        self.compose(&rhs)
    }
}

impl std::ops::MulAssign<Rotation> for Rotation {
    #[inline]
    fn mul_assign(&mut self, rhs: Rotation) {
        self.compose_in_place(&rhs);
    }
}

impl std::ops::Mul<DVec3> for Rotation {
    type Output = DVec3;

    fn mul(self, rhs: DVec3) -> Self::Output {
        self.transform(rhs)
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = [
            self.c_ba.row(0).to_array(),
            self.c_ba.row(1).to_array(),
            self.c_ba.row(2).to_array(),
        ];
        write_rows(f, &rows)
    }
}

#[cfg(any(test, feature = "approx"))]
impl approx::AbsDiffEq for Rotation {
    type Epsilon = f64;

    #[inline]
    fn default_epsilon() -> Self::Epsilon {
        <f64 as approx::AbsDiffEq>::default_epsilon()
    }

    #[inline]
    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.c_ba
            .to_cols_array()
            .iter()
            .zip(other.c_ba.to_cols_array().iter())
            .all(|(a, b)| approx::AbsDiffEq::abs_diff_eq(a, b, epsilon))
    }
}

#[cfg(any(test, feature = "approx"))]
impl approx::RelativeEq for Rotation {
    #[inline]
    fn default_max_relative() -> Self::Epsilon {
        <f64 as approx::RelativeEq>::default_max_relative()
    }

    #[inline]
    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.c_ba
            .to_cols_array()
            .iter()
            .zip(other.c_ba.to_cols_array().iter())
            .all(|(a, b)| approx::RelativeEq::relative_eq(a, b, epsilon, max_relative))
    }
}
