use std::fmt;

use glam::{DMat3, DMat4, DVec3, DVec4};
use rand::Rng;

use super::ops::{tran2vec, tran_ad, vec2tran};
use crate::display::write_rows;
use crate::{DVecF64, LieError, Mat6F64, Rotation, Vec6F64};

/// Default bound on `|1 - det(C)|` above which a conditional re-projection is performed.
pub const DEFAULT_DETERMINANT_TOLERANCE: f64 = 1.0e-6;

/// Policy for mapping the rotation block of a [`Transformation`] back onto SO(3).
///
/// Re-projection costs an exponential/logarithm round trip, so by default it only happens once
/// the determinant of the rotation block has drifted noticeably.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reprojection {
    /// Re-project only if `|1 - det(C)| > tolerance`.
    Conditional {
        /// Largest accepted deviation of the determinant from one.
        tolerance: f64,
    },
    /// Always re-project.
    Forced,
}

impl Default for Reprojection {
    fn default() -> Self {
        Self::Conditional {
            tolerance: DEFAULT_DETERMINANT_TOLERANCE,
        }
    }
}

impl Reprojection {
    /// Whether this policy requires re-projecting the rotation matrix `c_ba`.
    pub fn is_required(&self, c_ba: DMat3) -> bool {
        match *self {
            Self::Forced => true,
            Self::Conditional { tolerance } => (1.0 - c_ba.determinant()).abs() > tolerance,
        }
    }
}

/// A 3D rigid-body transformation `T_ba = [C_ba, r_ab_inb; 0ᵀ, 1]`.
///
/// `r_ab_inb` is the position of the origin of frame `a` relative to frame `b`, expressed in
/// frame `b`.
///
/// Every composition and inversion ends with a conditional re-projection of the rotation block
/// (see [`Reprojection`]); the `*_with` variants take the policy explicitly. The translation is
/// never re-projected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transformation {
    rotation: Rotation,
    r_ab_inb: DVec3,
}

impl Default for Transformation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transformation {
    /// Dimension of the tangent space.
    pub const DOF: usize = 6;

    /// The identity transformation.
    pub const IDENTITY: Self = Self {
        rotation: Rotation::IDENTITY,
        r_ab_inb: DVec3::ZERO,
    };

    /// Create a transformation from a rotation and the translation `r_ab_inb`.
    ///
    /// The rotation is conditionally re-projected.
    pub fn new(rotation: Rotation, r_ab_inb: DVec3) -> Self {
        let mut out = Self { rotation, r_ab_inb };
        out.reproject(Reprojection::default());
        out
    }

    /// Create a transformation from a rotation and the "forward" translation `r_ba_ina`.
    ///
    /// The stored translation is `r_ab_inb = -C_ba * r_ba_ina`, computed after the rotation has
    /// been conditionally re-projected.
    pub fn from_forward_translation(rotation: Rotation, r_ba_ina: DVec3) -> Self {
        let mut out = Self::new(rotation, DVec3::ZERO);
        out.r_ab_inb = -out.rotation.transform(r_ba_ina);
        out
    }

    /// Create a transformation from a 4x4 homogeneous matrix.
    ///
    /// The bottom row is ignored and the rotation block is conditionally re-projected.
    pub fn from_matrix(t_ba: DMat4) -> Self {
        Self::new(
            Rotation::from_matrix(DMat3::from_mat4(t_ba)),
            t_ba.w_axis.truncate(),
        )
    }

    /// Create the transformation `T_ba = vec2tran(xi_ab, num_terms)`.
    pub fn from_twist(xi_ab: &Vec6F64, num_terms: u32) -> Self {
        let (c_ba, r_ab_inb) = vec2tran(xi_ab, num_terms);
        Self {
            rotation: Rotation::from_matrix(c_ba),
            r_ab_inb,
        }
    }

    /// Lie algebra -> Lie group, using the closed-form exponential map.
    #[inline]
    pub fn exp(xi_ab: &Vec6F64) -> Self {
        Self::from_twist(xi_ab, 0)
    }

    /// Create a transformation from a dynamically-sized twist `(ρ, φ)`.
    ///
    /// # Errors
    ///
    /// Returns [`LieError::DimensionMismatch`] if `xi_ab` does not have exactly 6 elements.
    pub fn try_from_slice(xi_ab: &[f64]) -> Result<Self, LieError> {
        LieError::check_dimension(Self::DOF, xi_ab.len())?;
        Ok(Self::exp(&Vec6F64::from_column_slice(xi_ab)))
    }

    /// Sample a transformation with a uniform rotation and a translation in `[-1, 1)³`.
    pub fn from_random() -> Self {
        let mut rng = rand::rng();
        let r_ab_inb = DVec3::new(
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
        );
        Self {
            rotation: Rotation::from_random(),
            r_ab_inb,
        }
    }

    /// The 4x4 homogeneous matrix `T_ba`.
    pub fn matrix(&self) -> DMat4 {
        let c_ba = self.rotation.matrix();
        DMat4::from_cols(
            c_ba.x_axis.extend(0.0),
            c_ba.y_axis.extend(0.0),
            c_ba.z_axis.extend(0.0),
            self.r_ab_inb.extend(1.0),
        )
    }

    /// The rotation part.
    #[inline]
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// The rotation matrix `C_ba`.
    #[inline]
    pub fn c_ba(&self) -> DMat3 {
        self.rotation.matrix()
    }

    /// The translation `r_ab_inb`.
    #[inline]
    pub fn r_ab_inb(&self) -> DVec3 {
        self.r_ab_inb
    }

    /// The "forward" translation `r_ba_ina = -C_baᵀ * r_ab_inb`.
    #[inline]
    pub fn r_ba_ina(&self) -> DVec3 {
        -self.rotation.inverse().transform(self.r_ab_inb)
    }

    /// Lie group -> Lie algebra, `xi_ab = tran2vec(C_ba, r_ab_inb)`.
    #[inline]
    pub fn vec(&self) -> Vec6F64 {
        tran2vec(self.rotation.matrix(), self.r_ab_inb)
    }

    /// The 6x6 adjoint matrix, see [`tran_ad`](super::tran_ad).
    #[inline]
    pub fn adjoint(&self) -> Mat6F64 {
        tran_ad(self.rotation.matrix(), self.r_ab_inb)
    }

    /// Re-project the rotation block onto SO(3) according to `policy`.
    pub fn reproject(&mut self, policy: Reprojection) {
        if policy.is_required(self.rotation.matrix()) {
            log::trace!(
                "re-projecting rotation block, det = {}",
                self.rotation.matrix().determinant()
            );
            self.rotation.reproject();
        }
    }

    /// The inverse transformation, with the default re-projection policy.
    #[inline]
    pub fn inverse(&self) -> Self {
        self.inverse_with(Reprojection::default())
    }

    /// The inverse transformation `[C_baᵀ, -C_baᵀ r_ab_inb; 0ᵀ, 1]`.
    ///
    /// The rotation is re-projected according to `policy` before the translation is computed
    /// from it.
    pub fn inverse_with(&self, policy: Reprojection) -> Self {
        let mut out = Self {
            rotation: self.rotation.inverse(),
            r_ab_inb: DVec3::ZERO,
        };
        out.reproject(policy);
        out.r_ab_inb = -out.rotation.transform(self.r_ab_inb);
        out
    }

    /// Right-multiply by `rhs` in place, with the default re-projection policy.
    #[inline]
    pub fn compose_in_place(&mut self, rhs: &Self) {
        self.compose_in_place_with(rhs, Reprojection::default());
    }

    /// Right-multiply by `rhs` in place: `T = T * T_rhs`.
    pub fn compose_in_place_with(&mut self, rhs: &Self, policy: Reprojection) {
        self.r_ab_inb += self.rotation.transform(rhs.r_ab_inb);
        self.rotation.compose_in_place(&rhs.rotation);
        self.reproject(policy);
    }

    /// Right-multiply by `rhs`: returns `T * T_rhs`.
    #[inline]
    pub fn compose(&self, rhs: &Self) -> Self {
        let mut out = *self;
        out.compose_in_place(rhs);
        out
    }

    /// Right-multiply by the inverse of `rhs` in place, with the default re-projection policy.
    #[inline]
    pub fn compose_inverse_in_place(&mut self, rhs: &Self) {
        self.compose_inverse_in_place_with(rhs, Reprojection::default());
    }

    /// Right-multiply by the inverse of `rhs` in place: `T = T * T_rhs⁻¹`.
    pub fn compose_inverse_in_place_with(&mut self, rhs: &Self, policy: Reprojection) {
        self.rotation.compose_inverse_in_place(&rhs.rotation);
        self.r_ab_inb -= self.rotation.transform(rhs.r_ab_inb);
        self.reproject(policy);
    }

    /// Right-multiply by the inverse of `rhs`: returns `T * T_rhs⁻¹`.
    #[inline]
    pub fn compose_inverse(&self, rhs: &Self) -> Self {
        let mut out = *self;
        out.compose_inverse_in_place(rhs);
        out
    }

    /// Transform a homogeneous point: `p_b = T_ba * p_a`.
    ///
    /// The homogeneous coordinate is carried over unchanged, so directions (`w = 0`) are only
    /// rotated.
    pub fn transform(&self, p_a: DVec4) -> DVec4 {
        let top = self.rotation.transform(p_a.truncate()) + self.r_ab_inb * p_a.w;
        top.extend(p_a.w)
    }
}

impl TryFrom<&[f64]> for Transformation {
    type Error = LieError;

    fn try_from(xi_ab: &[f64]) -> Result<Self, Self::Error> {
        Self::try_from_slice(xi_ab)
    }
}

impl TryFrom<&DVecF64> for Transformation {
    type Error = LieError;

    fn try_from(xi_ab: &DVecF64) -> Result<Self, Self::Error> {
        Self::try_from_slice(xi_ab.as_slice())
    }
}

impl From<Transformation> for DMat4 {
    fn from(transformation: Transformation) -> Self {
        transformation.matrix()
    }
}

impl std::ops::Mul<Transformation> for Transformation {
    type Output = Transformation;

    fn mul(self, rhs: Self) -> Self::Output {
        self.compose(&rhs)
    }
}

impl std::ops::MulAssign<Transformation> for Transformation {
    #[inline]
    fn mul_assign(&mut self, rhs: Transformation) {
        self.compose_in_place(&rhs);
    }
}

impl std::ops::Mul<DVec4> for Transformation {
    type Output = DVec4;

    fn mul(self, rhs: DVec4) -> Self::Output {
        self.transform(rhs)
    }
}

impl fmt::Display for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.matrix();
        let rows = [
            m.row(0).to_array(),
            m.row(1).to_array(),
            m.row(2).to_array(),
            m.row(3).to_array(),
        ];
        write_rows(f, &rows)
    }
}

#[cfg(any(test, feature = "approx"))]
impl approx::AbsDiffEq for Transformation {
    type Epsilon = f64;

    #[inline]
    fn default_epsilon() -> Self::Epsilon {
        <f64 as approx::AbsDiffEq>::default_epsilon()
    }

    #[inline]
    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        approx::AbsDiffEq::abs_diff_eq(&self.rotation, &other.rotation, epsilon)
            && self
                .r_ab_inb
                .to_array()
                .iter()
                .zip(other.r_ab_inb.to_array().iter())
                .all(|(a, b)| approx::AbsDiffEq::abs_diff_eq(a, b, epsilon))
    }
}

#[cfg(any(test, feature = "approx"))]
impl approx::RelativeEq for Transformation {
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
        approx::RelativeEq::relative_eq(&self.rotation, &other.rotation, epsilon, max_relative)
            && self
                .r_ab_inb
                .to_array()
                .iter()
                .zip(other.r_ab_inb.to_array().iter())
                .all(|(a, b)| approx::RelativeEq::relative_eq(a, b, epsilon, max_relative))
    }
}
