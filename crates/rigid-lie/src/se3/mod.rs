//! # SE(3): the special Euclidean group in 3D
//!
//! A rigid-body transformation `T_ba = [C_ba, r_ab_inb; 0ᵀ, 1]` is the semi-direct product of a
//! rotation and a translation. Its Lie algebra se(3) is parameterised by a twist `ξ = (ρ, φ)`,
//! where `φ` is an axis-angle vector and `ρ` the translational part; note that `ρ` is not the
//! translation itself, the two are related by the SO(3) left Jacobian: `r = J(φ) ρ`.
//!
//! Only the rotation block of a [`Transformation`] can drift off the manifold. It is
//! re-projected according to a [`Reprojection`] policy after every composition and inversion.

mod ops;
mod transformation;

pub use ops::{curlyhat, hat, tran2vec, tran_ad, vec2tran};
pub use transformation::{Reprojection, Transformation, DEFAULT_DETERMINANT_TOLERANCE};
