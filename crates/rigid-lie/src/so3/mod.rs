//! # SO(3): the special orthogonal group in 3D
//!
//! The Lie algebra so(3) is the space of 3x3 skew-symmetric matrices, isomorphic to R³ through
//! [`hat`]. An axis-angle vector `φ` encodes a rotation of `‖φ‖` radians about `φ / ‖φ‖`.
//!
//! Rotations are stored as plain 3x3 matrices rather than quaternions, so repeated products drift
//! off the manifold; [`Rotation::reproject`] maps them back with a `vec2rot(rot2vec(C))` round trip.

mod ops;
mod rotation;

pub use ops::{exp, hat, rot2vec, vec2jac, vec2jacinv, vec2rot, vee};
pub use rotation::Rotation;
