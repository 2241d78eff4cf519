#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Rigid-body Lie groups
//!
//! This crate provides the exponential and logarithm maps of the rotation group SO(3) and the
//! rigid-body transformation group SE(3), together with two value types that wrap the group
//! elements:
//!
//! - [`Rotation`]: a 3x3 rotation matrix `C_ba` mapping coordinates from frame `a` to frame `b`.
//! - [`Transformation`]: a rotation plus the translation `r_ab_inb`, i.e. the homogeneous matrix
//!   `T_ba = [C_ba, r_ab_inb; 0 0 0 1]`.
//!
//! The free functions in [`so3`] and [`se3`] work directly on matrices and vectors:
//!
//! | Function | Map |
//! |----------|-----|
//! | [`so3::vec2rot`] | axis-angle → rotation matrix |
//! | [`so3::rot2vec`] | rotation matrix → axis-angle |
//! | [`se3::vec2tran`] | twist → (rotation, translation) |
//! | [`se3::tran2vec`] | (rotation, translation) → twist |
//! | [`se3::tran_ad`] | (rotation, translation) → 6x6 adjoint |
//!
//! Twists are ordered `ξ = (ρ, φ)`: translational part first, rotational part last.
//!
//! ## Example
//!
//! ```rust
//! use rigid_lie::{DVec3, Rotation, Transformation};
//!
//! let rotation = Rotation::exp(DVec3::new(0.0, 0.0, std::f64::consts::FRAC_PI_2));
//! let rotated = rotation.transform(DVec3::X);
//! assert!((rotated - DVec3::Y).length() < 1e-12);
//!
//! let t1 = Transformation::new(Rotation::IDENTITY, DVec3::X);
//! let t2 = Transformation::new(Rotation::IDENTITY, DVec3::Y);
//! assert_eq!(t1.compose(&t2).r_ab_inb(), DVec3::new(1.0, 1.0, 0.0));
//! ```

mod display;
mod error;

/// Special Euclidean group SE(3) for 3D rigid transformations.
pub mod se3;

/// Special Orthogonal group SO(3) for 3D rotations.
pub mod so3;

pub use error::LieError;
pub use se3::{Reprojection, Transformation, DEFAULT_DETERMINANT_TOLERANCE};
pub use so3::Rotation;

// Re-export the fixed-size types used throughout the public API.
pub use glam::{DMat3, DMat4, DVec3, DVec4};

/// 6-dimensional vector, used for twists `ξ = (ρ, φ)`.
pub type Vec6F64 = nalgebra::Vector6<f64>;

/// 6x6 matrix, used for adjoint representations.
pub type Mat6F64 = nalgebra::Matrix6<f64>;

/// Dynamic-sized vector with f64 elements.
pub type DVecF64 = nalgebra::DVector<f64>;
