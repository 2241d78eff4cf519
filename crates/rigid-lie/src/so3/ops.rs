use std::f64::consts::PI;

use glam::{DMat3, DVec3};

/// Below this angle the trigonometric coefficients are replaced by their Taylor expansions.
const SMALL_ANGLE_EPSILON: f64 = 1.0e-6;

/// Within this distance of π the axis is recovered from the symmetric part of the matrix.
const NEAR_PI_EPSILON: f64 = 1.0e-3;

/// Bernoulli numbers `B_0 ..= B_20`, with the `B_1 = -1/2` convention of the left Jacobian.
const BERNOULLI: [f64; 21] = [
    1.0,
    -1.0 / 2.0,
    1.0 / 6.0,
    0.0,
    -1.0 / 30.0,
    0.0,
    1.0 / 42.0,
    0.0,
    -1.0 / 30.0,
    0.0,
    5.0 / 66.0,
    0.0,
    -691.0 / 2730.0,
    0.0,
    7.0 / 6.0,
    0.0,
    -3617.0 / 510.0,
    0.0,
    43867.0 / 798.0,
    0.0,
    -174611.0 / 330.0,
];

/// Vector space -> Lie algebra.
///
/// Builds the skew-symmetric matrix `[v]×` such that `hat(v) * u == v.cross(u)`.
///
/// ```text
/// [v]× = |  0   -v_z   v_y |
///        |  v_z   0   -v_x |
///        | -v_y  v_x    0  |
/// ```
pub fn hat(v: DVec3) -> DMat3 {
    DMat3::from_cols_array(&[0.0, v.z, -v.y, -v.z, 0.0, v.x, v.y, -v.x, 0.0])
}

/// Lie algebra -> vector space. Inverse of [`hat`] on skew-symmetric input.
pub fn vee(omega: DMat3) -> DVec3 {
    DVec3::new(omega.y_axis.z, omega.z_axis.x, omega.x_axis.y)
}

/// Sum of the diagonal entries.
fn trace(m: DMat3) -> f64 {
    m.x_axis.x + m.y_axis.y + m.z_axis.z
}

/// Evaluates `sum_{n=0}^{N} S^n / (n + shift)!` scaled so the zeroth term is the identity.
///
/// `shift = 0` gives the exponential series and `shift = 1` the left Jacobian series.
fn truncated_series(skew: DMat3, num_terms: u32, shift: f64) -> DMat3 {
    let mut term = DMat3::IDENTITY;
    let mut sum = DMat3::IDENTITY;
    for n in 1..=num_terms {
        term = term * skew * (1.0 / (n as f64 + shift));
        sum += term;
    }
    sum
}

/// Exponential map from an axis-angle vector to a rotation matrix, `C_ab = exp(aaxis_ba^)`.
///
/// With `num_terms == 0` the closed-form Rodrigues formula is used:
///
/// ```text
/// C = I + (sin θ / θ) [φ]× + ((1 - cos θ) / θ²) [φ]×²
/// ```
///
/// With `num_terms == N > 0` the truncated power series `sum_{n=0}^{N} [φ]×ⁿ / n!` is evaluated
/// instead. The zeroth term (the identity) is always included, so `N` counts the non-constant
/// terms. The series form is only orthonormal in the limit of many terms.
pub fn vec2rot(aaxis: DVec3, num_terms: u32) -> DMat3 {
    let skew = hat(aaxis);
    if num_terms > 0 {
        return truncated_series(skew, num_terms, 0.0);
    }

    let theta_sq = aaxis.length_squared();
    let theta = theta_sq.sqrt();

    let (a, b) = if theta < SMALL_ANGLE_EPSILON {
        // taylor expansions of sin(x)/x and (1 - cos(x))/x² around 0
        (1.0 - theta_sq / 6.0, 0.5 - theta_sq / 24.0)
    } else {
        let half_sin = (0.5 * theta).sin() / theta;
        (theta.sin() / theta, 2.0 * half_sin * half_sin)
    };

    DMat3::IDENTITY + skew * a + (skew * skew) * b
}

/// Closed-form exponential map, shorthand for `vec2rot(aaxis, 0)`.
#[inline]
pub fn exp(aaxis: DVec3) -> DMat3 {
    vec2rot(aaxis, 0)
}

/// Logarithmic map from a rotation matrix to an axis-angle vector.
///
/// The input is assumed, not checked, to be a proper orthonormal matrix. The returned angle lies
/// in `[0, π]`.
///
/// At exactly `θ = π` both `φ` and `-φ` map to the same matrix; the sign returned there is
/// whichever one the off-diagonal terms favour and is otherwise arbitrary.
pub fn rot2vec(c: DMat3) -> DVec3 {
    // round-off can push the cosine slightly outside [-1, 1]
    let cos_theta = (0.5 * (trace(c) - 1.0)).clamp(-1.0, 1.0);
    let theta = cos_theta.acos();

    // 2 sin(θ) * axis
    let antisym = vee(c - c.transpose());

    if theta < SMALL_ANGLE_EPSILON {
        return 0.5 * antisym;
    }

    if PI - theta < NEAR_PI_EPSILON {
        return theta * axis_near_pi(c, cos_theta, antisym);
    }

    antisym * (theta / (2.0 * theta.sin()))
}

/// Recovers the rotation axis from the symmetric part `(1 - cos θ) a aᵀ = (C + Cᵀ)/2 - cos θ I`.
fn axis_near_pi(c: DMat3, cos_theta: f64, antisym: DVec3) -> DVec3 {
    let outer = (c + c.transpose()) * 0.5 - DMat3::IDENTITY * cos_theta;
    let diag = [outer.x_axis.x, outer.y_axis.y, outer.z_axis.z];

    let mut k = 0;
    for i in 1..3 {
        if diag[i] > diag[k] {
            k = i;
        }
    }

    let axis = outer.col(k).normalize();
    if axis.dot(antisym) < 0.0 {
        -axis
    } else {
        axis
    }
}

/// Left Jacobian of SO(3).
///
/// ```text
/// J = I + ((1 - cos θ) / θ²) [φ]× + ((θ - sin θ) / θ³) [φ]×²
/// ```
///
/// With `num_terms == N > 0` the series `sum_{n=0}^{N} [φ]×ⁿ / (n + 1)!` is used, which is the
/// Jacobian consistent with the `N`-term series of [`vec2rot`].
pub fn vec2jac(aaxis: DVec3, num_terms: u32) -> DMat3 {
    let skew = hat(aaxis);
    if num_terms > 0 {
        return truncated_series(skew, num_terms, 1.0);
    }

    let theta_sq = aaxis.length_squared();
    let theta = theta_sq.sqrt();

    let (a, b) = if theta < SMALL_ANGLE_EPSILON {
        (0.5 - theta_sq / 24.0, 1.0 / 6.0 - theta_sq / 120.0)
    } else {
        let half_sin = (0.5 * theta).sin() / theta;
        (
            2.0 * half_sin * half_sin,
            (theta - theta.sin()) / (theta_sq * theta),
        )
    };

    DMat3::IDENTITY + skew * a + (skew * skew) * b
}

/// Inverse of the left Jacobian of SO(3).
///
/// ```text
/// J⁻¹ = I - ½ [φ]× + ((1 - (θ/2) cot(θ/2)) / θ²) [φ]×²
/// ```
///
/// The closed form is singular at `θ = 2π`; the log map never produces such angles.
///
/// With `num_terms == N > 0` the Bernoulli series `sum_{n=0}^{N} Bₙ/n! [φ]×ⁿ` is used. Only
/// `B_0 ..= B_20` are tabulated, so `N` is capped at 20.
pub fn vec2jacinv(aaxis: DVec3, num_terms: u32) -> DMat3 {
    let skew = hat(aaxis);
    if num_terms > 0 {
        let max_terms = (BERNOULLI.len() - 1) as u32;
        if num_terms > max_terms {
            log::debug!(
                "vec2jacinv: {} series terms requested, truncating to {}",
                num_terms,
                max_terms
            );
        }

        let mut power = DMat3::IDENTITY;
        let mut factorial = 1.0;
        let mut sum = DMat3::IDENTITY;
        for n in 1..=num_terms.min(max_terms) as usize {
            power = power * skew;
            factorial *= n as f64;
            if BERNOULLI[n] != 0.0 {
                sum += power * (BERNOULLI[n] / factorial);
            }
        }
        return sum;
    }

    let theta_sq = aaxis.length_squared();
    let theta = theta_sq.sqrt();

    let b = if theta < SMALL_ANGLE_EPSILON {
        1.0 / 12.0 + theta_sq / 720.0
    } else {
        let half = 0.5 * theta;
        (1.0 - half * half.cos() / half.sin()) / theta_sq
    };

    DMat3::IDENTITY - skew * 0.5 + (skew * skew) * b
}
