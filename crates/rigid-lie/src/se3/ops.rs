use glam::{DMat3, DMat4, DVec3};

use crate::{so3, Mat6F64, Vec6F64};

/// Splits a twist into its translational and rotational parts `(ρ, φ)`.
#[inline]
pub(crate) fn split_twist(xi: &Vec6F64) -> (DVec3, DVec3) {
    (
        DVec3::new(xi[0], xi[1], xi[2]),
        DVec3::new(xi[3], xi[4], xi[5]),
    )
}

/// Stacks a translational and a rotational part into a twist `ξ = (ρ, φ)`.
#[inline]
pub(crate) fn join_twist(rho: DVec3, phi: DVec3) -> Vec6F64 {
    Vec6F64::new(rho.x, rho.y, rho.z, phi.x, phi.y, phi.z)
}

/// Copies a 3x3 block into `out` with its top-left corner at `(row, col)`.
fn set_block(out: &mut Mat6F64, row: usize, col: usize, block: DMat3) {
    for j in 0..3 {
        let column = block.col(j);
        for i in 0..3 {
            out[(row + i, col + j)] = column[i];
        }
    }
}

/// Vector space -> Lie algebra, as a 4x4 matrix.
///
/// ```text
/// ξ^ = | [φ]×  ρ |
///      |  0ᵀ   0 |
/// ```
pub fn hat(xi: &Vec6F64) -> DMat4 {
    let (rho, phi) = split_twist(xi);
    let skew = so3::hat(phi);
    DMat4::from_cols(
        skew.x_axis.extend(0.0),
        skew.y_axis.extend(0.0),
        skew.z_axis.extend(0.0),
        rho.extend(0.0),
    )
}

/// Adjoint of the Lie algebra, the 6x6 matrix with `ξ⋏ ζ = [ξ^, ζ^]∨`.
///
/// ```text
/// ξ⋏ = | [φ]×  [ρ]× |
///      |  0    [φ]× |
/// ```
pub fn curlyhat(xi: &Vec6F64) -> Mat6F64 {
    let (rho, phi) = split_twist(xi);
    let skew_phi = so3::hat(phi);

    let mut out = Mat6F64::zeros();
    set_block(&mut out, 0, 0, skew_phi);
    set_block(&mut out, 0, 3, so3::hat(rho));
    set_block(&mut out, 3, 3, skew_phi);
    out
}

/// Exponential map from a twist to a rotation and translation, `T_ba = exp(ξ_ab^)`.
///
/// Returns `(C_ba, r_ab_inb)` with `C_ba = vec2rot(φ, N)` and `r_ab_inb = J(φ, N) ρ`, where `J` is
/// the SO(3) left Jacobian. `num_terms` has the same meaning as in [`so3::vec2rot`]; the
/// Jacobian is evaluated with the same number of terms so the two stay consistent.
pub fn vec2tran(xi_ab: &Vec6F64, num_terms: u32) -> (DMat3, DVec3) {
    let (rho, phi) = split_twist(xi_ab);
    let c_ba = so3::vec2rot(phi, num_terms);
    let r_ab_inb = so3::vec2jac(phi, num_terms) * rho;
    (c_ba, r_ab_inb)
}

/// Logarithmic map from a rotation and translation to a twist.
///
/// `φ = rot2vec(C_ba)` and `ρ = J(φ)⁻¹ r_ab_inb`. Like [`so3::rot2vec`], the rotational part is
/// not unique when the rotation angle is exactly π.
pub fn tran2vec(c_ba: DMat3, r_ab_inb: DVec3) -> Vec6F64 {
    let phi = so3::rot2vec(c_ba);
    let rho = so3::vec2jacinv(phi, 0) * r_ab_inb;
    join_twist(rho, phi)
}

/// Adjoint representation of a transformation.
///
/// ```text
/// Ad(T) = | C   [r]× C |
///         | 0     C    |
/// ```
///
/// It maps a twist expressed in frame `a` to the same twist expressed in frame `b`:
/// `exp((Ad(T) ξ)^) = T exp(ξ^) T⁻¹`.
pub fn tran_ad(c_ba: DMat3, r_ab_inb: DVec3) -> Mat6F64 {
    let mut out = Mat6F64::zeros();
    set_block(&mut out, 0, 0, c_ba);
    set_block(&mut out, 0, 3, so3::hat(r_ab_inb) * c_ba);
    set_block(&mut out, 3, 3, c_ba);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::DVec4;

    fn assert_mat3_eq(a: DMat3, b: DMat3, epsilon: f64) {
        for (x, y) in a.to_cols_array().iter().zip(b.to_cols_array().iter()) {
            assert_relative_eq!(x, y, epsilon = epsilon);
        }
    }

    fn assert_twist_eq(a: &Vec6F64, b: &Vec6F64, epsilon: f64) {
        for i in 0..6 {
            assert_relative_eq!(a[i], b[i], epsilon = epsilon);
        }
    }

    #[test]
    fn test_split_join() {
        let xi = Vec6F64::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        let (rho, phi) = split_twist(&xi);
        assert_eq!(rho, DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(phi, DVec3::new(4.0, 5.0, 6.0));
        assert_eq!(join_twist(rho, phi), xi);
    }

    #[test]
    fn test_hat() {
        let xi = Vec6F64::new(1.0, 2.0, 3.0, 0.1, 0.2, 0.3);
        let m = hat(&xi);

        assert_eq!(m.w_axis, DVec4::new(1.0, 2.0, 3.0, 0.0));
        assert_eq!(m.row(3), DVec4::ZERO);

        // acting on a homogeneous point gives φ x p + ρ
        let p = DVec3::new(-1.0, 0.5, 2.0);
        let out = m * p.extend(1.0);
        let expected = DVec3::new(0.1, 0.2, 0.3).cross(p) + DVec3::new(1.0, 2.0, 3.0);
        assert_relative_eq!(out.x, expected.x, epsilon = 1e-12);
        assert_relative_eq!(out.y, expected.y, epsilon = 1e-12);
        assert_relative_eq!(out.z, expected.z, epsilon = 1e-12);
        assert_eq!(out.w, 0.0);
    }

    #[test]
    fn test_curlyhat() {
        let xi = Vec6F64::new(0.3, -0.1, 0.2, 0.5, 0.4, -0.6);
        // ξ⋏ ξ = 0
        assert_twist_eq(&(curlyhat(&xi) * xi), &Vec6F64::zeros(), 1e-12);

        // ξ⋏ ζ matches the matrix commutator [ξ^, ζ^]
        let zeta = Vec6F64::new(-0.2, 0.7, 0.1, 0.0, 0.3, 0.9);
        let lhs = hat(&(curlyhat(&xi) * zeta));
        let rhs = hat(&xi) * hat(&zeta) - hat(&zeta) * hat(&xi);
        for (x, y) in lhs.to_cols_array().iter().zip(rhs.to_cols_array().iter()) {
            assert_relative_eq!(x, y, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_vec2tran_zero() {
        let (c, r) = vec2tran(&Vec6F64::zeros(), 0);
        assert_eq!(c, DMat3::IDENTITY);
        assert_eq!(r, DVec3::ZERO);
    }

    #[test]
    fn test_vec2tran_pure_translation() {
        let (c, r) = vec2tran(&Vec6F64::new(1.0, -2.0, 3.0, 0.0, 0.0, 0.0), 0);
        assert_eq!(c, DMat3::IDENTITY);
        assert_eq!(r, DVec3::new(1.0, -2.0, 3.0));
    }

    #[test]
    fn test_vec2tran_matches_series() {
        let xi = Vec6F64::new(0.5, -0.3, 0.8, 0.2, 0.6, -0.4);
        let (c, r) = vec2tran(&xi, 0);
        let (c_series, r_series) = vec2tran(&xi, 25);

        assert_mat3_eq(c_series, c, 1e-12);
        assert_relative_eq!(r_series.x, r.x, epsilon = 1e-12);
        assert_relative_eq!(r_series.y, r.y, epsilon = 1e-12);
        assert_relative_eq!(r_series.z, r.z, epsilon = 1e-12);
    }

    #[test]
    fn test_vec2tran_tran2vec() {
        let test_twists = [
            Vec6F64::new(0.1, 0.2, 0.3, 0.4, 0.5, 0.6),
            Vec6F64::new(-1.0, 2.0, 0.5, 0.0, 0.0, 0.0),
            Vec6F64::new(3.0, -1.0, 0.2, 1e-9, -2e-9, 1e-9),
            Vec6F64::new(0.7, 0.0, -0.4, -1.5, 1.0, 1.2),
        ];

        for xi in test_twists.iter() {
            let (c, r) = vec2tran(xi, 0);
            assert_twist_eq(&tran2vec(c, r), xi, 1e-9);
        }
    }

    #[test]
    fn test_tran_ad_identity() {
        assert_eq!(
            tran_ad(DMat3::IDENTITY, DVec3::ZERO),
            Mat6F64::identity()
        );
    }

    #[test]
    fn test_tran_ad_blocks() {
        let c = so3::exp(DVec3::new(0.1, -0.3, 0.2));
        let r = DVec3::new(1.0, 2.0, -0.5);
        let ad = tran_ad(c, r);

        let rc = so3::hat(r) * c;
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(ad[(i, j)], c.col(j)[i]);
                assert_eq!(ad[(i, j + 3)], rc.col(j)[i]);
                assert_eq!(ad[(i + 3, j)], 0.0);
                assert_eq!(ad[(i + 3, j + 3)], c.col(j)[i]);
            }
        }
    }

    #[test]
    fn test_tran_ad_conjugation() {
        // exp((Ad(T) ξ)^) == T exp(ξ^) T⁻¹
        let (c_t, r_t) = vec2tran(&Vec6F64::new(0.4, -1.0, 0.3, 0.2, 0.1, -0.5), 0);
        let xi = Vec6F64::new(-0.2, 0.5, 0.9, 0.3, -0.6, 0.1);

        let to_mat4 = |c: DMat3, r: DVec3| {
            DMat4::from_cols(
                c.x_axis.extend(0.0),
                c.y_axis.extend(0.0),
                c.z_axis.extend(0.0),
                r.extend(1.0),
            )
        };

        let t = to_mat4(c_t, r_t);
        let (c_xi, r_xi) = vec2tran(&xi, 0);
        let lhs = t * to_mat4(c_xi, r_xi) * t.inverse();

        let (c_ad, r_ad) = vec2tran(&(tran_ad(c_t, r_t) * xi), 0);
        let rhs = to_mat4(c_ad, r_ad);

        for (x, y) in lhs.to_cols_array().iter().zip(rhs.to_cols_array().iter()) {
            assert_relative_eq!(x, y, epsilon = 1e-10);
        }
    }
}
