//! 3D simplex noise (Ashima / McEwan formulation).
//!
//! Branch-free lattice hashing via the `mod 289` permutation polynomial, so no
//! permutation table has to be built or shared between threads. Output lies
//! roughly in [-1, 1].

use glam::{Vec3, Vec4};

#[inline]
fn mod289_3(x: Vec3) -> Vec3 {
    x - (x * (1.0 / 289.0)).floor() * 289.0
}

#[inline]
fn mod289_4(x: Vec4) -> Vec4 {
    x - (x * (1.0 / 289.0)).floor() * 289.0
}

#[inline]
fn permute(x: Vec4) -> Vec4 {
    mod289_4((x * 34.0 + Vec4::ONE) * x)
}

#[inline]
fn taylor_inv_sqrt(r: Vec4) -> Vec4 {
    Vec4::splat(1.792_842_9) - r * 0.853_734_7
}

// GLSL step(edge, x): 0 where x < edge, 1 otherwise.
#[inline]
fn step3(edge: Vec3, x: Vec3) -> Vec3 {
    Vec3::select(x.cmplt(edge), Vec3::ZERO, Vec3::ONE)
}

#[inline]
fn step4(edge: Vec4, x: Vec4) -> Vec4 {
    Vec4::select(x.cmplt(edge), Vec4::ZERO, Vec4::ONE)
}

/// Sample 3D simplex noise at `v`.
pub fn simplex3(v: Vec3) -> f32 {
    const C_X: f32 = 1.0 / 6.0;
    const C_Y: f32 = 1.0 / 3.0;

    // first corner
    let mut i = (v + Vec3::splat(v.dot(Vec3::splat(C_Y)))).floor();
    let x0 = v - i + Vec3::splat(i.dot(Vec3::splat(C_X)));

    // other corners
    let g = step3(Vec3::new(x0.y, x0.z, x0.x), x0);
    let l = Vec3::ONE - g;
    let l_zxy = Vec3::new(l.z, l.x, l.y);
    let i1 = g.min(l_zxy);
    let i2 = g.max(l_zxy);

    let x1 = x0 - i1 + Vec3::splat(C_X);
    let x2 = x0 - i2 + Vec3::splat(C_Y);
    let x3 = x0 - Vec3::splat(0.5);

    // permutations
    i = mod289_3(i);
    let p = permute(
        permute(
            permute(Vec4::splat(i.z) + Vec4::new(0.0, i1.z, i2.z, 1.0))
                + Vec4::splat(i.y)
                + Vec4::new(0.0, i1.y, i2.y, 1.0),
        ) + Vec4::splat(i.x)
            + Vec4::new(0.0, i1.x, i2.x, 1.0),
    );

    // gradients: 7x7 points over a square, mapped onto an octahedron
    let n = 1.0 / 7.0;
    let ns = Vec3::new(2.0 * n, 0.5 * n - 1.0, n);

    let j = p - (p * ns.z * ns.z).floor() * 49.0;
    let x_ = (j * ns.z).floor();
    let y_ = (j - x_ * 7.0).floor();

    let x = x_ * ns.x + Vec4::splat(ns.y);
    let y = y_ * ns.x + Vec4::splat(ns.y);
    let h = Vec4::ONE - x.abs() - y.abs();

    let b0 = Vec4::new(x.x, x.y, y.x, y.y);
    let b1 = Vec4::new(x.z, x.w, y.z, y.w);
    let s0 = b0.floor() * 2.0 + Vec4::ONE;
    let s1 = b1.floor() * 2.0 + Vec4::ONE;
    let sh = -step4(h, Vec4::ZERO);

    let a0 = Vec4::new(b0.x, b0.z, b0.y, b0.w)
        + Vec4::new(s0.x, s0.z, s0.y, s0.w) * Vec4::new(sh.x, sh.x, sh.y, sh.y);
    let a1 = Vec4::new(b1.x, b1.z, b1.y, b1.w)
        + Vec4::new(s1.x, s1.z, s1.y, s1.w) * Vec4::new(sh.z, sh.z, sh.w, sh.w);

    let mut p0 = Vec3::new(a0.x, a0.y, h.x);
    let mut p1 = Vec3::new(a0.z, a0.w, h.y);
    let mut p2 = Vec3::new(a1.x, a1.y, h.z);
    let mut p3 = Vec3::new(a1.z, a1.w, h.w);

    let norm = taylor_inv_sqrt(Vec4::new(p0.dot(p0), p1.dot(p1), p2.dot(p2), p3.dot(p3)));
    p0 *= norm.x;
    p1 *= norm.y;
    p2 *= norm.z;
    p3 *= norm.w;

    // mix final noise value
    let m = (Vec4::splat(0.6) - Vec4::new(x0.dot(x0), x1.dot(x1), x2.dot(x2), x3.dot(x3)))
        .max(Vec4::ZERO);
    let m = m * m;
    42.0 * (m * m).dot(Vec4::new(p0.dot(x0), p1.dot(x1), p2.dot(x2), p3.dot(x3)))
}

/// Three decorrelated noise channels at `p`, each with its own axis advanced by `offset`.
///
/// Used for organic drift: every output axis scrolls through the field along
/// a different input axis.
#[inline]
pub fn drift3(p: Vec3, offset: f32) -> Vec3 {
    Vec3::new(
        simplex3(Vec3::new(p.x + offset, p.y, p.z)),
        simplex3(Vec3::new(p.x, p.y + offset, p.z)),
        simplex3(Vec3::new(p.x, p.y, p.z + offset)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simplex_is_deterministic_and_bounded() {
        let mut v = Vec3::new(-3.7, 0.25, 11.0);
        for _ in 0..2_000 {
            let a = simplex3(v);
            assert_eq!(a, simplex3(v));
            assert!(a.is_finite());
            assert!((-1.05..=1.05).contains(&a), "noise {a} at {v:?}");
            v += Vec3::new(0.137, -0.071, 0.053);
        }
    }

    #[test]
    fn simplex_is_not_constant() {
        let a = simplex3(Vec3::new(0.3, 0.7, 0.1));
        let b = simplex3(Vec3::new(1.9, -2.2, 0.4));
        assert!((a - b).abs() > 1e-4);
    }

    #[test]
    fn simplex_is_continuous() {
        let base = Vec3::new(1.234, -0.5, 2.75);
        let near = base + Vec3::splat(1e-4);
        assert!((simplex3(base) - simplex3(near)).abs() < 0.01);
    }
}
