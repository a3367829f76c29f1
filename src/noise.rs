//! Sine-hashed value noise used to warp the cosmic field.
//!
//! Every function mirrors the GLSL in [`crate::cosmic::FRAGMENT_SHADER`]
//! operation for operation, so the CPU and GPU paths agree.

use glam::Vec3;

/// GLSL `smoothstep`.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// GLSL `mix`.
#[inline]
pub fn mix(x: f32, y: f32, a: f32) -> f32 {
    x * (1.0 - a) + y * a
}

/// Pseudo-random lattice value at integer `f`.
#[inline]
fn lattice(seed: f32, f: f32) -> f32 {
    (((f * seed).cos() + (f * 1024.0).sin()) * 345.0 + seed).sin()
}

/// 1-D value noise: hashes the two surrounding integers and eases between
/// them, so the curve is continuous across integer boundaries.
pub fn sway_randomized(seed: f32, value: f32) -> f32 {
    let f = value.floor();
    let start = lattice(seed, f);
    let end = lattice(seed, f + 1.0);
    mix(start, end, smoothstep(0.0, 1.0, value - f))
}

/// Three coupled noise passes over permuted axes of `con`, each feeding the
/// running sum back in. Returns their mean.
pub fn cosmic(seed: f32, con: Vec3) -> f32 {
    let mut sum = sway_randomized(seed, con.z + con.x);
    sum = sum + sway_randomized(seed, con.x + con.y + sum);
    sum = sum + sway_randomized(seed, con.y + con.z + sum);
    sum * 0.3333333333
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoothstep_clamps_and_eases() {
        assert_eq!(smoothstep(0.0, 1.0, -2.0), 0.0);
        assert_eq!(smoothstep(0.0, 1.0, 3.0), 1.0);
        assert_eq!(smoothstep(0.0, 1.0, 0.5), 0.5);
    }

    #[test]
    fn sway_hits_lattice_values_at_integers() {
        for seed in [1.0_f32, 42.0, -16405.31527] {
            for f in [-3.0_f32, 0.0, 7.0] {
                assert_eq!(sway_randomized(seed, f), lattice(seed, f));
            }
        }
    }

    #[test]
    fn sway_is_continuous_across_integer_boundaries() {
        for seed in [3.0_f32, 42.0, 99.5] {
            for f in [-2.0_f32, 0.0, 5.0, 13.0] {
                let below = sway_randomized(seed, f + 1.0 - 1e-3);
                let at = sway_randomized(seed, f + 1.0);
                assert!((below - at).abs() < 1e-4, "seed {seed} f {f}: {below} vs {at}");
            }
        }
    }

    #[test]
    fn sway_stays_in_unit_range() {
        let mut v = -10.0_f32;
        while v < 10.0 {
            let s = sway_randomized(42.0, v);
            assert!((-1.0..=1.0).contains(&s));
            v += 0.037;
        }
    }

    #[test]
    fn cosmic_is_deterministic() {
        let con = Vec3::new(0.25, -1.5, 3.75);
        let a = cosmic(42.0, con);
        let b = cosmic(42.0, con);
        assert_eq!(a.to_bits(), b.to_bits());
        assert_ne!(cosmic(43.0, con), a);
    }

    #[test]
    fn cosmic_at_origin_matches_reference() {
        // Reference values computed independently in double precision.
        let v = cosmic(42.0, Vec3::ZERO);
        assert!((v - (-0.5396205 / 3.0)).abs() < 1e-4, "{v}");
    }
}
