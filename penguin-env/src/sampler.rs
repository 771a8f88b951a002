//! Random placement within a wedge of an annulus.
use crate::WedgeConfig;
use glam::{Quat, Vec3};
use rand::Rng;

/// Returns the horizontal unit vector obtained by rotating +z by `yaw` degrees
/// about the vertical axis.
pub fn forward(yaw: f32) -> Vec3 {
    Quat::from_rotation_y(yaw.to_radians()) * Vec3::Z
}

/// Yaw in degrees of a horizontal direction, the inverse of [`forward`].
pub fn yaw_of(direction: Vec3) -> f32 {
    direction.x.atan2(direction.z).to_degrees()
}

/// Picks a random point within `wedge` around `center`.
///
/// A bound pair with `min >= max` pins the value to `min` instead of
/// sampling it. Inverted bounds are rejected by
/// [`WedgeConfig::validate`] before any sampling happens.
pub fn sample_position<R: Rng + ?Sized>(rng: &mut R, center: Vec3, wedge: &WedgeConfig) -> Vec3 {
    let radius = if wedge.max_radius > wedge.min_radius {
        rng.gen_range(wedge.min_radius..wedge.max_radius)
    } else {
        wedge.min_radius
    };
    let angle = if wedge.max_angle > wedge.min_angle {
        rng.gen_range(wedge.min_angle..wedge.max_angle)
    } else {
        wedge.min_angle
    };

    center + forward(angle) * radius
}

/// Picks a yaw uniformly in `[0, 360)` degrees.
pub fn sample_yaw<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.gen_range(0.0..360.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    // Angle of `p` around `center`, shifted into `[lo, lo + 360)`.
    fn angle_from(center: Vec3, p: Vec3, lo: f32) -> f32 {
        let mut a = yaw_of(p - center);
        while a < lo {
            a += 360.0;
        }
        while a >= lo + 360.0 {
            a -= 360.0;
        }
        a
    }

    #[test]
    fn samples_stay_within_the_wedge() {
        let mut rng = SmallRng::seed_from_u64(7);
        let center = Vec3::new(3.0, 0.0, -2.0);
        let wedges = [
            WedgeConfig::new(100.0, 260.0, 2.0, 13.0),
            WedgeConfig::new(-45.0, 45.0, 4.0, 9.0),
            WedgeConfig::new(0.0, 360.0, 0.5, 9.0),
        ];

        for wedge in wedges.iter() {
            for _ in 0..1000 {
                let p = sample_position(&mut rng, center, wedge);
                let r = p.distance(center);
                assert!(r >= wedge.min_radius - 1e-4 && r < wedge.max_radius + 1e-4, "{}", r);
                assert!((p.y - center.y).abs() < 1e-6);
                let a = angle_from(center, p, wedge.min_angle - 1e-3);
                assert!(a < wedge.max_angle + 1e-3, "{} not in {:?}", a, wedge);
            }
        }
    }

    #[test]
    fn pinned_bounds_are_not_sampled() {
        let mut rng = SmallRng::seed_from_u64(0);
        let wedge = WedgeConfig::new(90.0, 90.0, 4.0, 4.0);
        let p = sample_position(&mut rng, Vec3::ZERO, &wedge);
        assert!(p.abs_diff_eq(Vec3::new(4.0, 0.0, 0.0), 1e-5));
    }

    #[test]
    fn zero_radius_returns_center() {
        let mut rng = SmallRng::seed_from_u64(1);
        let center = Vec3::new(1.0, 2.0, 3.0);
        let p = sample_position(&mut rng, center, &WedgeConfig::new(0.0, 360.0, 0.0, 0.0));
        assert_eq!(p, center);
    }

    #[test]
    fn same_seed_gives_same_position() {
        let wedge = WedgeConfig::new(100.0, 260.0, 2.0, 13.0);
        let a = sample_position(&mut SmallRng::seed_from_u64(42), Vec3::ZERO, &wedge);
        let b = sample_position(&mut SmallRng::seed_from_u64(42), Vec3::ZERO, &wedge);
        assert_eq!(a, b);
    }

    #[test]
    fn yaw_round_trips_through_forward() {
        for yaw in [0.0f32, 45.0, 90.0, 179.0, -120.0] {
            assert!((yaw_of(forward(yaw)) - yaw).abs() < 1e-3);
        }
    }
}
