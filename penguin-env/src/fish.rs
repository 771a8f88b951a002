//! Fish and their autonomous swimming.
use crate::{
    sampler::{forward, sample_position, yaw_of},
    WedgeConfig,
};
use glam::Vec3;
use log::trace;
use rand::Rng;

/// Plan time of a fish that has not planned yet. Any simulation time is
/// at or after it, so the first tick always replans.
const UNPLANNED: f64 = -1.0;

/// Identifies a fish within its area. Identifiers are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FishId(pub u64);

/// A fish swimming between random destinations.
///
/// Each tick a fish either replans, when the simulation time has reached
/// its plan time, or moves toward its destination without passing it.
#[derive(Debug, Clone)]
pub struct Fish {
    id: FishId,
    position: Vec3,
    yaw: f32,
    cruise_speed: f32,
    speed: f32,
    target: Vec3,
    next_plan_time: f64,
}

impl Fish {
    /// Creates a fish that will plan its first leg on its first tick.
    pub fn new(id: FishId, position: Vec3, yaw: f32, cruise_speed: f32) -> Self {
        Self {
            id,
            position,
            yaw,
            cruise_speed,
            speed: 0.0,
            target: position,
            next_plan_time: UNPLANNED,
        }
    }

    /// Identifier of the fish.
    pub fn id(&self) -> FishId {
        self.id
    }

    /// Current position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Current yaw in degrees.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Unit vector the fish is heading along.
    pub fn forward(&self) -> Vec3 {
        forward(self.yaw)
    }

    /// Base speed set on spawn.
    pub fn cruise_speed(&self) -> f32 {
        self.cruise_speed
    }

    /// Speed of the current leg.
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Destination of the current leg.
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Simulation time at which the fish picks a new leg.
    pub fn next_plan_time(&self) -> f64 {
        self.next_plan_time
    }

    /// Advances the fish by one fixed timestep.
    ///
    /// `t` is the simulation time of this tick. Destinations are drawn from
    /// `wedge` around `center` and lifted by `height`. A fish with zero base
    /// speed stays where it is.
    pub fn fixed_update<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        t: f64,
        dt: f32,
        center: Vec3,
        wedge: &WedgeConfig,
        height: f32,
    ) {
        if self.cruise_speed <= 0.0 {
            return;
        }

        if t >= self.next_plan_time {
            self.replan(rng, t, center, wedge, height);
        } else {
            self.swim(t, dt);
        }
    }

    fn replan<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        t: f64,
        center: Vec3,
        wedge: &WedgeConfig,
        height: f32,
    ) {
        self.speed = self.cruise_speed * rng.gen_range(0.5..1.5);
        self.target = sample_position(rng, center, wedge) + Vec3::Y * height;

        let to_target = self.target - self.position;
        let horizontal = Vec3::new(to_target.x, 0.0, to_target.z);
        if horizontal.length_squared() > f32::EPSILON {
            self.yaw = yaw_of(horizontal);
        }

        // A destination at the current position counts as reached.
        let distance = to_target.length();
        self.next_plan_time = t + (distance / self.speed) as f64;
        trace!(
            "{:?} heads to {:?} at {:.3}, arriving at t = {:.3}",
            self.id,
            self.target,
            self.speed,
            self.next_plan_time
        );
    }

    /// Moves toward the target, stopping on it.
    ///
    /// Targets are placed at the spawn height and [`Fish::replan`] turns the
    /// fish to face them, so the direction to the target is the forward
    /// direction of the fish.
    fn swim(&mut self, t: f64, dt: f32) {
        let to_target = self.target - self.position;
        let remaining = to_target.length();
        let step = self.speed * dt;

        if step < remaining {
            self.position += to_target / remaining * step;
        } else {
            self.position = self.target;
            self.next_plan_time = t;
        }
    }
}
