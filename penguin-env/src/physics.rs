//! Boundary to the physics service that moves the agent and reports contacts.
use crate::{sampler::forward, Area, ContactConfig, FishId, PenguinEnvConfig};
use glam::Vec3;

/// Rigid-body state of the agent as seen by the simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    /// Position of the body.
    pub position: Vec3,

    /// Yaw in degrees about the vertical axis.
    pub yaw: f32,

    /// Linear velocity produced by the last physics step.
    pub linear_velocity: Vec3,

    /// Yaw rate in degrees per second produced by the last physics step.
    pub angular_velocity: f32,
}

impl Default for Body {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            linear_velocity: Vec3::ZERO,
            angular_velocity: 0.0,
        }
    }
}

impl Body {
    /// Unit vector the body faces.
    pub fn forward(&self) -> Vec3 {
        forward(self.yaw)
    }
}

/// An entity the agent touched, tagged by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// A fish, which the agent may eat.
    Fish(FishId),

    /// The baby, which the agent may feed.
    Baby,
}

/// Physics service driving the agent body.
///
/// Motion requested with [`Physics::move_position`] and [`Physics::rotate`]
/// is not applied immediately: it is integrated by the next call to
/// [`Physics::simulate`], which is where collision response may alter it.
pub trait Physics {
    /// Builds the adapter for an environment.
    fn build(config: &PenguinEnvConfig) -> Self
    where
        Self: Sized;

    /// Queues a translation of the agent body.
    fn move_position(&mut self, delta: Vec3);

    /// Queues a rotation of the agent body about the vertical axis, in degrees.
    fn rotate(&mut self, yaw_delta: f32);

    /// Places the body, clearing its velocity and any queued motion.
    fn teleport(&mut self, body: &mut Body, position: Vec3, yaw: f32);

    /// Integrates queued motion over `dt` and returns the contacts of the
    /// agent with the entities of `area`.
    fn simulate(&mut self, body: &mut Body, area: &Area, dt: f32) -> Vec<Contact>;
}

/// Returns `true` if two spheres overlap.
fn spheres_overlap(pos_a: Vec3, radius_a: f32, pos_b: Vec3, radius_b: f32) -> bool {
    let delta = pos_b - pos_a;
    let min_distance = radius_a + radius_b;
    delta.length_squared() < min_distance * min_distance
}

/// Physics without collision response.
///
/// Queued motion is applied as is and every entity is a sphere: a contact is
/// reported for each fish or baby overlapping the agent after the move.
#[derive(Debug, Clone)]
pub struct KinematicPhysics {
    radii: ContactConfig,
    translation: Vec3,
    yaw_delta: f32,
}

impl KinematicPhysics {
    /// Constructs the adapter with the given contact radii.
    pub fn new(radii: ContactConfig) -> Self {
        Self {
            radii,
            translation: Vec3::ZERO,
            yaw_delta: 0.0,
        }
    }
}

impl Physics for KinematicPhysics {
    fn build(config: &PenguinEnvConfig) -> Self {
        Self::new(config.contact)
    }

    fn move_position(&mut self, delta: Vec3) {
        self.translation += delta;
    }

    fn rotate(&mut self, yaw_delta: f32) {
        self.yaw_delta += yaw_delta;
    }

    fn teleport(&mut self, body: &mut Body, position: Vec3, yaw: f32) {
        self.translation = Vec3::ZERO;
        self.yaw_delta = 0.0;
        body.position = position;
        body.yaw = yaw;
        body.linear_velocity = Vec3::ZERO;
        body.angular_velocity = 0.0;
    }

    fn simulate(&mut self, body: &mut Body, area: &Area, dt: f32) -> Vec<Contact> {
        body.position += self.translation;
        body.yaw = (body.yaw + self.yaw_delta).rem_euclid(360.0);
        body.linear_velocity = self.translation / dt;
        body.angular_velocity = self.yaw_delta / dt;
        self.translation = Vec3::ZERO;
        self.yaw_delta = 0.0;

        let r = &self.radii;
        let mut contacts: Vec<Contact> = area
            .fish()
            .iter()
            .filter(|f| spheres_overlap(body.position, r.agent_radius, f.position(), r.fish_radius))
            .map(|f| Contact::Fish(f.id()))
            .collect();
        if spheres_overlap(
            body.position,
            r.agent_radius,
            area.baby().position,
            r.baby_radius,
        ) {
            contacts.push(Contact::Baby);
        }
        contacts
    }
}
