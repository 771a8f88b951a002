//! The area owning the fish and the baby.
use crate::{
    physics::{Body, Physics},
    sampler::{sample_position, sample_yaw},
    Fish, FishId, PenguinEnvConfig,
};
use glam::Vec3;
use log::debug;
use rand::Rng;

/// The dependent waiting to be fed. It never moves between resets.
#[derive(Debug, Clone, PartialEq)]
pub struct Baby {
    /// Position of the baby.
    pub position: Vec3,

    /// Yaw in degrees.
    pub yaw: f32,
}

/// A bounded area with a population of fish and one baby.
///
/// The area exclusively owns its fish and its baby. The agent body is
/// owned by the agent controller and only borrowed when the area places it.
pub struct Area {
    config: PenguinEnvConfig,
    fish: Vec<Fish>,
    baby: Baby,
    next_fish_id: u64,
}

impl Area {
    /// Creates an empty area with the baby at its center.
    ///
    /// The area is populated by [`Area::reset_area`].
    pub fn new(config: &PenguinEnvConfig) -> Self {
        Self {
            config: config.clone(),
            fish: Vec::new(),
            baby: Baby {
                position: config.center + Vec3::Y * config.ground_offset,
                yaw: config.baby_yaw,
            },
            next_fish_id: 0,
        }
    }

    /// Center of the area.
    pub fn center(&self) -> Vec3 {
        self.config.center
    }

    /// The live fish.
    pub fn fish(&self) -> &[Fish] {
        &self.fish
    }

    /// Looks up a live fish.
    pub fn get_fish(&self, id: FishId) -> Option<&Fish> {
        self.fish.iter().find(|f| f.id() == id)
    }

    /// The baby.
    pub fn baby(&self) -> &Baby {
        &self.baby
    }

    /// The number of live fish.
    pub fn fish_remaining(&self) -> usize {
        self.fish.len()
    }

    /// Replaces every fish with a fresh batch and places the agent and the baby.
    pub fn reset_area<R, P>(&mut self, rng: &mut R, agent: &mut Body, physics: &mut P)
    where
        R: Rng + ?Sized,
        P: Physics + ?Sized,
    {
        self.remove_all_fish();
        self.place_agent(rng, agent, physics);
        self.place_baby(rng);
        self.spawn_fish(rng, self.config.fish_count, self.config.fish_speed);
        debug!(
            "Area reset: agent at {:?}, baby at {:?}, {} fish",
            agent.position,
            self.baby.position,
            self.fish.len()
        );
    }

    /// Removes every fish.
    pub fn remove_all_fish(&mut self) {
        self.fish.clear();
    }

    /// Teleports the agent to a random point of the agent wedge with a random yaw.
    pub fn place_agent<R, P>(&self, rng: &mut R, agent: &mut Body, physics: &mut P)
    where
        R: Rng + ?Sized,
        P: Physics + ?Sized,
    {
        let position = self.sample_grounded(rng, &self.config.agent_wedge);
        let yaw = sample_yaw(rng);
        physics.teleport(agent, position, yaw);
    }

    /// Moves the baby to a random point of the baby wedge, facing the center.
    pub fn place_baby<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.baby.position = self.sample_grounded(rng, &self.config.baby_wedge);
        self.baby.yaw = self.config.baby_yaw;
    }

    /// Spawns `count` fish in the fish wedge with random yaw and base speed `speed`.
    pub fn spawn_fish<R: Rng + ?Sized>(&mut self, rng: &mut R, count: usize, speed: f32) {
        for _ in 0..count {
            let position = self.sample_grounded(rng, &self.config.fish_wedge);
            let yaw = sample_yaw(rng);
            let id = FishId(self.next_fish_id);
            self.next_fish_id += 1;
            self.fish.push(Fish::new(id, position, yaw, speed));
        }
    }

    /// Removes an eaten fish. Returns `None` if the fish is already gone.
    pub fn remove_specific_fish(&mut self, id: FishId) -> Option<Fish> {
        let ix = self.fish.iter().position(|f| f.id() == id)?;
        Some(self.fish.swap_remove(ix))
    }

    /// Advances every fish by one fixed timestep at simulation time `t`.
    pub fn fixed_update<R: Rng + ?Sized>(&mut self, rng: &mut R, t: f64, dt: f32) {
        let center = self.config.center;
        let wedge = self.config.fish_target_wedge;
        let height = self.config.ground_offset;
        for fish in self.fish.iter_mut() {
            fish.fixed_update(rng, t, dt, center, &wedge, height);
        }
    }

    fn sample_grounded<R: Rng + ?Sized>(&self, rng: &mut R, wedge: &crate::WedgeConfig) -> Vec3 {
        sample_position(rng, self.config.center, wedge) + Vec3::Y * self.config.ground_offset
    }
}
