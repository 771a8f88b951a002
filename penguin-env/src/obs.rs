//! Observation of the penguin agent.
use glam::Vec3;
use penguin_core::Obs;

/// Number of scalar values in [`PenguinObs`].
pub const OBS_DIM: usize = 8;

/// Observation vector of the agent.
///
/// The order of the values is fixed:
///
/// | index | value |
/// |---|---|
/// | 0 | 1 if the stomach is full, else 0 |
/// | 1 | distance from the agent to the baby |
/// | 2..5 | unit direction from the agent to the baby |
/// | 5..8 | forward direction of the agent |
#[derive(Clone, Debug, PartialEq)]
pub struct PenguinObs(pub [f32; OBS_DIM]);

impl PenguinObs {
    /// Assembles an observation. A zero offset to the baby gives a zero direction.
    pub fn new(stomach_full: bool, to_baby: Vec3, forward: Vec3) -> Self {
        let direction = to_baby.normalize_or_zero();
        Self([
            if stomach_full { 1.0 } else { 0.0 },
            to_baby.length(),
            direction.x,
            direction.y,
            direction.z,
            forward.x,
            forward.y,
            forward.z,
        ])
    }

    /// Whether the stomach is full.
    pub fn stomach_full(&self) -> bool {
        self.0[0] > 0.5
    }

    /// Distance to the baby.
    pub fn distance_to_baby(&self) -> f32 {
        self.0[1]
    }

    /// Unit direction to the baby.
    pub fn direction_to_baby(&self) -> Vec3 {
        Vec3::new(self.0[2], self.0[3], self.0[4])
    }

    /// Forward direction of the agent.
    pub fn forward(&self) -> Vec3 {
        Vec3::new(self.0[5], self.0[6], self.0[7])
    }
}

impl Obs for PenguinObs {
    fn len(&self) -> usize {
        OBS_DIM
    }
}

impl From<PenguinObs> for Vec<f32> {
    fn from(obs: PenguinObs) -> Self {
        obs.0.to_vec()
    }
}
