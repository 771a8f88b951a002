//! Configuration of [`PenguinEnv`](crate::PenguinEnv).
use crate::PenguinError;
use anyhow::Result;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// An angular arc of an annulus around the area center.
///
/// Angles are in degrees, measured as a rotation about the vertical axis
/// from the forward (+z) direction.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone, Copy)]
pub struct WedgeConfig {
    /// Lower bound of the angle.
    pub min_angle: f32,

    /// Upper bound of the angle.
    pub max_angle: f32,

    /// Lower bound of the distance from the center.
    pub min_radius: f32,

    /// Upper bound of the distance from the center.
    pub max_radius: f32,
}

impl WedgeConfig {
    /// Constructs a wedge.
    pub fn new(min_angle: f32, max_angle: f32, min_radius: f32, max_radius: f32) -> Self {
        Self {
            min_angle,
            max_angle,
            min_radius,
            max_radius,
        }
    }

    /// Checks the bounds. Equal bounds are allowed and pin the value.
    pub fn validate(&self, name: &str) -> Result<(), PenguinError> {
        let invalid = |reason: String| PenguinError::InvalidWedge {
            name: name.to_string(),
            reason,
        };
        let values = [
            self.min_angle,
            self.max_angle,
            self.min_radius,
            self.max_radius,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(invalid("bounds must be finite".to_string()));
        }
        if self.min_angle > self.max_angle {
            return Err(invalid(format!(
                "min_angle {} > max_angle {}",
                self.min_angle, self.max_angle
            )));
        }
        if self.min_radius > self.max_radius {
            return Err(invalid(format!(
                "min_radius {} > max_radius {}",
                self.min_radius, self.max_radius
            )));
        }
        if self.min_radius < 0.0 {
            return Err(invalid(format!("min_radius {} < 0", self.min_radius)));
        }
        Ok(())
    }
}

/// Radii used by [`KinematicPhysics`](crate::KinematicPhysics) to detect contacts.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone, Copy)]
pub struct ContactConfig {
    /// Radius of the agent body.
    pub agent_radius: f32,

    /// Radius of a fish.
    pub fish_radius: f32,

    /// Radius of the baby.
    pub baby_radius: f32,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            agent_radius: 0.5,
            fish_radius: 0.25,
            baby_radius: 0.5,
        }
    }
}

/// Configuration of [`PenguinEnv`](crate::PenguinEnv).
///
/// The default values reproduce the reference scenario: four fish at base
/// speed 0.5, an agent moving at 5 units/s and turning at 180 degrees/s,
/// and no step budget.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct PenguinEnvConfig {
    /// Forward speed of the agent in units per second.
    pub move_speed: f32,

    /// Turn rate of the agent in degrees per second.
    pub turn_speed: f32,

    /// Base swim speed assigned to spawned fish. Zero keeps fish idle.
    pub fish_speed: f32,

    /// Number of fish spawned on every reset.
    pub fish_count: usize,

    /// Step budget of an episode. Enables a `-1 / max_steps` penalty per step.
    pub max_steps: Option<usize>,

    /// Fixed timestep in seconds.
    pub dt: f32,

    /// Center of the area.
    pub center: Vec3,

    /// Height added to every placed entity.
    pub ground_offset: f32,

    /// Where the agent is placed on reset.
    pub agent_wedge: WedgeConfig,

    /// Where the baby is placed on reset.
    pub baby_wedge: WedgeConfig,

    /// Yaw of the baby in degrees.
    pub baby_yaw: f32,

    /// Where fish are spawned.
    pub fish_wedge: WedgeConfig,

    /// Where fish pick their next destination.
    pub fish_target_wedge: WedgeConfig,

    /// Contact radii of the kinematic physics adapter.
    pub contact: ContactConfig,
}

impl Default for PenguinEnvConfig {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            turn_speed: 180.0,
            fish_speed: 0.5,
            fish_count: 4,
            max_steps: None,
            dt: 0.02,
            center: Vec3::ZERO,
            ground_offset: 0.5,
            agent_wedge: WedgeConfig::new(0.0, 360.0, 0.0, 9.0),
            baby_wedge: WedgeConfig::new(-45.0, 45.0, 4.0, 9.0),
            baby_yaw: 180.0,
            fish_wedge: WedgeConfig::new(100.0, 260.0, 2.0, 13.0),
            fish_target_wedge: WedgeConfig::new(100.0, 260.0, 2.0, 13.0),
            contact: ContactConfig::default(),
        }
    }
}

impl PenguinEnvConfig {
    /// Sets the forward speed of the agent.
    pub fn move_speed(mut self, v: f32) -> Self {
        self.move_speed = v;
        self
    }

    /// Sets the turn rate of the agent.
    pub fn turn_speed(mut self, v: f32) -> Self {
        self.turn_speed = v;
        self
    }

    /// Sets the base speed of spawned fish.
    pub fn fish_speed(mut self, v: f32) -> Self {
        self.fish_speed = v;
        self
    }

    /// Sets the number of fish spawned on reset.
    pub fn fish_count(mut self, v: usize) -> Self {
        self.fish_count = v;
        self
    }

    /// Sets the step budget.
    pub fn max_steps(mut self, v: Option<usize>) -> Self {
        self.max_steps = v;
        self
    }

    /// Sets the fixed timestep.
    pub fn dt(mut self, v: f32) -> Self {
        self.dt = v;
        self
    }

    /// Sets the center of the area.
    pub fn center(mut self, v: Vec3) -> Self {
        self.center = v;
        self
    }

    /// Sets the agent placement wedge.
    pub fn agent_wedge(mut self, v: WedgeConfig) -> Self {
        self.agent_wedge = v;
        self
    }

    /// Sets the baby placement wedge.
    pub fn baby_wedge(mut self, v: WedgeConfig) -> Self {
        self.baby_wedge = v;
        self
    }

    /// Sets the fish spawn wedge.
    pub fn fish_wedge(mut self, v: WedgeConfig) -> Self {
        self.fish_wedge = v;
        self
    }

    /// Sets the wedge fish pick destinations from.
    pub fn fish_target_wedge(mut self, v: WedgeConfig) -> Self {
        self.fish_target_wedge = v;
        self
    }

    /// Sets the contact radii.
    pub fn contact(mut self, v: ContactConfig) -> Self {
        self.contact = v;
        self
    }

    /// Checks every value, so that sampling never sees inverted bounds.
    pub fn validate(&self) -> Result<(), PenguinError> {
        self.agent_wedge.validate("agent_wedge")?;
        self.baby_wedge.validate("baby_wedge")?;
        self.fish_wedge.validate("fish_wedge")?;
        self.fish_target_wedge.validate("fish_target_wedge")?;

        let non_negative = [
            ("move_speed", self.move_speed),
            ("turn_speed", self.turn_speed),
            ("fish_speed", self.fish_speed),
            ("contact.agent_radius", self.contact.agent_radius),
            ("contact.fish_radius", self.contact.fish_radius),
            ("contact.baby_radius", self.contact.baby_radius),
        ];
        for (name, v) in non_negative {
            if !v.is_finite() || v < 0.0 {
                return Err(PenguinError::InvalidConfig(format!(
                    "{} must be finite and non-negative, got {}",
                    name, v
                )));
            }
        }
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(PenguinError::InvalidConfig(format!(
                "dt must be positive, got {}",
                self.dt
            )));
        }
        if self.max_steps == Some(0) {
            return Err(PenguinError::InvalidConfig(
                "max_steps must be positive when set".to_string(),
            ));
        }
        if !self.center.is_finite()
            || !self.ground_offset.is_finite()
            || !self.baby_yaw.is_finite()
        {
            return Err(PenguinError::InvalidConfig(
                "center, ground_offset and baby_yaw must be finite".to_string(),
            ));
        }
        Ok(())
    }

    /// Constructs [`PenguinEnvConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`PenguinEnvConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
