#![warn(missing_docs)]
//! A foraging environment: a penguin catches randomly swimming fish and
//! delivers them, one at a time, to its baby.
//!
//! [`PenguinEnv`] implements [`penguin_core::Env`]. Per step the agent
//! chooses whether to move forward and whether to turn ([`PenguinAct`]) and
//! observes its stomach, the baby and its own heading ([`PenguinObs`]).
//! Eating a fish and feeding the baby are each rewarded with 1. When a
//! step budget is configured, every step costs `1 / max_steps`.
//!
//! ```no_run
//! use penguin_core::Env as _;
//! use penguin_env::{PenguinAct, PenguinEnv, PenguinEnvConfig};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = PenguinEnvConfig::default().max_steps(Some(5000));
//! let mut env: PenguinEnv = PenguinEnv::build(&config, 42)?;
//! let _obs = env.reset()?;
//! let (step, _record) = env.step(&PenguinAct::idle());
//! println!("reward = {}", step.reward);
//! # Ok(())
//! # }
//! ```
//!
//! Collision detection and rigid-body integration belong to the physics
//! service behind the [`Physics`] trait. [`KinematicPhysics`] is a minimal
//! implementation treating every entity as a sphere.
mod act;
mod agent;
mod area;
mod config;
mod env;
mod error;
mod fish;
mod obs;
mod physics;
pub mod sampler;

pub use act::{Move, PenguinAct, Turn};
pub use agent::{AgentController, AgentEvent, EAT_REWARD, FEED_REWARD};
pub use area::{Area, Baby};
pub use config::{ContactConfig, PenguinEnvConfig, WedgeConfig};
pub use env::{PenguinEnv, PenguinInfo};
pub use error::PenguinError;
pub use fish::{Fish, FishId};
pub use obs::{PenguinObs, OBS_DIM};
pub use physics::{Body, Contact, KinematicPhysics, Physics};
