#![warn(missing_docs)]
//! Interfaces between episodic environments and the code that drives them.
//!
//! An external training harness interacts with an environment only through
//! [`Env`]: it resets episodes, applies one action per tick, and reads the
//! observation, reward and termination flags carried by [`Step`].
//! [`record`] holds the key-value records emitted alongside every step, and
//! [`Evaluator`] runs whole episodes with a [`Policy`].
pub mod error;
pub mod record;
pub mod util;

mod base;
pub use base::{Act, Env, Info, Obs, Policy, Step};

mod evaluator;
pub use evaluator::{DefaultEvaluator, Evaluator};

#[cfg(test)]
mod test_env;
