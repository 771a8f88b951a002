//! Environment.
use super::{Act, Info, Obs, Step};
use crate::record::Record;
use anyhow::Result;

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Represents an episodic environment, typically an MDP.
///
/// A training harness drives an environment as shown below:
///
/// ```mermaid
/// graph LR
///     Env -->|Obs| Policy
///     Policy -->|Act| Env
///     Env -->|"Step&lt;E: Env&gt;"| Harness
/// ```
///
/// Calls on one instance must not be issued concurrently. Parallel
/// environments are independent instances built from the same config.
pub trait Env {
    /// Configurations.
    type Config: Clone;

    /// Observation of the environment.
    type Obs: Obs;

    /// Action of the environment.
    type Act: Act;

    /// Information in the [`Step`] object.
    type Info: Info;

    /// Builds an environment with a given random seed.
    fn build(config: &Self::Config, seed: i64) -> Result<Self>
    where
        Self: Sized;

    /// Performs an environment step.
    fn step(&mut self, a: &Self::Act) -> (Step<Self>, Record)
    where
        Self: Sized;

    /// Starts a new episode and returns its first observation.
    fn reset(&mut self) -> Result<Self::Obs>;

    /// Performs an environment step and resets the environment if the episode ends.
    ///
    /// When the episode ends, the first observation of the next episode is
    /// stored in [`Step::init_obs`].
    fn step_with_reset(&mut self, a: &Self::Act) -> (Step<Self>, Record)
    where
        Self: Sized;

    /// Resets the environment with a given index.
    ///
    /// The index is used in an arbitrary way. For example, it can be used as a random seed,
    /// which is useful when evaluation of a trained agent. This method is called
    /// in [`DefaultEvaluator`] for every evaluation episode.
    ///
    /// [`DefaultEvaluator`]: crate::DefaultEvaluator
    fn reset_with_index(&mut self, ix: usize) -> Result<Self::Obs>;
}
