//! Default implementation of the [`Evaluator`] trait.
//!
//! This module provides a simple evaluator that runs a fixed number of episodes
//! and calculates the average return and length across all episodes.
use super::Evaluator;
use crate::{
    record::{Record, RecordValue::Scalar},
    Env, Policy,
};
use anyhow::Result;
use log::info;

/// A default implementation of the [`Evaluator`] trait.
///
/// Every evaluation episode starts with [`Env::reset_with_index`], so an
/// environment that seeds its random source with the index replays the
/// same episodes on every evaluation.
///
/// # Examples
///
/// ```ignore
/// let config = PenguinEnvConfig::default();
/// let mut evaluator = DefaultEvaluator::<PenguinEnv>::new(&config, 42, 10)?;
///
/// let record = evaluator.evaluate(&mut policy)?;
/// println!("Average return: {}", record.get_scalar("Episode return")?);
/// ```
pub struct DefaultEvaluator<E: Env> {
    /// The number of episodes to run during evaluation.
    n_episodes: usize,

    /// The environment instance used for evaluation.
    env: E,
}

impl<E: Env> Evaluator<E> for DefaultEvaluator<E> {
    /// Runs `n_episodes` episodes and records the mean return as
    /// `"Episode return"` and the mean number of steps as `"Episode length"`.
    fn evaluate<P>(&mut self, policy: &mut P) -> Result<Record>
    where
        P: Policy<E>,
    {
        let mut r_total = 0f32;
        let mut len_total = 0usize;

        for ix in 0..self.n_episodes {
            let mut prev_obs = self.env.reset_with_index(ix)?;

            loop {
                let act = policy.sample(&prev_obs);
                let (step, _) = self.env.step(&act);
                r_total += step.reward;
                len_total += 1;
                if step.is_done() {
                    break;
                }
                prev_obs = step.obs;
            }
        }

        let n = self.n_episodes.max(1) as f32;
        let mean_return = r_total / n;
        info!(
            "Evaluated {} episodes, mean return = {}",
            self.n_episodes, mean_return
        );

        Ok(Record::from_slice(&[
            ("Episode return", Scalar(mean_return)),
            ("Episode length", Scalar(len_total as f32 / n)),
        ]))
    }
}

impl<E: Env> DefaultEvaluator<E> {
    /// Constructs a new [`DefaultEvaluator`].
    ///
    /// * `config` - Configuration for the environment
    /// * `seed` - Random seed for environment initialization
    /// * `n_episodes` - Number of episodes to run during evaluation
    pub fn new(config: &E::Config, seed: i64, n_episodes: usize) -> Result<Self> {
        Ok(Self {
            n_episodes,
            env: E::build(config, seed)?,
        })
    }

    /// Returns the environment used for evaluation.
    pub fn env(&self) -> &E {
        &self.env
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_env::{CountdownEnv, UnitPolicy};

    #[test]
    fn averages_return_and_length_over_episodes() -> Result<()> {
        let mut evaluator = DefaultEvaluator::<CountdownEnv>::new(&4, 0, 3)?;
        let record = evaluator.evaluate(&mut UnitPolicy)?;

        assert_eq!(record.get_scalar("Episode return")?, 4.0);
        assert_eq!(record.get_scalar("Episode length")?, 4.0);
        assert_eq!(evaluator.env().resets(), 3);
        Ok(())
    }
}
