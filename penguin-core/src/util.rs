//! Utilities for interaction of policies and environments.
use crate::{
    record::{
        Record,
        RecordValue::{Array1, Scalar},
        Recorder,
    },
    Env, Policy,
};
use anyhow::Result;
use log::info;

/// Run episodes with a policy and write one record per environment step.
///
/// Every record holds the `episode` index, the `step` index within the
/// episode, the `reward` of the step and the `obs` after the step, merged
/// into the record returned by the environment. Returns the undiscounted
/// return of every episode.
pub fn eval_with_recorder<E, P, R>(
    env: &mut E,
    policy: &mut P,
    n_episodes: usize,
    recorder: &mut R,
) -> Result<Vec<f32>>
where
    E: Env,
    P: Policy<E>,
    R: Recorder,
    E::Obs: Into<Vec<f32>>,
{
    let mut rs = Vec::new();

    for episode in 0..n_episodes {
        let mut prev_obs = env.reset()?;
        let mut count_step = 0;
        let mut r_total = 0.0;

        loop {
            let act = policy.sample(&prev_obs);
            let (step, record) = env.step(&act);
            r_total += step.reward;

            recorder.write(record.merge(Record::from_slice(&[
                ("reward", Scalar(step.reward)),
                ("episode", Scalar(episode as _)),
                ("step", Scalar(count_step as _)),
                ("obs", Array1(step.obs.clone().into())),
            ])));

            if step.is_done() {
                break;
            }
            prev_obs = step.obs;
            count_step += 1;
        }
        info!(
            "Episode {}, {} steps, return = {}",
            episode,
            count_step + 1,
            r_total
        );
        rs.push(r_total);
    }

    Ok(rs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        record::BufferedRecorder,
        test_env::{CountdownEnv, UnitPolicy},
    };
    use test_log::test;

    #[test]
    fn writes_one_record_per_step() -> Result<()> {
        let mut env = CountdownEnv::build(&3, 0)?;
        let mut recorder = BufferedRecorder::new();

        let returns = eval_with_recorder(&mut env, &mut UnitPolicy, 2, &mut recorder)?;

        assert_eq!(returns, vec![3.0, 3.0]);
        assert_eq!(recorder.len(), 6);
        let last = recorder.iter().last().unwrap();
        assert_eq!(last.get_scalar("episode")?, 1.0);
        assert_eq!(last.get_scalar("step")?, 2.0);
        assert_eq!(last.get_array1("obs")?, vec![0.0]);
        assert_eq!(last.get_scalar("remaining")?, 0.0);
        assert_eq!(last.get_scalar("reward")?, 1.0);
        Ok(())
    }
}
