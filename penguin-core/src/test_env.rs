//! A minimal environment used in tests of this crate.
use crate::{
    record::{Record, RecordValue},
    Act, Env, Obs, Policy, Step,
};
use anyhow::Result;

#[derive(Clone, Debug)]
pub struct CountdownObs(pub f32);

impl Obs for CountdownObs {
    fn len(&self) -> usize {
        1
    }
}

impl From<CountdownObs> for Vec<f32> {
    fn from(obs: CountdownObs) -> Self {
        vec![obs.0]
    }
}

#[derive(Clone, Debug)]
pub struct UnitAct;

impl Act for UnitAct {
    fn len(&self) -> usize {
        1
    }
}

/// Gives reward 1 per step and terminates after `length` steps.
pub struct CountdownEnv {
    length: usize,
    remaining: usize,
    resets: usize,
}

impl CountdownEnv {
    pub fn resets(&self) -> usize {
        self.resets
    }
}

impl Env for CountdownEnv {
    type Config = usize;
    type Obs = CountdownObs;
    type Act = UnitAct;
    type Info = ();

    fn build(config: &Self::Config, _seed: i64) -> Result<Self> {
        Ok(Self {
            length: *config,
            remaining: *config,
            resets: 0,
        })
    }

    fn step(&mut self, a: &Self::Act) -> (Step<Self>, Record) {
        self.remaining -= 1;
        let obs = CountdownObs(self.remaining as f32);
        let step = Step::new(obs, a.clone(), 1.0, self.remaining == 0, false, (), None);
        let record = Record::from_slice(&[
            ("remaining", RecordValue::Scalar(self.remaining as f32)),
            // Overwritten by the reward of the step in `util::eval_with_recorder`.
            ("reward", RecordValue::Scalar(f32::NAN)),
        ]);
        (step, record)
    }

    fn reset(&mut self) -> Result<Self::Obs> {
        self.remaining = self.length;
        self.resets += 1;
        Ok(CountdownObs(self.remaining as f32))
    }

    fn step_with_reset(&mut self, a: &Self::Act) -> (Step<Self>, Record) {
        let (mut step, record) = self.step(a);
        if step.is_done() {
            step.init_obs = self.reset().ok();
        }
        (step, record)
    }

    fn reset_with_index(&mut self, _ix: usize) -> Result<Self::Obs> {
        self.reset()
    }
}

pub struct UnitPolicy;

impl Policy<CountdownEnv> for UnitPolicy {
    fn sample(&mut self, _obs: &CountdownObs) -> UnitAct {
        UnitAct
    }
}
