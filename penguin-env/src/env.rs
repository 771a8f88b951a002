//! [`Env`] implementation of the penguin area.
use crate::{
    physics::{Contact, Physics},
    AgentController, AgentEvent, Area, KinematicPhysics, PenguinAct, PenguinEnvConfig, PenguinObs,
};
use anyhow::Result;
use log::{info, warn};
use penguin_core::{
    record::{
        Record,
        RecordValue::{self, Scalar},
    },
    Env, Info, Step,
};
use rand::{rngs::SmallRng, SeedableRng};

/// Events of one environment step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PenguinInfo {
    /// What happened to the agent, in order.
    pub events: Vec<AgentEvent>,
}

impl PenguinInfo {
    /// Whether the baby was fed during the step.
    pub fn fed(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, AgentEvent::Fed { .. }))
    }
}

impl Info for PenguinInfo {}

#[cfg_attr(doc, aquamarine::aquamarine)]
/// A penguin catching fish and delivering them to its baby.
///
/// Every [`Env::step`] is one fixed-timestep tick, run in this order:
///
/// ```mermaid
/// graph LR
///     A[Physics::simulate] -->|contacts| B[Area::fixed_update]
///     B --> C[AgentController::apply_action]
///     C --> D[AgentController::handle_contacts]
/// ```
///
/// The physics step integrates the motion requested by the previous action
/// and queues the contacts it finds, the fish swim, then the new action is
/// requested and the queued contacts are handled.
///
/// The episode is terminated when the last fish has been fed to the baby
/// and truncated when the step budget `max_steps` is reached.
pub struct PenguinEnv<P: Physics = KinematicPhysics> {
    config: PenguinEnvConfig,
    seed: i64,
    rng: SmallRng,
    area: Area,
    agent: AgentController,
    physics: P,
    ticks: u64,
    count_steps: usize,
}

impl<P: Physics> PenguinEnv<P> {
    /// Builds the environment around the given physics service and starts
    /// the first episode.
    pub fn with_physics(config: &PenguinEnvConfig, seed: i64, physics: P) -> Result<Self> {
        config.validate()?;
        let mut env = Self {
            config: config.clone(),
            seed,
            rng: SmallRng::seed_from_u64(seed as u64),
            area: Area::new(config),
            agent: AgentController::initialize(config),
            physics,
            ticks: 0,
            count_steps: 0,
        };
        env.begin_episode();
        Ok(env)
    }

    /// The configuration the environment was built with.
    pub fn config(&self) -> &PenguinEnvConfig {
        &self.config
    }

    /// The area.
    pub fn area(&self) -> &Area {
        &self.area
    }

    /// The agent.
    pub fn agent(&self) -> &AgentController {
        &self.agent
    }

    /// The physics service.
    pub fn physics(&self) -> &P {
        &self.physics
    }

    /// Simulation time in seconds, `ticks * dt`. It is not rewound by resets.
    pub fn time(&self) -> f64 {
        self.ticks as f64 * self.config.dt as f64
    }

    /// Ticks run since the environment was built.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Steps taken in the current episode.
    pub fn count_steps(&self) -> usize {
        self.count_steps
    }

    /// Reward accumulated by the agent in the current episode.
    pub fn cumulative_reward(&self) -> f32 {
        self.agent.cumulative_reward()
    }

    /// Current observation of the agent.
    pub fn observe(&self) -> PenguinObs {
        self.agent.collect_observations(&self.area)
    }

    /// Queues a contact reported outside of [`Physics::simulate`]. It is
    /// handled during the next step.
    pub fn push_contact(&mut self, contact: Contact) {
        self.agent.push_contact(contact);
    }

    fn begin_episode(&mut self) {
        self.count_steps = 0;
        self.agent.on_episode_begin(&mut self.area, &mut self.rng, &mut self.physics);
        info!(
            "Episode begins with {} fish at t = {:.2}",
            self.area.fish_remaining(),
            self.time()
        );
    }

    fn tick(&mut self, act: &PenguinAct) -> (f32, Vec<AgentEvent>) {
        let dt = self.config.dt;
        let t = self.time();

        let contacts = self.physics.simulate(self.agent.body_mut(), &self.area, dt);
        for contact in contacts {
            self.agent.push_contact(contact);
        }
        self.area.fixed_update(&mut self.rng, t, dt);
        self.agent.apply_action(act, &mut self.physics);
        self.agent.handle_contacts(&mut self.area);

        self.ticks += 1;
        (self.agent.take_step_reward(), self.agent.take_events())
    }
}

impl<P: Physics> Env for PenguinEnv<P> {
    type Config = PenguinEnvConfig;
    type Obs = PenguinObs;
    type Act = PenguinAct;
    type Info = PenguinInfo;

    fn build(config: &Self::Config, seed: i64) -> Result<Self> {
        Self::with_physics(config, seed, P::build(config))
    }

    fn step(&mut self, act: &Self::Act) -> (Step<Self>, Record) {
        let (reward, events) = self.tick(act);
        self.count_steps += 1;

        let is_terminated = self.agent.is_terminated();
        let is_truncated = !is_terminated
            && self
                .config
                .max_steps
                .map_or(false, |max_steps| self.count_steps >= max_steps);

        let mut record = Record::empty();
        record.insert("fish_remaining", Scalar(self.area.fish_remaining() as f32));
        record.insert("cumulative_reward", Scalar(self.agent.cumulative_reward()));
        if is_terminated || is_truncated {
            let end = if is_terminated { "terminated" } else { "truncated" };
            record.insert("episode_length", Scalar(self.count_steps as f32));
            record.insert("episode_end", RecordValue::String(end.to_string()));
            info!(
                "Episode {} after {} steps, cumulative reward = {}",
                end,
                self.count_steps,
                self.agent.cumulative_reward()
            );
        }

        let step = Step::new(
            self.observe(),
            *act,
            reward,
            is_terminated,
            is_truncated,
            PenguinInfo { events },
            None,
        );
        (step, record)
    }

    fn reset(&mut self) -> Result<Self::Obs> {
        self.begin_episode();
        Ok(self.observe())
    }

    fn step_with_reset(&mut self, a: &Self::Act) -> (Step<Self>, Record) {
        let (mut step, record) = self.step(a);
        if step.is_done() {
            match self.reset() {
                Ok(obs) => step.init_obs = Some(obs),
                Err(e) => warn!("Failed to reset the environment: {}", e),
            }
        }
        (step, record)
    }

    /// Reseeds the random source with `seed + ix` before resetting, so the
    /// same index always produces the same initial placement.
    fn reset_with_index(&mut self, ix: usize) -> Result<Self::Obs> {
        self.rng = SmallRng::seed_from_u64((self.seed as u64).wrapping_add(ix as u64));
        self.reset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Move, Turn};
    use test_log::test;

    #[test]
    fn build_rejects_invalid_config() {
        let config = PenguinEnvConfig::default().dt(-0.1);
        assert!(PenguinEnv::<KinematicPhysics>::build(&config, 0).is_err());
    }

    #[test]
    fn reset_spawns_fish_and_empties_stomach() -> Result<()> {
        let mut env = PenguinEnv::<KinematicPhysics>::build(&PenguinEnvConfig::default(), 0)?;
        let obs = env.reset()?;
        assert_eq!(env.area().fish_remaining(), 4);
        assert!(!obs.stomach_full());
        assert_eq!(env.count_steps(), 0);
        Ok(())
    }

    #[test]
    fn reset_with_index_is_reproducible() -> Result<()> {
        let config = PenguinEnvConfig::default();
        let mut a = PenguinEnv::<KinematicPhysics>::build(&config, 7)?;
        let mut b = PenguinEnv::<KinematicPhysics>::build(&config, 7)?;
        b.step(&PenguinAct::new(Move::Forward, Turn::Left));

        assert_eq!(a.reset_with_index(3)?, b.reset_with_index(3)?);
        let fish_a: Vec<_> = a.area().fish().iter().map(|f| f.position()).collect();
        let fish_b: Vec<_> = b.area().fish().iter().map(|f| f.position()).collect();
        assert_eq!(fish_a, fish_b);
        Ok(())
    }

    #[test]
    fn step_budget_truncates_and_penalizes() -> Result<()> {
        let config = PenguinEnvConfig::default()
            .max_steps(Some(3))
            .contact(crate::ContactConfig {
                agent_radius: 0.0,
                fish_radius: 0.0,
                baby_radius: 0.0,
            });
        let mut env = PenguinEnv::<KinematicPhysics>::build(&config, 1)?;
        env.reset()?;

        for i in 1..=3 {
            let (step, record) = env.step(&PenguinAct::idle());
            assert_eq!(step.reward, -1.0 / 3.0);
            assert!(!step.is_terminated);
            assert_eq!(step.is_truncated, i == 3);
            assert_eq!(record.get("episode_length").is_some(), i == 3);
            if i == 3 {
                assert_eq!(record.get_string("episode_end")?, "truncated");
            }
        }
        Ok(())
    }

    #[test]
    fn time_advances_across_episodes() -> Result<()> {
        let mut env = PenguinEnv::<KinematicPhysics>::build(&PenguinEnvConfig::default(), 0)?;
        for _ in 0..10 {
            env.step(&PenguinAct::idle());
        }
        let t = env.time();
        assert_eq!(env.ticks(), 10);
        assert!((t - 0.2).abs() < 1e-6);
        env.reset()?;
        assert_eq!(env.time(), t);
        Ok(())
    }

    #[test]
    fn clock_and_fish_keep_advancing_after_a_long_run() -> Result<()> {
        let config = PenguinEnvConfig::default().contact(crate::ContactConfig {
            agent_radius: 0.0,
            fish_radius: 0.0,
            baby_radius: 0.0,
        });
        let mut env = PenguinEnv::<KinematicPhysics>::build(&config, 5)?;
        env.ticks = 30_000_000;
        let dt = config.dt as f64;

        // The first tick after the jump replans every fish.
        let t0 = env.time();
        env.step(&PenguinAct::idle());
        assert!((env.time() - t0 - dt).abs() < 1e-8);

        for _ in 0..50 {
            let t = env.time();
            let before: Vec<_> = env.area().fish().to_vec();
            env.step(&PenguinAct::idle());
            assert!((env.time() - t - dt).abs() < 1e-8);

            for (old, new) in before.iter().zip(env.area().fish()) {
                let remaining = old.position().distance(old.target());
                let step = old.speed() * config.dt;
                if remaining > step {
                    assert_eq!(new.target(), old.target());
                    assert!((old.position().distance(new.position()) - step).abs() < 1e-4);
                }
            }
        }
        Ok(())
    }

    #[test]
    fn step_with_reset_provides_the_next_initial_observation() -> Result<()> {
        let config = PenguinEnvConfig::default().max_steps(Some(1));
        let mut env = PenguinEnv::<KinematicPhysics>::build(&config, 2)?;
        let (step, _) = env.step_with_reset(&PenguinAct::idle());
        assert!(step.is_done());
        assert!(step.init_obs.is_some());
        assert_eq!(env.count_steps(), 0);
        Ok(())
    }
}
