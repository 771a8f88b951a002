//! Decision, action and reward loop of the penguin agent.
use crate::{
    physics::{Body, Contact, Physics},
    Area, FishId, PenguinAct, PenguinEnvConfig, PenguinObs,
};
use log::{debug, info};
use rand::Rng;
use std::collections::VecDeque;

/// Reward for eating a fish.
pub const EAT_REWARD: f32 = 1.0;

/// Reward for feeding the baby.
pub const FEED_REWARD: f32 = 1.0;

/// Something that happened to the agent during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentEvent {
    /// The agent ate a fish and now carries it.
    Ate(FishId),

    /// The agent fed the baby. `fish_remaining` is counted after the feed.
    Fed {
        /// Fish left in the area.
        fish_remaining: usize,
    },

    /// The last fish was delivered and the episode reached its terminal state.
    EpisodeEnded,
}

/// The agent: a stomach holding at most one fish, a body and a reward tally.
///
/// Contacts reported by the physics service are queued with
/// [`AgentController::push_contact`] and handled in order by
/// [`AgentController::handle_contacts`].
pub struct AgentController {
    body: Body,
    move_speed: f32,
    turn_speed: f32,
    dt: f32,
    max_steps: Option<usize>,
    stomach_full: bool,
    cumulative_reward: f32,
    step_reward: f32,
    terminated: bool,
    contacts: VecDeque<Contact>,
    events: Vec<AgentEvent>,
}

impl AgentController {
    /// Creates the agent of an area.
    pub fn initialize(config: &PenguinEnvConfig) -> Self {
        Self {
            body: Body::default(),
            move_speed: config.move_speed,
            turn_speed: config.turn_speed,
            dt: config.dt,
            max_steps: config.max_steps,
            stomach_full: false,
            cumulative_reward: 0.0,
            step_reward: 0.0,
            terminated: false,
            contacts: VecDeque::new(),
            events: Vec::new(),
        }
    }

    /// The agent body.
    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Mutable access for the physics service.
    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    /// Whether the agent carries a fish.
    pub fn stomach_full(&self) -> bool {
        self.stomach_full
    }

    /// Reward accumulated since the episode began.
    pub fn cumulative_reward(&self) -> f32 {
        self.cumulative_reward
    }

    /// Whether the episode reached its terminal state.
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Starts an episode: empties the stomach and resets the area.
    pub fn on_episode_begin<R, P>(&mut self, area: &mut Area, rng: &mut R, physics: &mut P)
    where
        R: Rng + ?Sized,
        P: Physics + ?Sized,
    {
        self.stomach_full = false;
        self.cumulative_reward = 0.0;
        self.step_reward = 0.0;
        self.terminated = false;
        self.contacts.clear();
        self.events.clear();
        area.reset_area(rng, &mut self.body, physics);
    }

    /// Observation of the agent in `area`.
    pub fn collect_observations(&self, area: &Area) -> PenguinObs {
        PenguinObs::new(
            self.stomach_full,
            area.baby().position - self.body.position,
            self.body.forward(),
        )
    }

    /// Requests the motion of `act` from the physics service and applies the
    /// step penalty when a step budget is configured.
    pub fn apply_action<P: Physics + ?Sized>(&mut self, act: &PenguinAct, physics: &mut P) {
        let distance = act.forward_amount() * self.move_speed * self.dt;
        physics.move_position(self.body.forward() * distance);
        physics.rotate(act.turn_amount() * self.turn_speed * self.dt);

        if let Some(max_steps) = self.max_steps {
            self.add_reward(-1.0 / max_steps as f32);
        }
    }

    /// Adds to the reward of the current step.
    pub fn add_reward(&mut self, reward: f32) {
        self.step_reward += reward;
        self.cumulative_reward += reward;
    }

    /// Queues a contact to be handled by [`AgentController::handle_contacts`].
    pub fn push_contact(&mut self, contact: Contact) {
        self.contacts.push_back(contact);
    }

    /// Handles every queued contact in arrival order.
    pub fn handle_contacts(&mut self, area: &mut Area) {
        while let Some(contact) = self.contacts.pop_front() {
            self.on_contact(contact, area);
        }
    }

    /// Reacts to a contact with an entity of `area`.
    ///
    /// Eating while full, feeding while empty and touching a fish that is
    /// already gone leave the state untouched.
    pub fn on_contact(&mut self, contact: Contact, area: &mut Area) {
        if self.terminated {
            return;
        }
        match contact {
            Contact::Fish(id) => self.eat(id, area),
            Contact::Baby => self.feed(area),
        }
    }

    fn eat(&mut self, id: FishId, area: &mut Area) {
        if self.stomach_full {
            debug!("Touched {:?} with a full stomach", id);
            return;
        }
        if area.remove_specific_fish(id).is_none() {
            debug!("Touched {:?}, which is no longer in the area", id);
            return;
        }
        self.stomach_full = true;
        self.add_reward(EAT_REWARD);
        self.events.push(AgentEvent::Ate(id));
        debug!("Ate {:?}, {} fish remaining", id, area.fish_remaining());
    }

    fn feed(&mut self, area: &Area) {
        if !self.stomach_full {
            return;
        }
        self.stomach_full = false;
        self.add_reward(FEED_REWARD);
        let fish_remaining = area.fish_remaining();
        self.events.push(AgentEvent::Fed { fish_remaining });
        debug!("Fed the baby, {} fish remaining", fish_remaining);

        if fish_remaining == 0 {
            self.terminated = true;
            self.events.push(AgentEvent::EpisodeEnded);
            info!(
                "All fish delivered, cumulative reward = {}",
                self.cumulative_reward
            );
        }
    }

    /// Returns the reward of the current step and starts a new one.
    pub fn take_step_reward(&mut self) -> f32 {
        std::mem::take(&mut self.step_reward)
    }

    /// Returns the events since the last call.
    pub fn take_events(&mut self) -> Vec<AgentEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{KinematicPhysics, Move, Turn};
    use glam::Vec3;
    use rand::{rngs::SmallRng, SeedableRng};

    fn setup(config: &PenguinEnvConfig) -> (AgentController, Area, KinematicPhysics) {
        let mut agent = AgentController::initialize(config);
        let mut area = Area::new(config);
        let mut physics = KinematicPhysics::build(config);
        let mut rng = SmallRng::seed_from_u64(23);
        agent.on_episode_begin(&mut area, &mut rng, &mut physics);
        (agent, area, physics)
    }

    #[test]
    fn eating_while_full_is_ignored() {
        let (mut agent, mut area, _) = setup(&PenguinEnvConfig::default());
        let ids: Vec<FishId> = area.fish().iter().map(|f| f.id()).collect();

        agent.on_contact(Contact::Fish(ids[0]), &mut area);
        agent.on_contact(Contact::Fish(ids[1]), &mut area);
        agent.on_contact(Contact::Fish(ids[1]), &mut area);

        assert!(agent.stomach_full());
        assert_eq!(area.fish_remaining(), 3);
        assert_eq!(agent.cumulative_reward(), EAT_REWARD);
        assert_eq!(agent.take_events(), vec![AgentEvent::Ate(ids[0])]);
    }

    #[test]
    fn feeding_with_an_empty_stomach_is_ignored() {
        let (mut agent, mut area, _) = setup(&PenguinEnvConfig::default());
        agent.on_contact(Contact::Baby, &mut area);
        assert!(!agent.stomach_full());
        assert_eq!(agent.cumulative_reward(), 0.0);
        assert!(agent.take_events().is_empty());
    }

    #[test]
    fn stale_fish_contact_is_ignored() {
        let (mut agent, mut area, _) = setup(&PenguinEnvConfig::default());
        let id = area.fish()[0].id();
        area.remove_specific_fish(id);

        agent.on_contact(Contact::Fish(id), &mut area);
        assert!(!agent.stomach_full());
        assert_eq!(agent.cumulative_reward(), 0.0);
    }

    #[test]
    fn delivering_the_last_fish_terminates_once() {
        let config = PenguinEnvConfig::default().fish_count(1);
        let (mut agent, mut area, _) = setup(&config);
        let id = area.fish()[0].id();

        agent.push_contact(Contact::Fish(id));
        agent.push_contact(Contact::Baby);
        agent.push_contact(Contact::Baby);
        agent.handle_contacts(&mut area);

        assert!(agent.is_terminated());
        assert_eq!(agent.take_step_reward(), EAT_REWARD + FEED_REWARD);
        assert_eq!(
            agent.take_events(),
            vec![
                AgentEvent::Ate(id),
                AgentEvent::Fed { fish_remaining: 0 },
                AgentEvent::EpisodeEnded
            ]
        );
    }

    #[test]
    fn step_penalty_follows_the_budget() {
        let config = PenguinEnvConfig::default().max_steps(Some(5000));
        let (mut agent, _, mut physics) = setup(&config);
        agent.apply_action(&PenguinAct::idle(), &mut physics);
        assert_eq!(agent.take_step_reward(), -1.0 / 5000.0);

        let (mut agent, _, mut physics) = setup(&PenguinEnvConfig::default());
        agent.apply_action(&PenguinAct::idle(), &mut physics);
        assert_eq!(agent.take_step_reward(), 0.0);
    }

    #[test]
    fn action_moves_and_turns_through_physics() {
        let config = PenguinEnvConfig::default();
        let (mut agent, area, mut physics) = setup(&config);
        let start = agent.body().clone();

        agent.apply_action(&PenguinAct::new(Move::Forward, Turn::Right), &mut physics);
        assert_eq!(agent.body().position, start.position);

        physics.simulate(agent.body_mut(), &area, config.dt);
        let moved = agent.body().position - start.position;
        assert!(moved.abs_diff_eq(start.forward() * 5.0 * 0.02, 1e-5));
        let turned = (agent.body().yaw - start.yaw).rem_euclid(360.0);
        assert!((turned - 3.6).abs() < 1e-3);
    }

    #[test]
    fn episode_begin_empties_the_stomach() {
        let config = PenguinEnvConfig::default();
        let (mut agent, mut area, mut physics) = setup(&config);
        let id = area.fish()[0].id();
        agent.on_contact(Contact::Fish(id), &mut area);
        assert!(agent.stomach_full());

        let mut rng = SmallRng::seed_from_u64(1);
        agent.on_episode_begin(&mut area, &mut rng, &mut physics);
        assert!(!agent.stomach_full());
        assert_eq!(agent.cumulative_reward(), 0.0);
        assert_eq!(area.fish_remaining(), 4);
        assert_eq!(agent.body().linear_velocity, Vec3::ZERO);
    }
}
