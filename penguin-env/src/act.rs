//! Discrete action of the penguin agent.
use crate::PenguinError;
use penguin_core::Act;
use std::convert::TryFrom;

/// Branch 0 of the action: whether to swim forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Move {
    /// Stay in place.
    Hold,
    /// Move forward at full speed.
    Forward,
}

/// Branch 1 of the action: whether to turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Turn {
    /// Keep the heading.
    None,
    /// Turn in the negative direction at full rate.
    Left,
    /// Turn in the positive direction at full rate.
    Right,
}

impl TryFrom<i32> for Move {
    type Error = PenguinError;

    fn try_from(v: i32) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Move::Hold),
            1 => Ok(Move::Forward),
            _ => Err(PenguinError::InvalidAction(format!(
                "move branch must be 0 or 1, got {}",
                v
            ))),
        }
    }
}

impl TryFrom<i32> for Turn {
    type Error = PenguinError;

    fn try_from(v: i32) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Turn::None),
            1 => Ok(Turn::Left),
            2 => Ok(Turn::Right),
            _ => Err(PenguinError::InvalidAction(format!(
                "turn branch must be 0, 1 or 2, got {}",
                v
            ))),
        }
    }
}

/// Action of the agent, two discrete branches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PenguinAct {
    /// Branch 0.
    pub movement: Move,

    /// Branch 1.
    pub turn: Turn,
}

impl PenguinAct {
    /// Number of choices of each branch.
    pub const BRANCH_SIZES: [usize; 2] = [2, 3];

    /// Constructs an action.
    pub fn new(movement: Move, turn: Turn) -> Self {
        Self { movement, turn }
    }

    /// An action that neither moves nor turns.
    pub fn idle() -> Self {
        Self::new(Move::Hold, Turn::None)
    }

    /// Decodes the raw branch values emitted by a policy.
    pub fn from_branches(branches: &[i32]) -> Result<Self, PenguinError> {
        match branches {
            [m, t] => Ok(Self::new(Move::try_from(*m)?, Turn::try_from(*t)?)),
            _ => Err(PenguinError::InvalidAction(format!(
                "expected 2 branches, got {}",
                branches.len()
            ))),
        }
    }

    /// Raw branch values.
    pub fn branches(&self) -> [i32; 2] {
        let m = match self.movement {
            Move::Hold => 0,
            Move::Forward => 1,
        };
        let t = match self.turn {
            Turn::None => 0,
            Turn::Left => 1,
            Turn::Right => 2,
        };
        [m, t]
    }

    /// Forward amount in `{0, 1}`.
    pub fn forward_amount(&self) -> f32 {
        match self.movement {
            Move::Hold => 0.0,
            Move::Forward => 1.0,
        }
    }

    /// Turn amount in `{-1, 0, 1}`.
    pub fn turn_amount(&self) -> f32 {
        match self.turn {
            Turn::None => 0.0,
            Turn::Left => -1.0,
            Turn::Right => 1.0,
        }
    }
}

impl Act for PenguinAct {
    fn len(&self) -> usize {
        Self::BRANCH_SIZES.len()
    }
}
