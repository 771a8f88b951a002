//! Core functionalities.
mod env;
mod policy;
mod step;
pub use env::Env;
pub use policy::Policy;
use std::fmt::Debug;
pub use step::{Info, Step};

/// An observation of an environment.
///
/// Environments in this library are not vectorized, so an observation
/// always describes a single environment instance.
pub trait Obs: Clone + Debug {
    /// Returns the number of scalar values in the observation.
    fn len(&self) -> usize;

    /// Returns `true` if the observation has no values.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An action applied to an environment.
pub trait Act: Clone + Debug {
    /// Returns the number of discrete branches in the action.
    fn len(&self) -> usize;

    /// Returns `true` if the action has no branches.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
