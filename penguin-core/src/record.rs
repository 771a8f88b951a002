//! Records emitted by environments and evaluators.
//!
//! A [`Record`] is a flexible container of key-value pairs. Environments
//! return one with every [`Step`](crate::Step), carrying values that are not
//! part of the observation, such as the number of fish left in the area.
//!
//! ```rust
//! use penguin_core::record::{Record, RecordValue};
//!
//! let mut record = Record::empty();
//! record.insert("fish_remaining", RecordValue::Scalar(3.0));
//! record.insert("obs", RecordValue::Array1(vec![0.0, 4.5]));
//! assert_eq!(record.get_scalar("fish_remaining").unwrap(), 3.0);
//! ```
//!
//! A [`Recorder`] is the sink for records. [`BufferedRecorder`] keeps them in
//! memory for later export and [`NullRecorder`] discards them.
mod base;
mod buffered_recorder;
mod null_recorder;
mod recorder;

pub use base::{Record, RecordValue};
pub use buffered_recorder::BufferedRecorder;
pub use null_recorder::NullRecorder;
pub use recorder::Recorder;
