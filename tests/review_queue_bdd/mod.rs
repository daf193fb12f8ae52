//! Support code for review queue behavioural tests.

pub(crate) mod state;

pub(crate) use state::QueueState;
