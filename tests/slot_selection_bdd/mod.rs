//! Support modules for slot selection behavioural tests.

pub(crate) mod state;

pub(crate) use state::{SelectionState, named_run};
