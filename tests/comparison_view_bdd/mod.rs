//! Support modules for comparison view behavioural tests.

pub(crate) mod state;

pub(crate) use state::ViewState;
