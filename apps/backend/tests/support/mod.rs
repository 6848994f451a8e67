//! Shared helpers for the engine integration tests.

#![allow(dead_code)]

pub mod fixtures;
pub mod logging;
pub mod test_state;

pub use fixtures::{drawn_all_but, ladder_card, named_kit, seed_drawn, started_round};
pub use test_state::{drain_events, test_state, test_state_with};
