//! Shared test helpers for the bingo backend.
//!
//! Integration tests of every workspace member install logging through
//! [`logging::init`] and build collision-free fixture names through
//! [`unique_helpers`].

pub mod logging;
pub mod unique_helpers;
