//! Adapters for external dependencies.

pub mod cards_sea;
pub mod drawn_numbers_sea;
pub mod kits_sea;
pub mod prizes_sea;
pub mod rounds_sea;
