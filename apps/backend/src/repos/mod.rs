//! Repository functions for the domain layer.
//!
//! Thin wrappers over the SeaORM adapters that return domain models and
//! `DomainError`.

pub mod cards;
pub mod drawn_numbers;
pub mod kits;
pub mod prizes;
pub mod rounds;
