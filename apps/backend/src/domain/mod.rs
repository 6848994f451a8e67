//! Pure game rules: cards, the drawn set, drawing and evaluation.
//!
//! Nothing here touches storage or the clock; randomness is injected.

pub mod card_serde;
pub mod card_types;
pub mod dealing;
pub mod drawing;
pub mod drawn_set;
pub mod prizes;
pub mod round_names;
pub mod rules;
pub mod scoring;

#[cfg(test)]
pub mod test_gens;
#[cfg(test)]
pub mod test_prelude;

#[cfg(test)]
mod tests_dealing;
#[cfg(test)]
mod tests_drawing;
#[cfg(test)]
mod tests_props_scoring;
#[cfg(test)]
mod tests_scoring;

pub use card_types::{BingoCard, Cell};
pub use dealing::deal_card;
pub use drawing::draw_number;
pub use drawn_set::DrawnSet;
pub use prizes::PrizeKind;
pub use scoring::{evaluate, WinStatus};
