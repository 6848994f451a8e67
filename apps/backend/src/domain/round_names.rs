use rand::seq::IndexedRandom;
use rand::Rng;

/// Names used when an operator creates a round without one.
pub const DEFAULT_ROUND_NAMES: [&str; 4] = ["Mouse Game", "Dog", "Cat", "Rabbit"];

/// Use the supplied name when it has content, else pick a default at random.
pub fn round_name_or_default<R: Rng + ?Sized>(name: Option<&str>, rng: &mut R) -> String {
    match name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(n) => n.to_owned(),
        None => DEFAULT_ROUND_NAMES
            .choose(rng)
            .copied()
            .unwrap_or(DEFAULT_ROUND_NAMES[0])
            .to_owned(),
    }
}
