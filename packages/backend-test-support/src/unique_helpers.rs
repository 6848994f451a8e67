//! Unique fixture names for tests sharing one database.

use ulid::Ulid;

/// `{prefix}-{ulid}`; distinct on every call.
///
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("round");
/// let b = unique_str("round");
/// assert_ne!(a, b);
/// assert!(a.starts_with("round-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// A round display name that will not collide with other tests.
pub fn unique_round_name() -> String {
    unique_str("Round")
}

/// A kit display name that will not collide with other tests.
pub fn unique_player_name() -> String {
    unique_str("player")
}
