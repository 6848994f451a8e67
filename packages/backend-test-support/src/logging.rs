//! Test logging initialization shared by unit and integration tests.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Default filter when neither `TEST_LOG` nor `RUST_LOG` is set.
///
/// SQL statement logging from sqlx/sea-orm is noisy even at `info`, so it is
/// held at `error` unless explicitly requested.
const DEFAULT_FILTER: &str = "warn,sqlx=error,sea_orm=error";

/// Install a test-friendly `tracing` subscriber.
///
/// Idempotent and race-safe. Level precedence:
///
/// 1. `TEST_LOG`
/// 2. `RUST_LOG`
/// 3. [`DEFAULT_FILTER`]
///
/// Output goes through `with_test_writer()` so cargo/nextest capture it per test.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .with_target(false)
            .try_init()
            .ok();

        tracing::debug!("test logging initialized");
    });
}
