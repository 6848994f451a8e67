//! Logging for integration test binaries: `TEST_LOG`, then `RUST_LOG`, then
//! `warn`.

/// Runs once per test binary before any test.
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}
