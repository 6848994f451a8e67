use std::time::Duration;

use bingo_backend::config::db::DbProfile;
use bingo_backend::config::engine::EngineConfig;
use bingo_backend::infra::state::build_state;
use bingo_backend::realtime::EngineEvent;
use bingo_backend::AppState;
use tokio::sync::broadcast;

/// Pause used by the engine tests; short enough to wait out.
pub const TEST_PRIZE_PAUSE: Duration = Duration::from_millis(200);
pub const TEST_AUTO_DRAW_INTERVAL: Duration = Duration::from_millis(40);

pub fn test_engine_config() -> EngineConfig {
    EngineConfig::default()
        .with_prize_pause(TEST_PRIZE_PAUSE)
        .with_auto_draw_interval(TEST_AUTO_DRAW_INTERVAL)
}

/// Fresh in-memory database, migrated, with the test engine timings.
pub async fn test_state() -> AppState {
    test_state_with(test_engine_config()).await
}

pub async fn test_state_with(config: EngineConfig) -> AppState {
    build_state()
        .with_db(DbProfile::InMemory)
        .with_engine_config(config)
        .build()
        .await
        .expect("build in-memory test state")
}

/// Everything currently buffered on the receiver.
pub fn drain_events(rx: &mut broadcast::Receiver<EngineEvent>) -> Vec<EngineEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}
