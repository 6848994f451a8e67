use std::sync::Arc;

use crate::config::db::DbProfile;
use crate::config::engine::EngineConfig;
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::realtime::EventHub;
use crate::services::round_engine::RoundEngine;
use crate::state::app_state::AppState;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    db_profile: DbProfile,
    engine_config: EngineConfig,
    hub: Option<EventHub>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            db_profile: DbProfile::Prod,
            engine_config: EngineConfig::default(),
            hub: None,
        }
    }

    pub fn with_db(mut self, profile: DbProfile) -> Self {
        self.db_profile = profile;
        self
    }

    pub fn with_engine_config(mut self, config: EngineConfig) -> Self {
        self.engine_config = config;
        self
    }

    /// Share an existing hub instead of creating a fresh one.
    pub fn with_event_hub(mut self, hub: EventHub) -> Self {
        self.hub = Some(hub);
        self
    }

    /// Connect, migrate, then restore whatever round was open.
    pub async fn build(self) -> Result<AppState, AppError> {
        let db = bootstrap_db(self.db_profile).await?;
        let hub = self.hub.unwrap_or_default();
        let engine = RoundEngine::new(db.clone(), self.engine_config, Arc::new(hub.clone()));
        engine.restore().await?;
        Ok(AppState::new(db, engine, hub))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
