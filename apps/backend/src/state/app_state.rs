use sea_orm::DatabaseConnection;

use crate::realtime::EventHub;
use crate::services::round_engine::RoundEngine;

/// Application state containing shared resources
#[derive(Debug, Clone)]
pub struct AppState {
    db: DatabaseConnection,
    engine: RoundEngine,
    hub: EventHub,
}

impl AppState {
    pub fn new(db: DatabaseConnection, engine: RoundEngine, hub: EventHub) -> Self {
        Self { db, engine, hub }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn engine(&self) -> &RoundEngine {
        &self.engine
    }

    /// Subscribe here for engine events.
    pub fn hub(&self) -> &EventHub {
        &self.hub
    }
}
