use bingo_backend::config::db::DbProfile;
use bingo_backend::config::engine::EngineConfig;
use bingo_backend::infra::state::build_state;
use bingo_backend::realtime::broker::RealtimeBroker;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

mod telemetry;

#[tokio::main]
async fn main() {
    telemetry::init_tracing();

    let engine_config = match EngineConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid engine configuration");
            std::process::exit(1);
        }
    };
    let redis_url = engine_config.redis_url.clone();

    let app_state = match build_state()
        .with_db(DbProfile::Prod)
        .with_engine_config(engine_config)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "Failed to build application state");
            std::process::exit(1);
        }
    };

    let shutdown = CancellationToken::new();
    let mut tasks = Vec::new();

    match redis_url {
        Some(url) => match RealtimeBroker::connect(&url).await {
            Ok(broker) => {
                tasks.push(broker.spawn_event_forwarder(app_state.hub(), shutdown.clone()));
                tasks.push(
                    broker.spawn_command_listener(app_state.engine().clone(), shutdown.clone()),
                );
            }
            Err(e) => {
                error!(error = %e, "Failed to connect realtime broker");
                std::process::exit(1);
            }
        },
        None => warn!("REDIS_URL not set, engine events stay in-process"),
    }

    info!(round = ?app_state.engine().snapshot(), "Bingo engine running");

    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
    }

    info!("Shutting down");
    shutdown.cancel();
    for task in tasks {
        let _ = task.await;
    }
}
