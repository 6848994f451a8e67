//! Redis fan-out for engine events and the inbound command channel.
//!
//! Events from the in-process [`EventHub`] are republished as JSON on
//! `bingo:events`; commands arriving on `bingo:commands` are decoded into
//! [`EngineCommand`] and handed to the engine.

use std::time::Duration;

use rand::random;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, RedisError};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tokio_stream::StreamExt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::error::AppError;
use crate::realtime::hub::EventHub;
use crate::realtime::protocol::{EngineCommand, EngineEvent, COMMANDS_CHANNEL, EVENTS_CHANNEL};
use crate::services::round_engine::RoundEngine;

// Subscriber retry configuration (background task)
const INITIAL_RETRY_DELAY_SECS: u64 = 1;
const MAX_RETRY_DELAY_SECS: u64 = 60;
const RETRY_DELAY_MULTIPLIER: f64 = 2.0;
const JITTER_PERCENT: f64 = 0.2;

// Publisher retry configuration
const PUBLISHER_MAX_ATTEMPTS: u32 = 3;
const PUBLISHER_INITIAL_RETRY_DELAY_MS: u64 = 50;
const PUBLISHER_MAX_RETRY_DELAY_MS: u64 = 200;

#[derive(Clone)]
pub struct RealtimeBroker {
    client: Client,
    publisher: ConnectionManager,
}

impl RealtimeBroker {
    pub async fn connect(redis_url: &str) -> Result<Self, AppError> {
        let client = Client::open(redis_url)
            .map_err(|err| AppError::config(format!("Invalid REDIS_URL: {err}")))?;

        let publisher = ConnectionManager::new(client.clone())
            .await
            .map_err(|err| {
                AppError::transport(format!("Unable to initialize Redis connection manager: {err}"))
            })?;

        info!("Redis realtime broker connected");
        Ok(Self { client, publisher })
    }

    /// Publish one event on the events channel, retrying transient failures.
    pub async fn publish_event(&self, event: &EngineEvent) -> Result<(), AppError> {
        let encoded = serde_json::to_string(event)
            .map_err(|err| AppError::internal(format!("Failed to serialize engine event: {err}")))?;

        let mut attempt = 0u32;
        loop {
            attempt += 1;
            let mut publisher = self.publisher.clone();
            match publisher
                .publish::<_, _, ()>(EVENTS_CHANNEL, encoded.clone())
                .await
            {
                Ok(()) => return Ok(()),
                Err(err) => {
                    if attempt >= PUBLISHER_MAX_ATTEMPTS || !is_transient_error(&err) {
                        return Err(AppError::transport(format!(
                            "Failed to publish engine event to Redis: {err}"
                        )));
                    }
                    let delay_ms = PUBLISHER_INITIAL_RETRY_DELAY_MS
                        .saturating_mul(2_u64.pow(attempt - 1))
                        .min(PUBLISHER_MAX_RETRY_DELAY_MS);
                    warn!(
                        error = %err,
                        attempt,
                        retry_delay_ms = delay_ms,
                        "Redis publish failed, retrying"
                    );
                    sleep(Duration::from_millis(delay_ms)).await;
                }
            }
        }
    }

    /// Forward every hub event to Redis until `shutdown` fires.
    pub fn spawn_event_forwarder(&self, hub: &EventHub, shutdown: CancellationToken) -> JoinHandle<()> {
        let broker = self.clone();
        let mut rx = hub.subscribe();
        tokio::spawn(async move {
            loop {
                let next = tokio::select! {
                    _ = shutdown.cancelled() => break,
                    next = rx.recv() => next,
                };
                match next {
                    Ok(event) => {
                        if let Err(err) = broker.publish_event(&event).await {
                            error!(error = %err, event = event.name(), "Dropping engine event");
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "Event forwarder lagged behind the hub");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
            debug!("Event forwarder stopped");
        })
    }

    /// Listen on the commands channel and drive `engine` until `shutdown` fires.
    pub fn spawn_command_listener(
        &self,
        engine: RoundEngine,
        shutdown: CancellationToken,
    ) -> JoinHandle<()> {
        let client = self.client.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = shutdown.cancelled() => {}
                _ = run_subscription_loop_with_retry(client, engine) => {}
            }
            debug!("Command listener stopped");
        })
    }
}

fn is_transient_error(err: &RedisError) -> bool {
    err.is_io_error()
        || err.is_connection_dropped()
        || err.is_connection_refusal()
        || err.is_timeout()
}

fn calculate_retry_delay(attempt: u32) -> Duration {
    let base_delay =
        INITIAL_RETRY_DELAY_SECS as f64 * RETRY_DELAY_MULTIPLIER.powi(attempt as i32 - 1);
    let capped_delay = base_delay.min(MAX_RETRY_DELAY_SECS as f64);

    let jitter_range = capped_delay * JITTER_PERCENT;
    let jitter = (random::<f64>() * 2.0 - 1.0) * jitter_range;
    let final_delay = (capped_delay + jitter).max(0.1);

    Duration::from_secs_f64(final_delay)
}

async fn run_subscription_loop_with_retry(client: Client, engine: RoundEngine) {
    let mut attempt = 0u32;

    loop {
        attempt += 1;

        match run_subscription_loop(&client, &engine).await {
            Ok(()) => {
                info!("Redis command subscription completed normally");
                break;
            }
            Err(err) => {
                if !is_transient_error(&err) {
                    error!(
                        error = %err,
                        attempt,
                        "Redis command subscription failed with permanent error, exiting"
                    );
                    break;
                }

                let delay = calculate_retry_delay(attempt);
                warn!(
                    error = %err,
                    attempt,
                    retry_delay_secs = delay.as_secs_f64(),
                    "Redis command subscription failed, retrying"
                );
                sleep(delay).await;

                if attempt >= 20 {
                    attempt = 10;
                }
            }
        }
    }
}

async fn run_subscription_loop(client: &Client, engine: &RoundEngine) -> Result<(), RedisError> {
    let mut pubsub = client.get_async_pubsub().await?;
    pubsub.subscribe(COMMANDS_CHANNEL).await?;
    info!(channel = COMMANDS_CHANNEL, "Redis command subscription established");

    let mut stream = pubsub.into_on_message();
    while let Some(msg) = stream.next().await {
        let Ok(payload) = msg.get_payload::<String>() else {
            continue;
        };
        match serde_json::from_str::<EngineCommand>(&payload) {
            Ok(command) => {
                if let Err(err) = engine.handle_command(command.clone()).await {
                    warn!(error = %err, ?command, "Engine command failed");
                }
            }
            Err(err) => {
                warn!(error = %err, payload = %payload, "Rejected malformed engine command");
            }
        }
    }

    warn!("Redis command stream ended, connection lost");
    Err(RedisError::from(std::io::Error::new(
        std::io::ErrorKind::ConnectionAborted,
        "Stream ended",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_delay_grows_and_caps() {
        let first = calculate_retry_delay(1).as_secs_f64();
        assert!((0.8..=1.2).contains(&first));
        let capped = calculate_retry_delay(30).as_secs_f64();
        assert!(capped <= MAX_RETRY_DELAY_SECS as f64 * (1.0 + JITTER_PERCENT));
        assert!(capped >= MAX_RETRY_DELAY_SECS as f64 * (1.0 - JITTER_PERCENT));
    }

    #[test]
    fn io_errors_are_transient() {
        let err = RedisError::from(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            "reset",
        ));
        assert!(is_transient_error(&err));
    }
}
