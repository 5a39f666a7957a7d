use std::time::Duration;
use tracing::{debug, info};

use super::events::ConsentEvent;

const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Sink for consent-transition events.
///
/// Emission is fire-and-forget: implementations must not block the commit
/// path and must swallow their own failures. A failed or dropped event never
/// fails a save.
pub trait TelemetryEmitter: Send + Sync {
    fn emit(&self, event: ConsentEvent);
}

/// Posts events as JSON to a telemetry ingest endpoint.
///
/// The actual send runs on the Tauri async runtime with a timeout; errors
/// are logged at debug level and otherwise ignored.
pub struct HttpEmitter {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpEmitter {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }
}

impl TelemetryEmitter for HttpEmitter {
    fn emit(&self, event: ConsentEvent) {
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        tauri::async_runtime::spawn(async move {
            let send = client.post(&endpoint).json(&event).send();
            match tokio::time::timeout(SEND_TIMEOUT, send).await {
                Ok(Ok(resp)) => {
                    debug!("Telemetry event {} sent: {}", event.kind.event_name(), resp.status());
                }
                Ok(Err(e)) => {
                    debug!("Telemetry send failed (ignored): {}", e);
                }
                Err(_) => {
                    debug!("Telemetry send timed out (ignored)");
                }
            }
        });
    }
}

/// Logs events instead of sending them. Used in dev builds and whenever no
/// ingest endpoint is configured.
pub struct LogEmitter;

impl TelemetryEmitter for LogEmitter {
    fn emit(&self, event: ConsentEvent) {
        info!(
            "Telemetry event (not sent): {}",
            serde_json::to_string(&event).unwrap_or_default()
        );
    }
}
