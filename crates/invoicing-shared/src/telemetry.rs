//! Telemetry setup

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::AppError;

/// Installs the JSON subscriber. Keep the returned guard alive for the
/// lifetime of the process or buffered log lines are dropped.
pub fn init_telemetry() -> Result<WorkerGuard, AppError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().json().with_target(true).with_writer(writer))
        .try_init()
        .map_err(|e| AppError::TelemetryError(e.to_string()))?;
    Ok(guard)
}
