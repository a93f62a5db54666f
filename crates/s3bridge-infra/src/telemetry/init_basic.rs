use s3bridge_core::LogFormat;
use tracing_subscriber::{
    fmt::format::Format, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

const DEFAULT_FILTER: &str = "info,s3bridge_api=debug,s3bridge_storage=debug,tower_http=debug";

/// Install the global tracing subscriber.
///
/// `RUST_LOG` overrides the default filter. Development uses a compact console format;
/// production emits one JSON object per event.
pub fn init_telemetry(
    format: LogFormat,
    environment: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true),
            )
            .try_init()?,
        LogFormat::Compact => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .event_format(Format::default().compact().with_target(false)),
            )
            .try_init()?,
    }

    tracing::info!(environment = %environment, format = ?format, "Tracing initialized");
    Ok(())
}

pub async fn shutdown_telemetry() {
    tracing::debug!("Telemetry shutdown");
}
