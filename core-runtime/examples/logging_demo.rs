//! Logging system demonstration
//!
//! This example shows how to use the logging infrastructure in different modes.
//!
//! Run with:
//! ```bash
//! # Pretty format (default in debug)
//! cargo run --example logging_demo
//!
//! # JSON format
//! cargo run --example logging_demo -- json
//!
//! # Compact format
//! cargo run --example logging_demo -- compact
//!
//! # With custom filter
//! cargo run --example logging_demo -- pretty "core_runtime=trace"
//! ```

use bridge_traits::time::{ConsoleLogger, LogLevel};
use core_runtime::logging::{
    blur_coordinate, init_logging, redact_if_sensitive, LogFormat, LoggingConfig,
};
use std::env;
use std::sync::Arc;
use tracing::{debug, info, span, warn, Level};

#[tokio::main]
async fn main() {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let format = if args.len() > 1 {
        match args[1].as_str() {
            "json" => LogFormat::Json,
            "compact" => LogFormat::Compact,
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Pretty,
        }
    } else {
        LogFormat::default()
    };

    let filter = args.get(2).cloned();

    // Initialize logging with a console sink mirroring every event
    let mut config = LoggingConfig::default()
        .with_format(format)
        .with_level(LogLevel::Trace)
        .with_logger_sink(Arc::new(ConsoleLogger {
            min_level: LogLevel::Debug,
        }))
        .with_spans(true)
        .with_target(true);

    if let Some(f) = filter {
        config = config.with_filter(f);
    }

    init_logging(config).expect("Failed to initialize logging");

    info!("=== Logging System Demo ===");
    info!(format = ?format, "Logging initialized");

    // Span context the way the probe sequence uses it
    let probe_span = span!(Level::INFO, "capability_probe", capability = "device");
    let _enter = probe_span.enter();

    info!("Probing device information");

    // Device identifiers must never reach the logs unredacted
    let uuid = "9f2d4c1a-7b3e-42f1-9d6a-001122334455";
    debug!(
        uuid = %redact_if_sensitive("uuid", uuid),
        model = "Pixel 8",
        "Device info collected"
    );

    // Position fixes are blurred to ~1 km before logging
    debug!(
        latitude = blur_coordinate(59.913869),
        longitude = blur_coordinate(10.752245),
        "Position acquired"
    );

    // Tolerated probe failures surface as warnings
    warn!(
        capability = "battery",
        error = "no battery present on this host",
        "Capability probe failed"
    );

    drop(_enter);

    info!("=== Demo complete ===");

    // Give the sink's spawned forwarding tasks a moment to drain
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
}
