//! # Telemetry
//!
//! Console logging is always on: a `tracing_subscriber` registry with an
//! [`EnvFilter`] (default `info`, override with `RUST_LOG`) and a pretty `fmt`
//! layer.
//!
//! With the `metrics` feature, request metrics are additionally recorded as
//! OpenTelemetry instruments and exported to stdout every few seconds:
//!
//! - `requests`: conversion requests received
//! - `errors`: failed requests, labelled by HTTP status
//! - `conversions`: numerals produced
//! - `range_size`: numerals per range request
//! - `request_duration`: end-to-end handling time in milliseconds
//!
//! Without the feature every `record_*` / `increment_*` function is a no-op.
//!
//! ```bash
//! cargo run -p roman-server --features metrics
//! ```

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[cfg(feature = "metrics")]
use opentelemetry::{
    InstrumentationScope, KeyValue,
    metrics::{Counter, Histogram},
};
#[cfg(feature = "metrics")]
use opentelemetry_sdk::{
    Resource,
    metrics::{PeriodicReader, SdkMeterProvider},
};
#[cfg(feature = "metrics")]
use std::sync::OnceLock;

pub struct TelemetryProviders {
    #[cfg(feature = "metrics")]
    pub meter_provider: SdkMeterProvider,
}

impl TelemetryProviders {
    /// Flushes and shuts down any exporters. Failures are reported on stderr
    /// since the subscriber may already be unusable.
    pub fn shutdown(self) {
        #[cfg(feature = "metrics")]
        {
            if let Err(err) = self.meter_provider.force_flush() {
                eprintln!("Error flushing metrics: {err:#?}");
            }
            if let Err(err) = self.meter_provider.shutdown() {
                eprintln!("Error shutting down meter: {err:#?}");
            }
        }
    }
}

pub fn init_telemetry() -> anyhow::Result<TelemetryProviders> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_thread_ids(true)
                .with_line_number(true)
                .with_target(false)
                .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
                .with_file(true)
                .pretty(),
        )
        .try_init()?;

    #[cfg(feature = "metrics")]
    let meter_provider = {
        let provider = init_metrics();
        opentelemetry::global::set_meter_provider(provider.clone());
        let scope = InstrumentationScope::builder("roman")
            .with_version(env!("CARGO_PKG_VERSION"))
            .build();
        init_metric_handles(&opentelemetry::global::meter_with_scope(scope));
        provider
    };

    Ok(TelemetryProviders {
        #[cfg(feature = "metrics")]
        meter_provider,
    })
}

#[cfg(feature = "metrics")]
fn init_metrics() -> SdkMeterProvider {
    let resource = Resource::builder()
        .with_service_name("roman-server")
        .with_attribute(KeyValue::new("service.version", env!("CARGO_PKG_VERSION")))
        .build();

    let reader = PeriodicReader::builder(opentelemetry_stdout::MetricExporter::default())
        .with_interval(std::time::Duration::from_secs(5))
        .build();

    SdkMeterProvider::builder()
        .with_resource(resource)
        .with_reader(reader)
        .build()
}

#[cfg(feature = "metrics")]
struct Metrics {
    requests: Counter<u64>,
    errors: Counter<u64>,
    conversions: Counter<u64>,
    range_size: Histogram<u64>,
    request_duration: Histogram<f64>,
}

#[cfg(feature = "metrics")]
static METRICS: OnceLock<Metrics> = OnceLock::new();

#[cfg(feature = "metrics")]
fn init_metric_handles(meter: &opentelemetry::metrics::Meter) {
    let _ = METRICS.set(Metrics {
        requests: meter
            .u64_counter("requests")
            .with_description("Conversion requests received")
            .build(),
        errors: meter
            .u64_counter("errors")
            .with_description("Failed conversion requests")
            .build(),
        conversions: meter
            .u64_counter("conversions")
            .with_description("Roman numerals produced")
            .build(),
        range_size: meter
            .u64_histogram("range_size")
            .with_description("Numerals produced per range request")
            .build(),
        request_duration: meter
            .f64_histogram("request_duration")
            .with_unit("ms")
            .with_description("End-to-end request handling time")
            .build(),
    });
}

#[cfg(feature = "metrics")]
pub fn increment_requests() {
    if let Some(m) = METRICS.get() {
        m.requests.add(1, &[]);
    }
}

#[cfg(not(feature = "metrics"))]
pub fn increment_requests() {}

#[cfg(feature = "metrics")]
pub fn increment_errors(status: u16) {
    if let Some(m) = METRICS.get() {
        m.errors.add(1, &[KeyValue::new("status", i64::from(status))]);
    }
}

#[cfg(not(feature = "metrics"))]
pub fn increment_errors(_status: u16) {}

/// Records a successful request that produced `count` numerals.
#[cfg(feature = "metrics")]
pub fn record_conversions(count: usize, is_range: bool) {
    if let Some(m) = METRICS.get() {
        m.conversions.add(count as u64, &[]);
        if is_range {
            m.range_size.record(count as u64, &[]);
        }
    }
}

#[cfg(not(feature = "metrics"))]
pub fn record_conversions(_count: usize, _is_range: bool) {}

#[cfg(feature = "metrics")]
pub fn record_request_duration(duration_ms: f64) {
    if let Some(m) = METRICS.get() {
        m.request_duration.record(duration_ms, &[]);
    }
}

#[cfg(not(feature = "metrics"))]
pub fn record_request_duration(_duration_ms: f64) {}
