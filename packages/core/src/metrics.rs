//! Prometheus metrics registry for the holiday resolver.
//!
//! [`AppMetrics`] owns all registered metrics and the [`Registry`] they
//! belong to. Construct it once at startup, wrap in `Arc`, and hand it to
//! the [`HolidayResolver`](crate::holidays::HolidayResolver) and the HTTP
//! layer.
//!
//! Exposed at `GET /metrics` in Prometheus text exposition format
//! (`text/plain; version=0.0.4`).

use prometheus::{Counter, CounterVec, Histogram, HistogramOpts, Opts, Registry};

/// All application-level Prometheus metrics.
pub struct AppMetrics {
    /// Lookups answered from the local store without a provider call.
    pub store_hits_total: Counter,
    /// Provider calls made on a store miss.
    pub provider_fetches_total: Counter,
    /// Failed provider calls, labelled by failure kind.
    pub provider_errors_total: CounterVec,
    /// Failed attempts to persist provider data.
    pub persist_errors_total: Counter,
    /// HTTP request count, labelled by method, path, and status code.
    pub http_requests_total: CounterVec,
    /// HTTP request latency histogram in seconds.
    pub http_request_duration: Histogram,
    /// The registry that owns all of the above metrics.
    pub registry: Registry,
}

impl AppMetrics {
    /// Create and register all metrics. Returns an error if any metric
    /// name is invalid or duplicated.
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let store_hits_total = Counter::with_opts(Opts::new(
            "holiday_resolver_store_hits_total",
            "Lookups served from the local holiday store",
        ))?;

        let provider_fetches_total = Counter::with_opts(Opts::new(
            "holiday_resolver_provider_fetches_total",
            "Holiday provider calls made on a store miss",
        ))?;

        let provider_errors_total = CounterVec::new(
            Opts::new(
                "holiday_resolver_provider_errors_total",
                "Failed holiday provider calls by kind",
            ),
            &["kind"],
        )?;

        let persist_errors_total = Counter::with_opts(Opts::new(
            "holiday_resolver_persist_errors_total",
            "Failed writes of provider data to the store",
        ))?;

        let http_requests_total = CounterVec::new(
            Opts::new(
                "holiday_resolver_http_requests_total",
                "HTTP requests by method, path, and status",
            ),
            &["method", "path", "status"],
        )?;

        let http_request_duration = Histogram::with_opts(
            HistogramOpts::new(
                "holiday_resolver_http_request_duration_seconds",
                "HTTP request latency in seconds",
            )
            .buckets(vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]),
        )?;

        registry.register(Box::new(store_hits_total.clone()))?;
        registry.register(Box::new(provider_fetches_total.clone()))?;
        registry.register(Box::new(provider_errors_total.clone()))?;
        registry.register(Box::new(persist_errors_total.clone()))?;
        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration.clone()))?;

        Ok(Self {
            store_hits_total,
            provider_fetches_total,
            provider_errors_total,
            persist_errors_total,
            http_requests_total,
            http_request_duration,
            registry,
        })
    }

    /// Render all metrics as Prometheus text format (for the `/metrics` endpoint).
    pub fn render(&self) -> Result<String, prometheus::Error> {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buf = Vec::new();
        encoder.encode(&metric_families, &mut buf)?;
        Ok(String::from_utf8(buf).unwrap_or_default())
    }
}
