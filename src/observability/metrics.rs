use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};

use crate::models::assignment::AssignmentResult;

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub batches_total: IntCounterVec,
    pub match_results_total: IntCounterVec,
    pub batch_latency_seconds: HistogramVec,
    pub volunteers_available: IntGauge,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let batches_total = IntCounterVec::new(
            Opts::new("batches_total", "Total batch runs by outcome"),
            &["outcome"],
        )
        .expect("valid batches_total metric");

        let match_results_total = IntCounterVec::new(
            Opts::new("match_results_total", "Donation match results by status"),
            &["status"],
        )
        .expect("valid match_results_total metric");

        let batch_latency_seconds = HistogramVec::new(
            HistogramOpts::new("batch_latency_seconds", "Latency of batch runs in seconds"),
            &["outcome"],
        )
        .expect("valid batch_latency_seconds metric");

        let volunteers_available = IntGauge::new(
            "volunteers_available",
            "Volunteers left unassigned after the last batch",
        )
        .expect("valid volunteers_available metric");

        registry
            .register(Box::new(batches_total.clone()))
            .expect("register batches_total");
        registry
            .register(Box::new(match_results_total.clone()))
            .expect("register match_results_total");
        registry
            .register(Box::new(batch_latency_seconds.clone()))
            .expect("register batch_latency_seconds");
        registry
            .register(Box::new(volunteers_available.clone()))
            .expect("register volunteers_available");

        Self {
            registry,
            batches_total,
            match_results_total,
            batch_latency_seconds,
            volunteers_available,
        }
    }

    pub fn record_batch(&self, outcome: &str, elapsed_secs: f64) {
        self.batch_latency_seconds
            .with_label_values(&[outcome])
            .observe(elapsed_secs);
        self.batches_total.with_label_values(&[outcome]).inc();
    }

    pub fn record_results(&self, results: &[AssignmentResult], volunteers_remaining: usize) {
        for result in results {
            self.match_results_total
                .with_label_values(&[result.status()])
                .inc();
        }
        self.volunteers_available
            .set(i64::try_from(volunteers_remaining).unwrap_or(i64::MAX));
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
