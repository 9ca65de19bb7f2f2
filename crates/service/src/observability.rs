use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};

// Prometheus metrics (default registry)
pub static REFERENCE_CHECKS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "escola_reference_checks_total",
        "Existence checks sent to the management service, by kind and outcome",
        &["kind", "outcome"]
    )
    .expect("register reference_checks_total")
});

pub static WRITE_REJECTIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "escola_write_rejections_total",
        "Dependent writes rejected before reaching the store",
        &["reason"]
    )
    .expect("register write_rejections_total")
});

/// Render the default registry in the Prometheus text format.
pub fn encode_metrics() -> Result<String, String> {
    // 确保指标在首次抓取前已注册，避免空输出
    Lazy::force(&REFERENCE_CHECKS_TOTAL);
    Lazy::force(&WRITE_REJECTIONS_TOTAL);

    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| format!("metrics encode error: {e}"))?;
    String::from_utf8(buffer).map_err(|e| format!("metrics encode error: {e}"))
}
