use once_cell::sync::Lazy;
use prometheus::{register_int_counter, Encoder, IntCounter, TextEncoder};

// Prometheus metrics (default registry)
pub static CONTACTS_CREATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "contact_card_contacts_created_total",
        "Total contacts created"
    )
    .expect("register contacts_created_total")
});

pub static CONTACTS_DELETED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "contact_card_contacts_deleted_total",
        "Total contacts deleted"
    )
    .expect("register contacts_deleted_total")
});

pub static CAPACITY_REJECTIONS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "contact_card_capacity_rejections_total",
        "Total creates rejected because the collection was full"
    )
    .expect("register capacity_rejections_total")
});

pub static QR_GENERATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "contact_card_qr_generated_total",
        "Total QR codes generated"
    )
    .expect("register qr_generated_total")
});

pub static QR_FAILURES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "contact_card_qr_failures_total",
        "Total QR encodings that failed"
    )
    .expect("register qr_failures_total")
});

/// Touch every counter so they show up in the exposition before first use.
pub fn register_all() {
    Lazy::force(&CONTACTS_CREATED_TOTAL);
    Lazy::force(&CONTACTS_DELETED_TOTAL);
    Lazy::force(&CAPACITY_REJECTIONS_TOTAL);
    Lazy::force(&QR_GENERATED_TOTAL);
    Lazy::force(&QR_FAILURES_TOTAL);
}

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}
