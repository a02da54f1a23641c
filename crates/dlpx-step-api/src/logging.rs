use std::sync::Once;

use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

pub const DEFAULT_LOG_FILTER: &str = "dlpx_steps=info,dlpx_engine=info,dlpx_dct=info,dlpx=info";

pub fn init() {
    init_with_default(DEFAULT_LOG_FILTER);
}

pub fn init_with_default(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .init();
}

static TLS_INIT: Once = Once::new();

/// Installs the rustls `ring` crypto provider. reqwest is built with
/// `rustls-no-provider`, so one provider must be installed before any
/// client is constructed; every crate that brings rustls in
/// transitively must agree on it.
pub fn init_tls() {
    TLS_INIT.call_once(|| {
        let _ = rustls::crypto::ring::default_provider().install_default();
    });
}
