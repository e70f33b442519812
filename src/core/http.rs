use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_ENCODING};
use reqwest::Client;
use tracing::warn;

/// Stable client identity presented on every outbound request.
pub fn user_agent() -> String {
    format!("Bootstrapper/{}", env!("CARGO_PKG_VERSION"))
}

pub fn build_http_client(insecure_skip_tls_verification: bool) -> Result<Client, reqwest::Error> {
    let mut default_headers = HeaderMap::new();
    default_headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("identity"));

    if insecure_skip_tls_verification {
        warn!("TLS certificate and hostname verification is disabled");
    }

    Client::builder()
        .user_agent(user_agent())
        .default_headers(default_headers)
        .danger_accept_invalid_certs(insecure_skip_tls_verification)
        .build()
}
