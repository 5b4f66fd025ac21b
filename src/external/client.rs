use std::sync::LazyLock;
use std::time::Duration;

/// Shared HTTP client for the upstream API and the webhook
///
/// Initialized lazily on first access. `reqwest::Client` is reference
/// counted internally, so providers clone it instead of building their own.
///
/// - 30s request timeout, 10s connect timeout
/// - gzip decoding
/// - Rustls for TLS
/// - `nexus-relay/<version>` User-Agent
pub static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(4)
        .pool_idle_timeout(Duration::from_secs(90))
        .gzip(true)
        .user_agent(user_agent())
        .build()
        .expect("Failed to build HTTP client")
});

/// User-Agent sent on every outbound request
pub fn user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), crate::pkg_version())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_initialization() {
        let _ = &*HTTP_CLIENT;
    }

    #[test]
    fn test_user_agent_names_the_crate() {
        let ua = user_agent();
        assert!(ua.starts_with("nexus-relay/"));
        assert!(ua.ends_with(crate::pkg_version()));
    }
}
