use lexis_config::network::NetworkConfig;
use reqwest::header::{HeaderMap, HeaderName};

/// Build the pooled client shared by every monitor.
///
/// The pool has no size cap, so a request never waits for a free connection;
/// a fresh one is opened under the connect timeout instead.
pub fn build_client(config: &NetworkConfig) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder = reqwest::Client::builder()
        .connect_timeout(config.connect_timeout())
        .timeout(config.read_timeout())
        .pool_idle_timeout(config.pool_idle_timeout())
        .pool_max_idle_per_host(config.pool_max_idle_per_host)
        .user_agent(config.user_agent.clone());

    if !config.use_system_proxy {
        builder = builder.no_proxy();
    }

    builder.build()
}

/// Value of the last occurrence of a header
pub(crate) fn last_header(headers: &HeaderMap, name: HeaderName) -> Option<String> {
    headers
        .get_all(name)
        .iter()
        .last()
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
