use std::time::Duration;

use tracing::{debug, instrument, warn};

use super::osrm;
use super::{RouteResult, RoutingError};
use crate::config::RoutingConfig;

/// Client for an OSRM-compatible routing engine.
///
/// Stateless apart from the shared HTTP connection pool; safe to share behind
/// an `Arc` and call concurrently.
#[derive(Debug, Clone)]
pub struct RoutingGateway {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl RoutingGateway {
    /// Creates a gateway for `base_url` (trailing slashes are ignored).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    /// Creates a gateway from the `[routing]` configuration section.
    pub fn from_config(config: &RoutingConfig) -> anyhow::Result<Self> {
        let base_url = config
            .osrm
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| anyhow::anyhow!("routing.osrm.base_url must be set"))?;

        Ok(Self::new(
            base_url,
            config.timeout(),
            config.connect_timeout(),
        )?)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Computes the primary driving route between two points.
    ///
    /// Issues exactly one request; nothing is retried or cached.
    #[instrument(skip(self), fields(upstream = %self.base_url))]
    pub async fn route(
        &self,
        from_lat: f64,
        from_lon: f64,
        to_lat: f64,
        to_lon: f64,
    ) -> Result<RouteResult, RoutingError> {
        let url = format!(
            "{}{}",
            self.base_url,
            osrm::route_path(from_lat, from_lon, to_lat, to_lon)
        );

        let result = self.fetch(&url).await;
        match &result {
            Ok(route) => debug!(
                distance_meters = route.distance_meters,
                duration_seconds = route.duration_seconds,
                points = route.geometry.len(),
                "Route computed"
            ),
            Err(err) => warn!(
                code = err.code(),
                upstream_status = ?err.upstream_status(),
                error = %err,
                "Routing request failed"
            ),
        }
        result
    }

    async fn fetch(&self, url: &str) -> Result<RouteResult, RoutingError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport_error(&e, None))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(&e, Some(status.as_u16())))?;

        if !status.is_success() {
            let reason = match osrm::error_summary(&body) {
                Some(summary) => format!("routing engine returned HTTP {status} ({summary})"),
                None => format!("routing engine returned HTTP {status}"),
            };
            return Err(RoutingError::unavailable(reason, Some(status.as_u16())));
        }

        osrm::parse_route_response(&body)
    }

    fn transport_error(&self, err: &reqwest::Error, status: Option<u16>) -> RoutingError {
        let reason = if err.is_timeout() {
            format!("request timed out after {} ms", self.timeout.as_millis())
        } else if err.is_connect() {
            format!("failed to connect: {err}")
        } else if status.is_some() {
            format!("failed to read response body: {err}")
        } else {
            format!("request failed: {err}")
        };
        RoutingError::unavailable(reason, status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OsrmConfig;

    #[test]
    fn trailing_slashes_are_ignored() {
        let gateway = RoutingGateway::new(
            "http://osrm.local:5000//",
            Duration::from_secs(1),
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(gateway.base_url(), "http://osrm.local:5000");
    }

    #[test]
    fn from_config_requires_base_url() {
        let mut config = RoutingConfig::default();
        assert!(RoutingGateway::from_config(&config).is_err());

        config.osrm = OsrmConfig {
            base_url: Some("https://router.example.org/".into()),
        };
        let gateway = RoutingGateway::from_config(&config).unwrap();
        assert_eq!(gateway.base_url(), "https://router.example.org");
    }
}
