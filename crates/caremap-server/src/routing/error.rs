use caremap_api::ApiError;

/// Failures of a routing engine call. None of them is retried.
#[derive(Debug, thiserror::Error)]
pub enum RoutingError {
    /// The engine could not be reached, timed out or answered with a non-2xx
    /// status.
    #[error("Routing engine unavailable: {reason}")]
    UpstreamUnavailable {
        reason: String,
        /// HTTP status of the engine's answer, if there was one.
        status: Option<u16>,
    },

    /// 2xx with an empty body or a body that is not a JSON object.
    #[error("Routing engine returned an empty response")]
    EmptyUpstreamResponse,

    /// The engine found no route between the points.
    #[error("Routing engine found no route")]
    NoRouteFound,

    /// The primary route is missing distance, duration or a usable geometry.
    #[error("Routing engine returned a malformed route: {0}")]
    MalformedUpstreamResponse(String),
}

impl RoutingError {
    pub fn unavailable(reason: impl Into<String>, status: Option<u16>) -> Self {
        Self::UpstreamUnavailable {
            reason: reason.into(),
            status,
        }
    }

    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedUpstreamResponse(detail.into())
    }

    /// Stable machine code used in logs and error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UpstreamUnavailable { .. } => "upstream_unavailable",
            Self::EmptyUpstreamResponse => "empty_upstream_response",
            Self::NoRouteFound => "no_route_found",
            Self::MalformedUpstreamResponse(_) => "malformed_upstream_response",
        }
    }

    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::UpstreamUnavailable { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<RoutingError> for ApiError {
    fn from(err: RoutingError) -> Self {
        let code = err.code();
        match err {
            RoutingError::UpstreamUnavailable { .. } => {
                ApiError::service_unavailable(code, err.to_string())
            }
            _ => ApiError::bad_gateway(code, err.to_string()),
        }
    }
}
