//! Trait and types for an upstream realtime-arrivals source.

use crate::error::ProviderError;

/// One upcoming arrival as reported by the provider. `due_in` is an opaque
/// display string ("5", "Due", ...) and is never interpreted numerically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrivalEntry {
    pub due_in: String,
    pub route: String,
}

/// Abstraction over a realtime stop-arrivals source (e.g. the Dublin RTPI
/// endpoint).
///
/// An empty list means "no arrivals known" and is not an error; errors are
/// reserved for transport, decode, and malformed-row failures.
#[async_trait::async_trait]
pub trait ArrivalsApi: Send + Sync {
    /// Returns the upcoming arrivals for `stop_id`, restricted to one route
    /// when `route_filter` is nonempty, in the order the provider reports
    /// them.
    async fn stop_arrivals(
        &self,
        stop_id: &str,
        route_filter: &str,
    ) -> Result<Vec<ArrivalEntry>, ProviderError>;
}
