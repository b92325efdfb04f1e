//! Timetable retrieval state for one configured stop.

use serde::Serialize;

use crate::error::ProviderError;
use crate::services::arrivals_api::ArrivalsApi;

/// Placeholder due-in value shown while no arrivals are known.
pub const NO_DATA: &str = "n/a";

/// One normalized upcoming arrival.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArrivalRecord {
    pub due_in: String,
    pub route: String,
}

/// Holds the latest timetable for one stop, optionally filtered to one route.
///
/// `records` always holds at least one entry: either the provider's list, in
/// provider order, or the single [`NO_DATA`] placeholder.
#[derive(Debug)]
pub struct TimetableData {
    stop_id: String,
    route_filter: String,
    records: Vec<ArrivalRecord>,
}

impl TimetableData {
    pub fn new(stop_id: impl Into<String>, route_filter: impl Into<String>) -> Self {
        let route_filter = route_filter.into();
        let records = vec![Self::placeholder(&route_filter)];
        Self {
            stop_id: stop_id.into(),
            route_filter,
            records,
        }
    }

    fn placeholder(route_filter: &str) -> ArrivalRecord {
        ArrivalRecord {
            due_in: NO_DATA.to_string(),
            route: route_filter.to_string(),
        }
    }

    pub fn stop_id(&self) -> &str {
        &self.stop_id
    }

    pub fn route_filter(&self) -> &str {
        &self.route_filter
    }

    /// The latest timetable. Never empty.
    pub fn records(&self) -> &[ArrivalRecord] {
        &self.records
    }

    /// Replaces the held records wholesale with a fresh fetch from
    /// `provider`. An empty provider result becomes the placeholder record;
    /// on error the previous records are kept and the error is returned.
    pub async fn refresh<P: ArrivalsApi + ?Sized>(
        &mut self,
        provider: &P,
    ) -> Result<(), ProviderError> {
        let entries = provider
            .stop_arrivals(&self.stop_id, &self.route_filter)
            .await?;

        self.records = if entries.is_empty() {
            vec![Self::placeholder(&self.route_filter)]
        } else {
            entries
                .into_iter()
                .map(|e| ArrivalRecord {
                    due_in: e.due_in,
                    route: e.route,
                })
                .collect()
        };
        Ok(())
    }
}
