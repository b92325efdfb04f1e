//! The published sensor: soonest due-in as the state, full timetable as
//! attributes.

use serde::Serialize;

use crate::config::SensorConfig;
use crate::error::ProviderError;
use crate::services::arrivals_api::ArrivalsApi;
use crate::timetable::{ArrivalRecord, TimetableData};

pub const ATTRIBUTION: &str = "Data provided by data.smartdublin.ie";

/// Attribute map published alongside the sensor state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SensorAttributes {
    pub stop_id: String,
    pub due_in: String,
    pub route: String,
    pub timetable: Vec<ArrivalRecord>,
    pub attribution: &'static str,
}

/// Next-bus sensor for one stop. State and attributes stay `None` until the
/// first successful [`refresh`](NextBusSensor::refresh); after that they
/// always reflect the most recent successful fetch.
pub struct NextBusSensor {
    config: SensorConfig,
    data: TimetableData,
    state: Option<String>,
    attributes: Option<SensorAttributes>,
}

impl NextBusSensor {
    pub fn new(config: SensorConfig) -> Self {
        let data = TimetableData::new(config.stop_id.clone(), config.route.clone());
        Self {
            config,
            data,
            state: None,
            attributes: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Due-in of the soonest arrival, or `None` before the first refresh.
    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    pub fn attributes(&self) -> Option<&SensorAttributes> {
        self.attributes.as_ref()
    }

    pub fn unit_of_measurement(&self) -> &str {
        &self.config.unit_of_measurement
    }

    pub fn icon(&self) -> &str {
        &self.config.icon
    }

    /// Fetches the latest timetable and republishes state and attributes.
    /// On error the previously published values stay in place and the error
    /// is returned for the caller to report.
    pub async fn refresh<P: ArrivalsApi + ?Sized>(
        &mut self,
        provider: &P,
    ) -> Result<(), ProviderError> {
        self.data.refresh(provider).await?;

        let records = self.data.records();
        // records is never empty (placeholder invariant)
        let first = &records[0];

        self.state = Some(first.due_in.clone());
        self.attributes = Some(SensorAttributes {
            stop_id: self.data.stop_id().to_string(),
            due_in: first.due_in.clone(),
            route: first.route.clone(),
            timetable: records.to_vec(),
            attribution: ATTRIBUTION,
        });
        Ok(())
    }
}
