//! Refresh scheduling: the periodic tick loop a host automation platform
//! would otherwise own.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::sensor::NextBusSensor;
use crate::services::arrivals_api::ArrivalsApi;

/// Source of refresh ticks. `tick` resolves when the next refresh should run
/// and returns `false` once the loop should stop.
#[async_trait]
pub trait Ticker: Send {
    async fn tick(&mut self) -> bool;
}

/// Fires immediately, then at a fixed period; optionally stops after a fixed
/// number of ticks.
pub struct IntervalTicker {
    interval: tokio::time::Interval,
    remaining: Option<usize>,
}

impl IntervalTicker {
    pub fn new(period: Duration) -> Self {
        Self {
            interval: tokio::time::interval(period),
            remaining: None,
        }
    }

    pub fn bounded(period: Duration, ticks: usize) -> Self {
        Self {
            interval: tokio::time::interval(period),
            remaining: Some(ticks),
        }
    }
}

#[async_trait]
impl Ticker for IntervalTicker {
    async fn tick(&mut self) -> bool {
        if let Some(remaining) = self.remaining.as_mut() {
            if *remaining == 0 {
                return false;
            }
            *remaining -= 1;
        }
        self.interval.tick().await;
        true
    }
}

/// Drives `sensor.refresh` once per tick until the ticker stops. Each tick is
/// awaited to completion before the next one, so refreshes never overlap. A
/// failed refresh is logged and the previous published value stays up.
pub async fn run<P, T>(sensor: &mut NextBusSensor, provider: &P, ticker: &mut T)
where
    P: ArrivalsApi,
    T: Ticker,
{
    while ticker.tick().await {
        match sensor.refresh(provider).await {
            Ok(()) => {
                info!(
                    sensor = sensor.name(),
                    state = sensor.state().unwrap_or_default(),
                    "Sensor updated"
                );
            }
            Err(e) => {
                warn!(
                    sensor = sensor.name(),
                    error = %e,
                    "Refresh failed, keeping previous state"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SensorConfig;
    use crate::error::ProviderError;
    use crate::services::arrivals_api::ArrivalEntry;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingProvider(AtomicUsize);

    #[async_trait]
    impl ArrivalsApi for CountingProvider {
        async fn stop_arrivals(
            &self,
            _stop_id: &str,
            _route_filter: &str,
        ) -> Result<Vec<ArrivalEntry>, ProviderError> {
            let n = self.0.fetch_add(1, Ordering::SeqCst);
            Ok(vec![ArrivalEntry {
                due_in: n.to_string(),
                route: "46A".to_string(),
            }])
        }
    }

    struct FlakyProvider(AtomicUsize);

    #[async_trait]
    impl ArrivalsApi for FlakyProvider {
        async fn stop_arrivals(
            &self,
            _stop_id: &str,
            _route_filter: &str,
        ) -> Result<Vec<ArrivalEntry>, ProviderError> {
            if self.0.fetch_add(1, Ordering::SeqCst) == 0 {
                Ok(vec![ArrivalEntry {
                    due_in: "7".to_string(),
                    route: "15".to_string(),
                }])
            } else {
                Err(ProviderError::Api {
                    code: "503".to_string(),
                    message: "unavailable".to_string(),
                })
            }
        }
    }

    #[tokio::test]
    async fn test_bounded_ticker_refreshes_exactly_n_times() {
        let provider = CountingProvider(AtomicUsize::new(0));
        let mut sensor = NextBusSensor::new(SensorConfig::new("12345"));
        let mut ticker = IntervalTicker::bounded(Duration::from_millis(1), 3);

        run(&mut sensor, &provider, &mut ticker).await;

        assert_eq!(provider.0.load(Ordering::SeqCst), 3);
        // Last refresh published the third (zero-based "2") fetch.
        assert_eq!(sensor.state(), Some("2"));
    }

    #[tokio::test]
    async fn test_failed_ticks_keep_previous_published_state() {
        let provider = FlakyProvider(AtomicUsize::new(0));
        let mut sensor = NextBusSensor::new(SensorConfig::new("12345"));
        let mut ticker = IntervalTicker::bounded(Duration::from_millis(1), 4);

        run(&mut sensor, &provider, &mut ticker).await;

        assert_eq!(provider.0.load(Ordering::SeqCst), 4);
        assert_eq!(sensor.state(), Some("7"));
    }
}
