//! Seams to the external measurement, forecast and description stores.

mod memory;

pub use memory::{ForecastRecord, MeasurementRecord, MemoryStore, ValueSnapshot};

use crate::metro::{Location, MetroLocationDescription};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimedValue {
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub value: f64,
}

impl TimedValue {
    pub fn new(timestamp: OffsetDateTime, value: f64) -> Self {
        Self { timestamp, value }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to read store file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode store file: {0}")]
    Decode(#[from] serde_json::Error),
    /// For implementations backed by a remote service that cannot be
    /// reached. [`MemoryStore`] never returns it.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Latest values of measurements and forecasts. `Ok(None)` means the source
/// has no data, which is distinct from the store failing.
#[async_trait]
pub trait ValueStore: Send + Sync {
    async fn latest_measurement(
        &self,
        parameter: &str,
        sensor_id: &str,
        location: &Location,
    ) -> Result<Option<TimedValue>, Error>;
    async fn latest_forecast(
        &self,
        parameter: &str,
        location: &Location,
        model_id: &str,
    ) -> Result<Option<TimedValue>, Error>;
}

#[async_trait]
pub trait DescriptionStore: Send + Sync {
    async fn description(
        &self,
        location: &Location,
        model_id: &str,
    ) -> Result<Option<Arc<MetroLocationDescription>>, Error>;
}
