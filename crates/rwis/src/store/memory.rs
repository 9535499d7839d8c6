use super::{DescriptionStore, Error, TimedValue, ValueStore};
use crate::metro::{Location, MetroLocationDescription};
use async_trait::async_trait;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, path::Path, sync::Arc};
use time::OffsetDateTime;
use tokio::{fs, sync::RwLock};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    pub parameter: String,
    pub sensor_id: String,
    pub location: Location,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRecord {
    pub parameter: String,
    pub model_id: String,
    pub location: Location,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub value: f64,
}

/// On-disk layout of a value dump.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueSnapshot {
    #[serde(default)]
    pub measurements: Vec<MeasurementRecord>,
    #[serde(default)]
    pub forecasts: Vec<ForecastRecord>,
}

// (parameter, sensor or model id, location key)
type ValueKey = (String, String, String);
// (location key, model id)
type DescriptionKey = (String, String);

/// Value and description store held in memory, filled from JSON files.
#[derive(Default)]
pub struct MemoryStore {
    measurements: RwLock<HashMap<ValueKey, TimedValue>>,
    forecasts: RwLock<HashMap<ValueKey, TimedValue>>,
    descriptions: RwLock<HashMap<DescriptionKey, Arc<MetroLocationDescription>>>,
}

fn value_key(parameter: &str, source_id: &str, location: &Location) -> ValueKey {
    (parameter.to_owned(), source_id.to_owned(), location.key())
}

fn keep_latest(values: &mut HashMap<ValueKey, TimedValue>, key: ValueKey, value: TimedValue) {
    values
        .entry(key)
        .and_modify(|current| {
            if value.timestamp >= current.timestamp {
                *current = value;
            }
        })
        .or_insert(value);
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn record_measurement(
        &self,
        parameter: &str,
        sensor_id: &str,
        location: &Location,
        value: TimedValue,
    ) {
        let key = value_key(parameter, sensor_id, location);
        let mut measurements = self.measurements.write().await;
        keep_latest(&mut measurements, key, value);
    }

    pub async fn record_forecast(
        &self,
        parameter: &str,
        model_id: &str,
        location: &Location,
        value: TimedValue,
    ) {
        let key = value_key(parameter, model_id, location);
        let mut forecasts = self.forecasts.write().await;
        keep_latest(&mut forecasts, key, value);
    }

    /// Adds every record of the snapshot, returning how many were read.
    pub async fn insert_snapshot(&self, snapshot: ValueSnapshot) -> usize {
        let count = snapshot.measurements.len() + snapshot.forecasts.len();
        for record in snapshot.measurements {
            self.record_measurement(
                &record.parameter,
                &record.sensor_id,
                &record.location,
                TimedValue::new(record.timestamp, record.value),
            )
            .await;
        }
        for record in snapshot.forecasts {
            self.record_forecast(
                &record.parameter,
                &record.model_id,
                &record.location,
                TimedValue::new(record.timestamp, record.value),
            )
            .await;
        }
        count
    }

    pub async fn load_values(&self, path: impl AsRef<Path>) -> Result<usize, Error> {
        let content = fs::read_to_string(path.as_ref()).await?;
        let snapshot: ValueSnapshot = serde_json::from_str(&content)?;
        let count = self.insert_snapshot(snapshot).await;
        info!("loaded {} values from {}", count, path.as_ref().display());
        Ok(count)
    }

    /// Stores a description, replacing and returning any previous one with
    /// the same location and model id.
    pub async fn upsert_description(
        &self,
        description: MetroLocationDescription,
    ) -> Option<Arc<MetroLocationDescription>> {
        let key = description.key();
        let previous = self
            .descriptions
            .write()
            .await
            .insert(key.clone(), Arc::new(description));
        if previous.is_some() {
            debug!("replaced description for {} / {}", key.0, key.1);
        }
        previous
    }

    /// Reads a JSON array of descriptions; each one is validated on decode.
    pub async fn load_descriptions(&self, path: impl AsRef<Path>) -> Result<usize, Error> {
        let content = fs::read_to_string(path.as_ref()).await?;
        let descriptions: Vec<MetroLocationDescription> = serde_json::from_str(&content)?;
        let count = descriptions.len();
        for description in descriptions {
            self.upsert_description(description).await;
        }
        info!(
            "loaded {} location descriptions from {}",
            count,
            path.as_ref().display()
        );
        Ok(count)
    }

    /// All descriptions ordered by location key, then model id.
    pub async fn descriptions(&self) -> Vec<Arc<MetroLocationDescription>> {
        let descriptions = self.descriptions.read().await;
        let mut entries: Vec<(&DescriptionKey, &Arc<MetroLocationDescription>)> =
            descriptions.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
            .into_iter()
            .map(|(_, description)| Arc::clone(description))
            .collect()
    }
}

#[async_trait]
impl ValueStore for MemoryStore {
    async fn latest_measurement(
        &self,
        parameter: &str,
        sensor_id: &str,
        location: &Location,
    ) -> Result<Option<TimedValue>, Error> {
        let measurements = self.measurements.read().await;
        Ok(measurements
            .get(&value_key(parameter, sensor_id, location))
            .copied())
    }

    async fn latest_forecast(
        &self,
        parameter: &str,
        location: &Location,
        model_id: &str,
    ) -> Result<Option<TimedValue>, Error> {
        let forecasts = self.forecasts.read().await;
        Ok(forecasts
            .get(&value_key(parameter, model_id, location))
            .copied())
    }
}

#[async_trait]
impl DescriptionStore for MemoryStore {
    async fn description(
        &self,
        location: &Location,
        model_id: &str,
    ) -> Result<Option<Arc<MetroLocationDescription>>, Error> {
        let descriptions = self.descriptions.read().await;
        Ok(descriptions
            .get(&(location.key(), model_id.to_owned()))
            .cloned())
    }
}
