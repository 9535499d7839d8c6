//! Resolves every input a METRo run needs for one location.

use crate::{
    metro::{ForecastTag, Location, MetroLocationDescription, ObservationTag},
    resolver::{ResolutionError, ResolvedValue, Resolver},
};
use futures::future::join_all;
use log::warn;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Resolved inputs of one model run. Tags that could not be resolved are
/// kept in the `missing_*` maps so the caller can decide whether to run.
#[derive(Debug, Clone, Serialize)]
pub struct MetroInputs {
    pub location: Location,
    pub model_id: String,
    pub observations: BTreeMap<ObservationTag, ResolvedValue>,
    pub forecasts: BTreeMap<ForecastTag, ResolvedValue>,
    #[serde(serialize_with = "errors_as_text")]
    pub missing_observations: BTreeMap<ObservationTag, ResolutionError>,
    #[serde(serialize_with = "errors_as_text")]
    pub missing_forecasts: BTreeMap<ForecastTag, ResolutionError>,
}

impl MetroInputs {
    pub fn is_complete(&self) -> bool {
        self.missing_observations.is_empty() && self.missing_forecasts.is_empty()
    }
}

fn errors_as_text<K, S>(
    errors: &BTreeMap<K, ResolutionError>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    K: Serialize,
    S: Serializer,
{
    let errors = errors.iter().map(|(tag, error)| (tag, error.to_string()));
    serializer.collect_map(errors)
}

/// Looks the description up and resolves all inputs it requires. Only a
/// missing description is an error; unresolved tags end up in `missing_*`.
pub async fn assemble_inputs(
    resolver: &Resolver,
    location: &Location,
    model_id: &str,
) -> Result<MetroInputs, ResolutionError> {
    let description = resolver.description(location, model_id).await?;
    Ok(assemble_for(resolver, &description).await)
}

/// Tags are independent of each other, so they are resolved concurrently;
/// each tag still walks its own sources strictly in order.
pub async fn assemble_for(
    resolver: &Resolver,
    description: &MetroLocationDescription,
) -> MetroInputs {
    let observations = ObservationTag::ALL.into_iter().map(|tag| async move {
        (tag, resolver.resolve_observation(description, tag).await)
    });
    let observation_results = join_all(observations).await;

    let required = description.run_mode().required_forecasts();
    let forecasts = required.into_iter().map(|tag| async move {
        (tag, resolver.resolve_forecast(description, tag).await)
    });
    let forecast_results = join_all(forecasts).await;

    let mut inputs = MetroInputs {
        location: *description.location(),
        model_id: description.model_id().to_owned(),
        observations: BTreeMap::new(),
        forecasts: BTreeMap::new(),
        missing_observations: BTreeMap::new(),
        missing_forecasts: BTreeMap::new(),
    };

    for (tag, result) in observation_results {
        match result {
            Ok(resolved) => {
                inputs.observations.insert(tag, resolved);
            }
            Err(e) => {
                inputs.missing_observations.insert(tag, e);
            }
        }
    }

    let corrections = description.flux_corrections();
    for (tag, result) in forecast_results {
        match result {
            Ok(mut resolved) => {
                if let Some(factor) = corrections.factor_for(tag) {
                    resolved.value *= factor;
                }
                inputs.forecasts.insert(tag, resolved);
            }
            Err(e) => {
                inputs.missing_forecasts.insert(tag, e);
            }
        }
    }

    if !inputs.is_complete() {
        warn!(
            "{} / {}: {} observation and {} forecast inputs missing",
            inputs.location,
            inputs.model_id,
            inputs.missing_observations.len(),
            inputs.missing_forecasts.len()
        );
    }
    inputs
}
