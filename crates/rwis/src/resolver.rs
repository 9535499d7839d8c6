//! Picks the value for a METRo input by walking its data sources in priority
//! order until one yields a valid, convertible value.

use crate::{
    catalog::{Catalog, ConversionError, InvalidValue},
    metro::{
        DataSource, ForecastTag, Location, MetroLocationDescription, MetroTag, ObservationTag,
        SourceKind, SourcePriorityList,
    },
    store::{DescriptionStore, TimedValue, ValueStore},
};
use log::{debug, error, log, warn, Level};
use serde::Serialize;
use std::{fmt, sync::Arc, time::Duration};
use time::OffsetDateTime;

/// A METRo-ready value and where it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedValue {
    pub value: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub source: DataSource,
    /// Index of the winning source in its priority list.
    pub priority: usize,
}

/// Why a single candidate was skipped. All of these fall through to the next
/// candidate.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CandidateFailure {
    #[error("no value available")]
    SourceUnavailable,
    #[error("no answer within {0:?}")]
    TimedOut(Duration),
    #[error("store error: {0}")]
    Store(String),
    #[error(transparent)]
    Invalid(#[from] InvalidValue),
    #[error("no METRo code for {0}")]
    TransformationFailed(f64),
}

impl CandidateFailure {
    fn log_level(&self) -> Level {
        match self {
            Self::Store(_) => Level::Warn,
            Self::Invalid(_) | Self::TransformationFailed(_) => Level::Info,
            Self::SourceUnavailable | Self::TimedOut(_) => Level::Debug,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CandidateAttempt {
    pub priority: usize,
    pub source: DataSource,
    pub failure: CandidateFailure,
}

impl fmt::Display for CandidateAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}: {}", self.priority, self.source, self.failure)
    }
}

/// Tag-level failure, returned to the caller.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ResolutionError {
    #[error("No location description for {location} and model {model_id}")]
    NoDescription {
        location: Location,
        model_id: String,
    },
    #[error("Failed to fetch location description: {0}")]
    DescriptionStore(String),
    #[error("No data sources configured for {tag}")]
    NoMappingConfigured { tag: MetroTag },
    #[error("Misconfigured data source for {tag} ({data_source}): {error}")]
    Misconfigured {
        tag: MetroTag,
        data_source: DataSource,
        error: ConversionError,
    },
    #[error("All {count} data sources for {tag} failed", count = .attempts.len())]
    AllSourcesExhausted {
        tag: MetroTag,
        attempts: Vec<CandidateAttempt>,
    },
}

enum Rejection {
    Skip(CandidateFailure),
    Misconfigured(ConversionError),
}

pub struct Resolver {
    catalog: Arc<Catalog>,
    values: Arc<dyn ValueStore>,
    descriptions: Arc<dyn DescriptionStore>,
    source_timeout: Option<Duration>,
}

impl Resolver {
    pub fn new(
        catalog: Arc<Catalog>,
        values: Arc<dyn ValueStore>,
        descriptions: Arc<dyn DescriptionStore>,
    ) -> Self {
        Self {
            catalog,
            values,
            descriptions,
            source_timeout: None,
        }
    }

    /// Bounds every store query; a query that runs over counts as "no value".
    pub fn with_source_timeout(mut self, timeout: Duration) -> Self {
        self.source_timeout = Some(timeout);
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub async fn description(
        &self,
        location: &Location,
        model_id: &str,
    ) -> Result<Arc<MetroLocationDescription>, ResolutionError> {
        self.descriptions
            .description(location, model_id)
            .await
            .map_err(|e| ResolutionError::DescriptionStore(e.to_string()))?
            .ok_or_else(|| ResolutionError::NoDescription {
                location: *location,
                model_id: model_id.to_owned(),
            })
    }

    pub async fn resolve_observation_tag(
        &self,
        tag: ObservationTag,
        location: &Location,
        model_id: &str,
    ) -> Result<ResolvedValue, ResolutionError> {
        let description = self.description(location, model_id).await?;
        self.resolve_observation(&description, tag).await
    }

    pub async fn resolve_forecast_tag(
        &self,
        tag: ForecastTag,
        location: &Location,
        model_id: &str,
    ) -> Result<ResolvedValue, ResolutionError> {
        let description = self.description(location, model_id).await?;
        self.resolve_forecast(&description, tag).await
    }

    pub async fn resolve_observation(
        &self,
        description: &MetroLocationDescription,
        tag: ObservationTag,
    ) -> Result<ResolvedValue, ResolutionError> {
        self.resolve_sources(tag.into(), description.observation_sources(tag))
            .await
    }

    pub async fn resolve_forecast(
        &self,
        description: &MetroLocationDescription,
        tag: ForecastTag,
    ) -> Result<ResolvedValue, ResolutionError> {
        self.resolve_sources(tag.into(), description.forecast_sources(tag))
            .await
    }

    async fn resolve_sources(
        &self,
        tag: MetroTag,
        sources: Option<&SourcePriorityList>,
    ) -> Result<ResolvedValue, ResolutionError> {
        let sources = sources.ok_or(ResolutionError::NoMappingConfigured { tag })?;
        let mut attempts = Vec::with_capacity(sources.len());

        for (priority, source) in sources.iter().enumerate() {
            match self.try_candidate(tag, source).await {
                Ok((timed, value)) => {
                    debug!("{}: using #{} {} = {}", tag, priority, source, value);
                    return Ok(ResolvedValue {
                        value,
                        timestamp: timed.timestamp,
                        source: source.clone(),
                        priority,
                    });
                }
                Err(Rejection::Skip(failure)) => {
                    let attempt = CandidateAttempt {
                        priority,
                        source: source.clone(),
                        failure,
                    };
                    let level = attempt.failure.log_level();
                    log!(level, "{}: skipping {}", tag, attempt);
                    attempts.push(attempt);
                }
                Err(Rejection::Misconfigured(error)) => {
                    error!("{}: misconfigured source {}: {}", tag, source, error);
                    return Err(ResolutionError::Misconfigured {
                        tag,
                        data_source: source.clone(),
                        error,
                    });
                }
            }
        }

        warn!("{}: all {} data sources failed", tag, attempts.len());
        Err(ResolutionError::AllSourcesExhausted { tag, attempts })
    }

    async fn try_candidate(
        &self,
        tag: MetroTag,
        source: &DataSource,
    ) -> Result<(TimedValue, f64), Rejection> {
        let Some(definition) = self.catalog.get(&source.parameter) else {
            let error = ConversionError::UnknownParameter(source.parameter.clone());
            return Err(Rejection::Misconfigured(error));
        };
        let timed = self.fetch(source).await.map_err(Rejection::Skip)?;
        definition
            .check(timed.value)
            .map_err(|e| Rejection::Skip(e.into()))?;

        match definition.convert(tag, timed.value) {
            Ok(value) => Ok((timed, value)),
            Err(ConversionError::TransformationFailed { value, .. }) => {
                let failure = CandidateFailure::TransformationFailed(value);
                Err(Rejection::Skip(failure))
            }
            Err(e) => Err(Rejection::Misconfigured(e)),
        }
    }

    async fn fetch(&self, source: &DataSource) -> Result<TimedValue, CandidateFailure> {
        let query = async {
            match source.kind {
                SourceKind::Measurement => {
                    self.values
                        .latest_measurement(&source.parameter, &source.source_id, &source.location)
                        .await
                }
                SourceKind::Forecast => {
                    self.values
                        .latest_forecast(&source.parameter, &source.location, &source.source_id)
                        .await
                }
            }
        };
        let result = match self.source_timeout {
            Some(limit) => tokio::time::timeout(limit, query)
                .await
                .map_err(|_| CandidateFailure::TimedOut(limit))?,
            None => query.await,
        };

        match result {
            Ok(Some(timed)) => Ok(timed),
            Ok(None) => Err(CandidateFailure::SourceUnavailable),
            Err(e) => Err(CandidateFailure::Store(e.to_string())),
        }
    }
}
