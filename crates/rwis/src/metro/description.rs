use super::{
    DataSource, ForecastTag, Location, MetroTag, ObservationTag, SourceKind, SourcePriorityList,
};
use crate::catalog::{Catalog, ParameterKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DescriptionError {
    #[error("Invalid location: {0}")]
    InvalidLocation(Location),
    #[error("Model id must not be empty")]
    EmptyModelId,
    #[error("No data sources for mandatory observation tag <{0}>")]
    MissingObservationMapping(ObservationTag),
    #[error("No data sources for forecast tag <{0}> required by the run mode")]
    MissingForecastMapping(ForecastTag),
    #[error("Data source for {tag} has an empty parameter or source id")]
    IncompleteSource { tag: MetroTag },
    #[error("Invalid {name} flux correction factor: {value}")]
    InvalidFactor { name: &'static str, value: f64 },
    #[error("Invalid sunshadow method {0}, expected 1 or 2")]
    InvalidSunshadowMethod(u8),
    #[error("Data source for {tag} names unknown parameter '{parameter}'")]
    UnknownParameter { tag: MetroTag, parameter: String },
    #[error("Data source for {tag} is a {kind} source but '{parameter}' is {parameter_kind:?}")]
    KindMismatch {
        tag: MetroTag,
        parameter: String,
        kind: SourceKind,
        parameter_kind: ParameterKind,
    },
    #[error("'{parameter}' cannot feed METRo {tag}")]
    NotConvertible { tag: MetroTag, parameter: String },
}

/// METRo command line switches that change which inputs a run needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunMode {
    pub enable_sunshadow: bool,
    pub sunshadow_method: u8,
    pub use_solar_flux_forecast: bool,
    pub use_infrared_flux_forecast: bool,
    pub use_anthropogenic_flux: bool,
}

impl Default for RunMode {
    fn default() -> Self {
        Self {
            enable_sunshadow: false,
            sunshadow_method: 1,
            use_solar_flux_forecast: false,
            use_infrared_flux_forecast: false,
            use_anthropogenic_flux: false,
        }
    }
}

impl RunMode {
    pub fn requires_forecast(&self, tag: ForecastTag) -> bool {
        match tag {
            // METRo derives whichever radiation flux is not forecasted from cloud cover
            ForecastTag::CloudCover => {
                !(self.use_solar_flux_forecast && self.use_infrared_flux_forecast)
            }
            ForecastTag::SolarFlux => self.use_solar_flux_forecast,
            ForecastTag::InfraredFlux => self.use_infrared_flux_forecast,
            ForecastTag::AnthropogenicFlux => self.use_anthropogenic_flux,
            _ => true,
        }
    }

    pub fn required_forecasts(&self) -> Vec<ForecastTag> {
        ForecastTag::ALL
            .into_iter()
            .filter(|tag| self.requires_forecast(*tag))
            .collect()
    }
}

/// Multipliers applied to forecasted radiation and heat fluxes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FluxCorrections {
    pub solar: f64,
    pub infrared: f64,
    pub anthropogenic: f64,
}

impl Default for FluxCorrections {
    fn default() -> Self {
        Self {
            solar: 1.0,
            infrared: 1.0,
            anthropogenic: 1.0,
        }
    }
}

impl FluxCorrections {
    pub fn factor_for(&self, tag: ForecastTag) -> Option<f64> {
        match tag {
            ForecastTag::SolarFlux => Some(self.solar),
            ForecastTag::InfraredFlux => Some(self.infrared),
            ForecastTag::AnthropogenicFlux => Some(self.anthropogenic),
            _ => None,
        }
    }

    fn validate(&self) -> Result<(), DescriptionError> {
        for (name, value) in [
            ("solar", self.solar),
            ("infrared", self.infrared),
            ("anthropogenic", self.anthropogenic),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(DescriptionError::InvalidFactor { name, value });
            }
        }
        Ok(())
    }
}

/// Unvalidated form of a [`MetroLocationDescription`], as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptionConfig {
    pub location: Location,
    pub model_id: String,
    #[serde(default)]
    pub observation_mappings: BTreeMap<ObservationTag, SourcePriorityList>,
    #[serde(default)]
    pub forecast_mappings: BTreeMap<ForecastTag, SourcePriorityList>,
    #[serde(default)]
    pub flux_corrections: FluxCorrections,
    #[serde(default)]
    pub run_mode: RunMode,
}

/// Where each METRo input for one (location, model) comes from.
///
/// Only obtainable through validation, so every tag the run mode needs has
/// at least one candidate source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DescriptionConfig", into = "DescriptionConfig")]
pub struct MetroLocationDescription {
    location: Location,
    model_id: String,
    observation_mappings: BTreeMap<ObservationTag, SourcePriorityList>,
    forecast_mappings: BTreeMap<ForecastTag, SourcePriorityList>,
    flux_corrections: FluxCorrections,
    run_mode: RunMode,
}

impl TryFrom<DescriptionConfig> for MetroLocationDescription {
    type Error = DescriptionError;

    fn try_from(config: DescriptionConfig) -> Result<Self, Self::Error> {
        if !config.location.is_valid() {
            return Err(DescriptionError::InvalidLocation(config.location));
        }
        if config.model_id.trim().is_empty() {
            return Err(DescriptionError::EmptyModelId);
        }
        for tag in ObservationTag::ALL {
            if config
                .observation_mappings
                .get(&tag)
                .map_or(true, SourcePriorityList::is_empty)
            {
                return Err(DescriptionError::MissingObservationMapping(tag));
            }
        }
        for tag in config.run_mode.required_forecasts() {
            if config
                .forecast_mappings
                .get(&tag)
                .map_or(true, SourcePriorityList::is_empty)
            {
                return Err(DescriptionError::MissingForecastMapping(tag));
            }
        }
        let sources = tagged_sources(&config.observation_mappings, &config.forecast_mappings);
        for (tag, source) in sources {
            if source.parameter.is_empty() || source.source_id.is_empty() {
                return Err(DescriptionError::IncompleteSource { tag });
            }
            if !source.location.is_valid() {
                return Err(DescriptionError::InvalidLocation(source.location));
            }
        }
        config.flux_corrections.validate()?;
        let method = config.run_mode.sunshadow_method;
        if config.run_mode.enable_sunshadow && !(1..=2).contains(&method) {
            return Err(DescriptionError::InvalidSunshadowMethod(method));
        }

        Ok(Self {
            location: config.location,
            model_id: config.model_id,
            observation_mappings: config.observation_mappings,
            forecast_mappings: config.forecast_mappings,
            flux_corrections: config.flux_corrections,
            run_mode: config.run_mode,
        })
    }
}

impl From<MetroLocationDescription> for DescriptionConfig {
    fn from(value: MetroLocationDescription) -> Self {
        DescriptionConfig {
            location: value.location,
            model_id: value.model_id,
            observation_mappings: value.observation_mappings,
            forecast_mappings: value.forecast_mappings,
            flux_corrections: value.flux_corrections,
            run_mode: value.run_mode,
        }
    }
}

impl MetroLocationDescription {
    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// Store key: at most one description exists per key.
    pub fn key(&self) -> (String, String) {
        (self.location.key(), self.model_id.clone())
    }

    pub fn observation_sources(&self, tag: ObservationTag) -> Option<&SourcePriorityList> {
        self.observation_mappings.get(&tag)
    }

    pub fn forecast_sources(&self, tag: ForecastTag) -> Option<&SourcePriorityList> {
        self.forecast_mappings.get(&tag)
    }

    pub fn flux_corrections(&self) -> &FluxCorrections {
        &self.flux_corrections
    }

    pub fn run_mode(&self) -> &RunMode {
        &self.run_mode
    }

    /// Checks every configured source against the catalog. A source must name
    /// a known parameter of its own kind that can feed the input it is wired to.
    pub fn check_sources(&self, catalog: &Catalog) -> Result<(), DescriptionError> {
        let sources = tagged_sources(&self.observation_mappings, &self.forecast_mappings);
        for (tag, source) in sources {
            check_source(catalog, tag, source)?;
        }
        Ok(())
    }
}

fn tagged_sources<'a>(
    observations: &'a BTreeMap<ObservationTag, SourcePriorityList>,
    forecasts: &'a BTreeMap<ForecastTag, SourcePriorityList>,
) -> Vec<(MetroTag, &'a DataSource)> {
    let mut sources = Vec::new();
    for (tag, list) in observations {
        for source in list {
            sources.push((MetroTag::Observation(*tag), source));
        }
    }
    for (tag, list) in forecasts {
        for source in list {
            sources.push((MetroTag::Forecast(*tag), source));
        }
    }
    sources
}

fn check_source(
    catalog: &Catalog,
    tag: MetroTag,
    source: &DataSource,
) -> Result<(), DescriptionError> {
    let Some(definition) = catalog.get(&source.parameter) else {
        return Err(DescriptionError::UnknownParameter {
            tag,
            parameter: source.parameter.clone(),
        });
    };
    let expected = match source.kind {
        SourceKind::Measurement => ParameterKind::Measured,
        SourceKind::Forecast => ParameterKind::Forecasted,
    };
    if definition.kind != expected {
        return Err(DescriptionError::KindMismatch {
            tag,
            parameter: source.parameter.clone(),
            kind: source.kind,
            parameter_kind: definition.kind,
        });
    }
    if !definition.can_feed(tag) {
        return Err(DescriptionError::NotConvertible {
            tag,
            parameter: source.parameter.clone(),
        });
    }
    Ok(())
}
