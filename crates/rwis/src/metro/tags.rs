use serde::{Deserialize, Serialize};
use std::fmt;

/// Observation inputs of METRo, named after their XML element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ObservationTag {
    #[serde(rename = "at")]
    AirTemperature,
    #[serde(rename = "td")]
    DewPoint,
    #[serde(rename = "pi")]
    PrecipitationPresence,
    #[serde(rename = "ws")]
    WindSpeed,
    #[serde(rename = "sc")]
    RoadCondition,
    #[serde(rename = "st")]
    SurfaceTemperature,
    #[serde(rename = "sst")]
    SubSurfaceTemperature,
}

impl ObservationTag {
    /// Every observation input is mandatory.
    pub const ALL: [ObservationTag; 7] = [
        ObservationTag::AirTemperature,
        ObservationTag::DewPoint,
        ObservationTag::PrecipitationPresence,
        ObservationTag::WindSpeed,
        ObservationTag::RoadCondition,
        ObservationTag::SurfaceTemperature,
        ObservationTag::SubSurfaceTemperature,
    ];

    pub fn xml_name(&self) -> &'static str {
        match self {
            ObservationTag::AirTemperature => "at",
            ObservationTag::DewPoint => "td",
            ObservationTag::PrecipitationPresence => "pi",
            ObservationTag::WindSpeed => "ws",
            ObservationTag::RoadCondition => "sc",
            ObservationTag::SurfaceTemperature => "st",
            ObservationTag::SubSurfaceTemperature => "sst",
        }
    }
}

impl fmt::Display for ObservationTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.xml_name())
    }
}

/// Weather forecast inputs of METRo, named after their XML element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ForecastTag {
    #[serde(rename = "at")]
    AirTemperature,
    #[serde(rename = "td")]
    DewPoint,
    #[serde(rename = "ra")]
    RainAccumulation,
    #[serde(rename = "sn")]
    SnowAccumulation,
    #[serde(rename = "ws")]
    WindSpeed,
    #[serde(rename = "ap")]
    Pressure,
    #[serde(rename = "cc")]
    CloudCover,
    #[serde(rename = "sf")]
    SolarFlux,
    #[serde(rename = "ir")]
    InfraredFlux,
    #[serde(rename = "fa")]
    AnthropogenicFlux,
}

impl ForecastTag {
    pub const ALL: [ForecastTag; 10] = [
        ForecastTag::AirTemperature,
        ForecastTag::DewPoint,
        ForecastTag::RainAccumulation,
        ForecastTag::SnowAccumulation,
        ForecastTag::WindSpeed,
        ForecastTag::Pressure,
        ForecastTag::CloudCover,
        ForecastTag::SolarFlux,
        ForecastTag::InfraredFlux,
        ForecastTag::AnthropogenicFlux,
    ];

    /// Needed by every model run regardless of run mode.
    pub const MANDATORY: [ForecastTag; 6] = [
        ForecastTag::AirTemperature,
        ForecastTag::DewPoint,
        ForecastTag::RainAccumulation,
        ForecastTag::SnowAccumulation,
        ForecastTag::WindSpeed,
        ForecastTag::Pressure,
    ];

    pub fn xml_name(&self) -> &'static str {
        match self {
            ForecastTag::AirTemperature => "at",
            ForecastTag::DewPoint => "td",
            ForecastTag::RainAccumulation => "ra",
            ForecastTag::SnowAccumulation => "sn",
            ForecastTag::WindSpeed => "ws",
            ForecastTag::Pressure => "ap",
            ForecastTag::CloudCover => "cc",
            ForecastTag::SolarFlux => "sf",
            ForecastTag::InfraredFlux => "ir",
            ForecastTag::AnthropogenicFlux => "fa",
        }
    }

    pub fn is_flux(&self) -> bool {
        matches!(
            self,
            ForecastTag::SolarFlux | ForecastTag::InfraredFlux | ForecastTag::AnthropogenicFlux
        )
    }
}

impl fmt::Display for ForecastTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.xml_name())
    }
}

/// Either kind of METRo input, used where errors need to name the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetroTag {
    Observation(ObservationTag),
    Forecast(ForecastTag),
}

impl fmt::Display for MetroTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetroTag::Observation(tag) => write!(f, "observation <{}>", tag),
            MetroTag::Forecast(tag) => write!(f, "forecast <{}>", tag),
        }
    }
}

impl From<ObservationTag> for MetroTag {
    fn from(value: ObservationTag) -> Self {
        MetroTag::Observation(value)
    }
}

impl From<ForecastTag> for MetroTag {
    fn from(value: ForecastTag) -> Self {
        MetroTag::Forecast(value)
    }
}
