use super::{
    measured::PRECIPITATION_TYPE_CODES,
    ConversionPolicy::{self, Identity, NotConvertible, UnitScale},
    ParameterDefinition,
    Validity::{self, Codes},
};

use crate::metro::ForecastTag;
use crate::metro::MetroTag::{self, Forecast};

const MS_TO_KMH: f64 = 3.6;
const PA_TO_HPA: f64 = 0.01;
const MM_TO_CM: f64 = 0.1;
const PERCENT_TO_OCTAS: f64 = 0.08;

pub const FORECASTED_AIR_TEMPERATURE_2M: &str =
    "Forecasted temperature in [deg C] @ 2m above ground";
pub const FORECASTED_DEW_POINT_2M: &str =
    "Forecasted dew point temperature in [deg C] @ 2m above ground";
pub const FORECASTED_RELATIVE_HUMIDITY_2M: &str =
    "Forecasted relative humidity in [%] @ 2m above ground";
pub const FORECASTED_WIND_SPEED_10M: &str = "Forecasted wind speed in [m/s] @ 10m above ground";
pub const FORECASTED_WIND_DIRECTION_10M: &str =
    "Forecasted wind direction in [deg] @ 10m above ground";
pub const FORECASTED_PRESSURE_MSL: &str = "Forecasted air pressure in [Pa] @ mean sea level";
pub const FORECASTED_PRESSURE_GROUND: &str = "Forecasted air pressure in [Pa] @ ground level";
pub const FORECASTED_RAIN_ACCUMULATION_1H: &str = "Forecasted rain accumulation in [mm] over 1h";
pub const FORECASTED_SNOW_ACCUMULATION_1H_CM: &str = "Forecasted snow accumulation in [cm] over 1h";
pub const FORECASTED_SNOW_ACCUMULATION_1H_MM: &str = "Forecasted snow accumulation in [mm] over 1h";
pub const FORECASTED_CLOUD_COVER_PERCENT: &str = "Forecasted total cloud cover in [%]";
pub const FORECASTED_CLOUD_COVER_OCTAS: &str = "Forecasted total cloud cover in [octas]";
pub const FORECASTED_SOLAR_FLUX: &str = "Forecasted downward shortwave radiation flux in [W/m2]";
pub const FORECASTED_INFRARED_FLUX: &str = "Forecasted downward longwave radiation flux in [W/m2]";
pub const FORECASTED_ANTHROPOGENIC_FLUX: &str = "Forecasted anthropogenic heat flux in [W/m2]";
pub const FORECASTED_PRECIPITATION_TYPE: &str = "Forecasted precipitation type code";
pub const FORECASTED_PRECIPITATION_PROBABILITY: &str =
    "Forecasted probability of precipitation in [%]";
pub const FORECASTED_VISIBILITY: &str = "Forecasted visibility in [m]";
pub const FORECASTED_ROAD_SURFACE_TEMPERATURE: &str =
    "Forecasted road surface temperature in [deg C]";

const AIR_TEMPERATURE: &[MetroTag] = &[Forecast(ForecastTag::AirTemperature)];
const DEW_POINT: &[MetroTag] = &[Forecast(ForecastTag::DewPoint)];
const WIND_SPEED: &[MetroTag] = &[Forecast(ForecastTag::WindSpeed)];
const PRESSURE: &[MetroTag] = &[Forecast(ForecastTag::Pressure)];
const RAIN: &[MetroTag] = &[Forecast(ForecastTag::RainAccumulation)];
const SNOW: &[MetroTag] = &[Forecast(ForecastTag::SnowAccumulation)];
const CLOUD_COVER: &[MetroTag] = &[Forecast(ForecastTag::CloudCover)];
const SOLAR_FLUX: &[MetroTag] = &[Forecast(ForecastTag::SolarFlux)];
const INFRARED_FLUX: &[MetroTag] = &[Forecast(ForecastTag::InfraredFlux)];
const ANTHROPOGENIC_FLUX: &[MetroTag] = &[Forecast(ForecastTag::AnthropogenicFlux)];
const NONE: &[MetroTag] = &[];

const fn forecasted(
    label: &'static str,
    validity: Validity,
    policy: ConversionPolicy,
    feeds: &'static [MetroTag],
) -> ParameterDefinition {
    ParameterDefinition::forecasted(label, validity, policy, feeds)
}

pub static FORECASTED_PARAMETERS: &[ParameterDefinition] = &[
    forecasted(
        FORECASTED_AIR_TEMPERATURE_2M,
        Validity::range(-90.0, 60.0),
        Identity,
        AIR_TEMPERATURE,
    ),
    forecasted(
        FORECASTED_DEW_POINT_2M,
        Validity::range(-90.0, 60.0),
        Identity,
        DEW_POINT,
    ),
    forecasted(
        FORECASTED_RELATIVE_HUMIDITY_2M,
        Validity::range(0.0, 100.0),
        NotConvertible,
        NONE,
    ),
    forecasted(
        FORECASTED_WIND_SPEED_10M,
        Validity::range(0.0, 75.0),
        UnitScale(MS_TO_KMH),
        WIND_SPEED,
    ),
    forecasted(
        FORECASTED_WIND_DIRECTION_10M,
        Validity::range(0.0, 360.0),
        NotConvertible,
        NONE,
    ),
    forecasted(
        FORECASTED_PRESSURE_MSL,
        Validity::range(30_000.0, 110_000.0),
        UnitScale(PA_TO_HPA),
        PRESSURE,
    ),
    forecasted(
        FORECASTED_PRESSURE_GROUND,
        Validity::range(30_000.0, 110_000.0),
        UnitScale(PA_TO_HPA),
        PRESSURE,
    ),
    forecasted(
        FORECASTED_RAIN_ACCUMULATION_1H,
        Validity::range(0.0, 500.0),
        Identity,
        RAIN,
    ),
    forecasted(
        FORECASTED_SNOW_ACCUMULATION_1H_CM,
        Validity::range(0.0, 500.0),
        Identity,
        SNOW,
    ),
    forecasted(
        FORECASTED_SNOW_ACCUMULATION_1H_MM,
        Validity::range(0.0, 5000.0),
        UnitScale(MM_TO_CM),
        SNOW,
    ),
    forecasted(
        FORECASTED_CLOUD_COVER_PERCENT,
        Validity::range(0.0, 100.0),
        UnitScale(PERCENT_TO_OCTAS),
        CLOUD_COVER,
    ),
    forecasted(
        FORECASTED_CLOUD_COVER_OCTAS,
        Validity::range(0.0, 8.0),
        Identity,
        CLOUD_COVER,
    ),
    forecasted(
        FORECASTED_SOLAR_FLUX,
        Validity::range(0.0, 1500.0),
        Identity,
        SOLAR_FLUX,
    ),
    forecasted(
        FORECASTED_INFRARED_FLUX,
        Validity::range(0.0, 1000.0),
        Identity,
        INFRARED_FLUX,
    ),
    forecasted(
        FORECASTED_ANTHROPOGENIC_FLUX,
        Validity::range(0.0, 1000.0),
        Identity,
        ANTHROPOGENIC_FLUX,
    ),
    forecasted(
        FORECASTED_PRECIPITATION_TYPE,
        Codes(PRECIPITATION_TYPE_CODES),
        NotConvertible,
        NONE,
    ),
    forecasted(
        FORECASTED_PRECIPITATION_PROBABILITY,
        Validity::range(0.0, 100.0),
        NotConvertible,
        NONE,
    ),
    forecasted(
        FORECASTED_VISIBILITY,
        Validity::range(0.0, 100_000.0),
        NotConvertible,
        NONE,
    ),
    // output of an external road model, not a METRo input
    forecasted(
        FORECASTED_ROAD_SURFACE_TEMPERATURE,
        Validity::range(-60.0, 80.0),
        NotConvertible,
        NONE,
    ),
];
