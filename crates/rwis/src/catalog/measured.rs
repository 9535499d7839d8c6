use super::{
    road_condition::{SENSOR_CODES, SENSOR_TO_SSI, SSI_CODES},
    ConversionPolicy::{
        self, CategoricalRemap, Identity, NotConvertible, ThresholdToIndicator, UnitScale,
    },
    ParameterDefinition,
    Validity::{self, Codes},
};

use crate::metro::MetroTag::{self, Observation};
use crate::metro::ObservationTag;

const MS_TO_KMH: f64 = 3.6;

pub const MEASURED_AIR_TEMPERATURE_150CM: &str = "Temperature in [deg C] @ 150cm above ground";
pub const MEASURED_AIR_TEMPERATURE_200CM: &str = "Temperature in [deg C] @ 200cm above ground";
pub const MEASURED_DEW_POINT_150CM: &str = "Dew point temperature in [deg C] @ 150cm above ground";
pub const MEASURED_RELATIVE_HUMIDITY: &str = "Relative humidity in [%] @ 150cm above ground";
pub const MEASURED_WIND_SPEED_10M: &str = "Wind speed in [m/s] @ 10m above ground";
pub const MEASURED_AVERAGE_WIND_SPEED_10M: &str = "Average wind speed in [m/s] @ 10m above ground";
pub const MEASURED_WIND_GUST_10M: &str = "Wind gust in [m/s] @ 10m above ground";
pub const MEASURED_WIND_DIRECTION: &str = "Wind direction in [deg]";
pub const MEASURED_PRECIPITATION_INTENSITY: &str = "Total precipitation rate in [mm/h]";
pub const MEASURED_PRECIPITATION_1H: &str = "Precipitation sum in [mm] over last 1h";
pub const MEASURED_PRECIPITATION_PRESENCE: &str = "Precipitation presence indicator";
pub const MEASURED_PRECIPITATION_TYPE: &str = "Precipitation type code";
pub const MEASURED_ROAD_CONDITION: &str = "Road condition code (sensor)";
pub const MEASURED_ROAD_CONDITION_SSI: &str = "Road condition in [SSI code]";
pub const MEASURED_ROAD_SURFACE_TEMPERATURE: &str = "Road surface temperature in [deg C]";
pub const MEASURED_ROAD_SUBSURFACE_TEMPERATURE: &str =
    "Road sub-surface temperature in [deg C] @ 6cm below surface";
pub const MEASURED_GROUND_TEMPERATURE_40CM: &str =
    "Ground temperature in [deg C] @ 40cm below surface";
pub const MEASURED_WATER_FILM_HEIGHT: &str = "Water film height in [mm]";
pub const MEASURED_FREEZING_POINT: &str = "Freezing point in [deg C]";
pub const MEASURED_FRICTION: &str = "Friction coefficient";
pub const MEASURED_VISIBILITY: &str = "Visibility in [m]";
pub const MEASURED_AIR_PRESSURE: &str = "Air pressure in [hPa]";

const PRECIPITATION_PRESENCE_CODES: &[f64] = &[0.0, 1.0];
/// none, drizzle, rain, sleet, snow, freezing rain, hail
pub(super) const PRECIPITATION_TYPE_CODES: &[f64] = &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0];

const AIR_TEMPERATURE: &[MetroTag] = &[Observation(ObservationTag::AirTemperature)];
const DEW_POINT: &[MetroTag] = &[Observation(ObservationTag::DewPoint)];
const WIND_SPEED: &[MetroTag] = &[Observation(ObservationTag::WindSpeed)];
const PRECIPITATION: &[MetroTag] = &[Observation(ObservationTag::PrecipitationPresence)];
const ROAD_CONDITION: &[MetroTag] = &[Observation(ObservationTag::RoadCondition)];
const SURFACE_TEMPERATURE: &[MetroTag] = &[Observation(ObservationTag::SurfaceTemperature)];
const SUBSURFACE_TEMPERATURE: &[MetroTag] = &[Observation(ObservationTag::SubSurfaceTemperature)];
const NONE: &[MetroTag] = &[];

const fn measured(
    label: &'static str,
    validity: Validity,
    policy: ConversionPolicy,
    feeds: &'static [MetroTag],
) -> ParameterDefinition {
    ParameterDefinition::measured(label, validity, policy, feeds)
}

pub static MEASURED_PARAMETERS: &[ParameterDefinition] = &[
    measured(
        MEASURED_AIR_TEMPERATURE_150CM,
        Validity::range(-60.0, 60.0),
        Identity,
        AIR_TEMPERATURE,
    ),
    measured(
        MEASURED_AIR_TEMPERATURE_200CM,
        Validity::range(-60.0, 60.0),
        Identity,
        AIR_TEMPERATURE,
    ),
    measured(
        MEASURED_DEW_POINT_150CM,
        Validity::range(-60.0, 60.0),
        Identity,
        DEW_POINT,
    ),
    measured(
        MEASURED_RELATIVE_HUMIDITY,
        Validity::range(0.0, 100.0),
        NotConvertible,
        NONE,
    ),
    measured(
        MEASURED_WIND_SPEED_10M,
        Validity::range(0.0, 75.0),
        UnitScale(MS_TO_KMH),
        WIND_SPEED,
    ),
    measured(
        MEASURED_AVERAGE_WIND_SPEED_10M,
        Validity::range(0.0, 75.0),
        UnitScale(MS_TO_KMH),
        WIND_SPEED,
    ),
    measured(
        MEASURED_WIND_GUST_10M,
        Validity::range(0.0, 100.0),
        NotConvertible,
        NONE,
    ),
    measured(
        MEASURED_WIND_DIRECTION,
        Validity::range(0.0, 360.0),
        NotConvertible,
        NONE,
    ),
    measured(
        MEASURED_PRECIPITATION_INTENSITY,
        Validity::range(0.0, 300.0),
        ThresholdToIndicator,
        PRECIPITATION,
    ),
    measured(
        MEASURED_PRECIPITATION_1H,
        Validity::range(0.0, 300.0),
        ThresholdToIndicator,
        PRECIPITATION,
    ),
    measured(
        MEASURED_PRECIPITATION_PRESENCE,
        Codes(PRECIPITATION_PRESENCE_CODES),
        Identity,
        PRECIPITATION,
    ),
    measured(
        MEASURED_PRECIPITATION_TYPE,
        Codes(PRECIPITATION_TYPE_CODES),
        NotConvertible,
        NONE,
    ),
    measured(
        MEASURED_ROAD_CONDITION,
        Codes(SENSOR_CODES),
        CategoricalRemap(SENSOR_TO_SSI),
        ROAD_CONDITION,
    ),
    measured(
        MEASURED_ROAD_CONDITION_SSI,
        Codes(SSI_CODES),
        Identity,
        ROAD_CONDITION,
    ),
    measured(
        MEASURED_ROAD_SURFACE_TEMPERATURE,
        Validity::range(-60.0, 80.0),
        Identity,
        SURFACE_TEMPERATURE,
    ),
    measured(
        MEASURED_ROAD_SUBSURFACE_TEMPERATURE,
        Validity::range(-60.0, 60.0),
        Identity,
        SUBSURFACE_TEMPERATURE,
    ),
    measured(
        MEASURED_GROUND_TEMPERATURE_40CM,
        Validity::range(-60.0, 60.0),
        Identity,
        SUBSURFACE_TEMPERATURE,
    ),
    measured(
        MEASURED_WATER_FILM_HEIGHT,
        Validity::range(0.0, 10.0),
        NotConvertible,
        NONE,
    ),
    measured(
        MEASURED_FREEZING_POINT,
        Validity::range(-60.0, 0.0),
        NotConvertible,
        NONE,
    ),
    measured(
        MEASURED_FRICTION,
        Validity::range(0.0, 1.0),
        NotConvertible,
        NONE,
    ),
    measured(
        MEASURED_VISIBILITY,
        Validity::range(0.0, 100_000.0),
        NotConvertible,
        NONE,
    ),
    measured(
        MEASURED_AIR_PRESSURE,
        Validity::range(300.0, 1100.0),
        NotConvertible,
        NONE,
    ),
];
