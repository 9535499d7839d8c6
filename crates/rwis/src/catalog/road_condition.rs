//! Road condition codes reported by road weather sensors, and the SSI codes
//! METRo expects for its `sc` observation.

pub const SENSOR_ERROR: f64 = 0.0;
pub const SENSOR_DRY: f64 = 1.0;
pub const SENSOR_MOIST: f64 = 2.0;
pub const SENSOR_WET: f64 = 3.0;
pub const SENSOR_WET_AND_SALTED: f64 = 4.0;
pub const SENSOR_FROST: f64 = 5.0;
pub const SENSOR_SNOW: f64 = 6.0;
pub const SENSOR_CRITICAL: f64 = 7.0;
pub const SENSOR_ICE: f64 = 8.0;
pub const SENSOR_SLUSH: f64 = 9.0;
pub const SENSOR_UNKNOWN: f64 = 99.0;

pub const SENSOR_CODES: &[f64] = &[
    SENSOR_ERROR,
    SENSOR_DRY,
    SENSOR_MOIST,
    SENSOR_WET,
    SENSOR_WET_AND_SALTED,
    SENSOR_FROST,
    SENSOR_SNOW,
    SENSOR_CRITICAL,
    SENSOR_ICE,
    SENSOR_SLUSH,
    SENSOR_UNKNOWN,
];

pub const SSI_DRY: f64 = 33.0;
pub const SSI_WET: f64 = 34.0;
pub const SSI_ICE_OR_SNOW: f64 = 35.0;
pub const SSI_WATER_AND_SNOW: f64 = 36.0;
pub const SSI_DEW: f64 = 37.0;
pub const SSI_MELTING_SNOW: f64 = 38.0;
pub const SSI_FROST: f64 = 39.0;
pub const SSI_ICING_RAIN: f64 = 40.0;

/// 41 to 43 are accepted by METRo but never produced by the sensor table.
pub const SSI_CODES: &[f64] = &[
    SSI_DRY,
    SSI_WET,
    SSI_ICE_OR_SNOW,
    SSI_WATER_AND_SNOW,
    SSI_DEW,
    SSI_MELTING_SNOW,
    SSI_FROST,
    SSI_ICING_RAIN,
    41.0,
    42.0,
    43.0,
];

/// Sensor state to SSI. Lossy: moisture levels and salting collapse onto
/// "wet", snow and ice onto "ice/snow". `SENSOR_ERROR` and `SENSOR_UNKNOWN`
/// have no counterpart.
pub const SENSOR_TO_SSI: &[(f64, f64)] = &[
    (SENSOR_DRY, SSI_DRY),
    (SENSOR_MOIST, SSI_WET),
    (SENSOR_WET, SSI_WET),
    (SENSOR_WET_AND_SALTED, SSI_WET),
    (SENSOR_FROST, SSI_FROST),
    (SENSOR_SNOW, SSI_ICE_OR_SNOW),
    (SENSOR_CRITICAL, SSI_ICING_RAIN),
    (SENSOR_ICE, SSI_ICE_OR_SNOW),
    (SENSOR_SLUSH, SSI_WATER_AND_SNOW),
];
