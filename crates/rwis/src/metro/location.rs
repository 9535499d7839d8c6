use serde::{Deserialize, Serialize};
use std::fmt;

/// A point on the Earth's surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    /// Ground or water surface elevation in metres.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f64>,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            elevation: None,
        }
    }

    pub fn with_elevation(mut self, elevation: f64) -> Self {
        self.elevation = Some(elevation);
        self
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
            && self.elevation.map_or(true, f64::is_finite)
    }

    /// Stable lookup key; coordinates are rounded to 5 decimals (about a metre).
    pub fn key(&self) -> String {
        // adding 0.0 turns a rounded -0.0 into 0.0
        let round = |value: f64| (value * 1e5).round() / 1e5 + 0.0;
        format!("{:.5},{:.5}", round(self.latitude), round(self.longitude))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.elevation {
            Some(elevation) => write!(
                f,
                "({:.5}, {:.5}, {}m)",
                self.latitude, self.longitude, elevation
            ),
            None => write!(f, "({:.5}, {:.5})", self.latitude, self.longitude),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceKind {
    Measurement,
    Forecast,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Measurement => write!(f, "measurement"),
            SourceKind::Forecast => write!(f, "forecast"),
        }
    }
}

/// One provider of values for one parameter: a sensor or a forecast model,
/// possibly located away from the station it feeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSource {
    pub kind: SourceKind,
    pub location: Location,
    /// Label of the parameter definition this source provides.
    pub parameter: String,
    /// Sensor id for measurements, forecast model id for forecasts.
    pub source_id: String,
}

impl DataSource {
    pub fn measurement(
        parameter: impl Into<String>,
        sensor_id: impl Into<String>,
        location: Location,
    ) -> Self {
        Self {
            kind: SourceKind::Measurement,
            location,
            parameter: parameter.into(),
            source_id: sensor_id.into(),
        }
    }

    pub fn forecast(
        parameter: impl Into<String>,
        model_id: impl Into<String>,
        location: Location,
    ) -> Self {
        Self {
            kind: SourceKind::Forecast,
            location,
            parameter: parameter.into(),
            source_id: model_id.into(),
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} '{}' from {} at {}",
            self.kind, self.parameter, self.source_id, self.location
        )
    }
}

/// Candidate sources for one METRo input, highest priority first: index 0
/// is tried first and later entries are only fallbacks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourcePriorityList(Vec<DataSource>);

impl SourcePriorityList {
    pub fn new(sources: Vec<DataSource>) -> Self {
        Self(sources)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DataSource> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, priority: usize) -> Option<&DataSource> {
        self.0.get(priority)
    }
}

impl From<Vec<DataSource>> for SourcePriorityList {
    fn from(value: Vec<DataSource>) -> Self {
        Self(value)
    }
}

impl FromIterator<DataSource> for SourcePriorityList {
    fn from_iter<T: IntoIterator<Item = DataSource>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a SourcePriorityList {
    type Item = &'a DataSource;
    type IntoIter = std::slice::Iter<'a, DataSource>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
