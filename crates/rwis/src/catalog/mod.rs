//! Parameter catalog.
//!
//! Every measured and forecasted quantity RWIS knows about is described by a
//! [`ParameterDefinition`]: a unique label, a validity rule (closed numeric
//! interval or finite set of categorical codes), the METRo inputs it can
//! stand in for and a policy for turning a valid value into such an input.
//! The [`Catalog`] is built once at startup and shared read-only afterwards.

mod forecasted;
mod measured;
pub mod road_condition;

pub use forecasted::*;
pub use measured::*;

use crate::metro::MetroTag;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    Measured,
    Forecasted,
}

/// Physical plausibility rule of a parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Validity {
    /// Closed interval, both bounds inclusive.
    Range { min: f64, max: f64 },
    /// Finite set of codes, compared with exact floating point equality.
    Codes(&'static [f64]),
}

impl Validity {
    pub const fn range(min: f64, max: f64) -> Self {
        Validity::Range { min, max }
    }
}

/// How a valid value is turned into a METRo input value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConversionPolicy {
    Identity,
    /// Multiply by a constant, e.g. m/s to km/h.
    UnitScale(f64),
    /// 1.0 when the value is above zero, 0.0 otherwise.
    ThresholdToIndicator,
    /// Explicit `(from, to)` code table.
    CategoricalRemap(&'static [(f64, f64)]),
    /// The quantity has no METRo counterpart.
    NotConvertible,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterDefinition {
    pub label: &'static str,
    pub kind: ParameterKind,
    pub validity: Validity,
    pub policy: ConversionPolicy,
    /// METRo inputs this parameter can feed; empty when not convertible.
    pub feeds: &'static [MetroTag],
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("Duplicate parameter label: {0}")]
    DuplicateLabel(String),
    #[error("Invalid range for {label}: [{min}, {max}]")]
    InvalidRange { label: String, min: f64, max: f64 },
    #[error("{0} must feed METRo inputs if and only if it is convertible")]
    FeedsMismatch(String),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum InvalidValue {
    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),
    #[error("{value} is outside [{min}, {max}] for {label}")]
    OutOfRange {
        label: String,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("{value} is not a valid code for {label}")]
    InvalidCategoricalValue { label: String, value: f64 },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),
    #[error("{label} cannot feed METRo {tag}")]
    NotConvertible { label: String, tag: MetroTag },
    #[error("Failed to transform {value} of {label}")]
    TransformationFailed { label: String, value: f64 },
}

impl ParameterDefinition {
    pub const fn measured(
        label: &'static str,
        validity: Validity,
        policy: ConversionPolicy,
        feeds: &'static [MetroTag],
    ) -> Self {
        Self {
            label,
            kind: ParameterKind::Measured,
            validity,
            policy,
            feeds,
        }
    }

    pub const fn forecasted(
        label: &'static str,
        validity: Validity,
        policy: ConversionPolicy,
        feeds: &'static [MetroTag],
    ) -> Self {
        Self {
            label,
            kind: ParameterKind::Forecasted,
            validity,
            policy,
            feeds,
        }
    }

    pub fn is_convertible(&self) -> bool {
        self.policy != ConversionPolicy::NotConvertible
    }

    pub fn can_feed(&self, tag: MetroTag) -> bool {
        self.feeds.contains(&tag)
    }

    pub fn check(&self, value: f64) -> Result<(), InvalidValue> {
        match self.validity {
            Validity::Range { min, max } => {
                if min <= value && value <= max {
                    Ok(())
                } else {
                    Err(InvalidValue::OutOfRange {
                        label: self.label.to_owned(),
                        value,
                        min,
                        max,
                    })
                }
            }
            Validity::Codes(codes) => {
                // exact match; no tolerance is defined for sensor codes
                if codes.iter().any(|code| *code == value) {
                    Ok(())
                } else {
                    Err(InvalidValue::InvalidCategoricalValue {
                        label: self.label.to_owned(),
                        value,
                    })
                }
            }
        }
    }

    /// Turns a valid value into the METRo input `tag`. Fails with
    /// `NotConvertible` for a tag this parameter does not feed.
    pub fn convert(&self, tag: MetroTag, value: f64) -> Result<f64, ConversionError> {
        if !self.can_feed(tag) {
            return Err(self.not_convertible(tag));
        }
        match self.policy {
            ConversionPolicy::Identity => Ok(value),
            ConversionPolicy::UnitScale(factor) => Ok(value * factor),
            ConversionPolicy::ThresholdToIndicator => Ok(if value > 0.0 { 1.0 } else { 0.0 }),
            ConversionPolicy::CategoricalRemap(table) => table
                .iter()
                .find(|(from, _)| *from == value)
                .map(|(_, to)| *to)
                .ok_or_else(|| ConversionError::TransformationFailed {
                    label: self.label.to_owned(),
                    value,
                }),
            ConversionPolicy::NotConvertible => Err(self.not_convertible(tag)),
        }
    }

    fn not_convertible(&self, tag: MetroTag) -> ConversionError {
        ConversionError::NotConvertible {
            label: self.label.to_owned(),
            tag,
        }
    }
}

/// Read-only registry of parameter definitions keyed by label.
#[derive(Debug, Clone)]
pub struct Catalog {
    definitions: HashMap<&'static str, ParameterDefinition>,
}

impl Catalog {
    /// Builds a catalog, refusing duplicate labels, malformed ranges and
    /// definitions whose policy disagrees with the inputs they feed.
    pub fn build<I>(definitions: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = ParameterDefinition>,
    {
        let mut by_label = HashMap::new();
        for definition in definitions {
            if let Validity::Range { min, max } = definition.validity {
                if !(min.is_finite() && max.is_finite() && min <= max) {
                    return Err(CatalogError::InvalidRange {
                        label: definition.label.to_owned(),
                        min,
                        max,
                    });
                }
            }
            if definition.is_convertible() == definition.feeds.is_empty() {
                return Err(CatalogError::FeedsMismatch(definition.label.to_owned()));
            }
            if by_label.insert(definition.label, definition).is_some() {
                return Err(CatalogError::DuplicateLabel(definition.label.to_owned()));
            }
        }
        Ok(Self {
            definitions: by_label,
        })
    }

    /// All measured and forecasted parameters known to RWIS.
    pub fn standard() -> Result<Self, CatalogError> {
        Self::build(
            MEASURED_PARAMETERS
                .iter()
                .chain(FORECASTED_PARAMETERS.iter())
                .copied(),
        )
    }

    pub fn get(&self, label: &str) -> Option<&ParameterDefinition> {
        self.definitions.get(label)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn definitions(&self) -> impl Iterator<Item = &ParameterDefinition> {
        self.definitions.values()
    }

    /// True when `value` is physically plausible for `label`. Unknown labels
    /// are never valid.
    pub fn validate(&self, label: &str, value: f64) -> bool {
        self.check(label, value).is_ok()
    }

    pub fn check(&self, label: &str, value: f64) -> Result<(), InvalidValue> {
        self.get(label)
            .ok_or_else(|| InvalidValue::UnknownParameter(label.to_owned()))?
            .check(value)
    }

    pub fn convert_for_model_input(
        &self,
        label: &str,
        tag: MetroTag,
        value: f64,
    ) -> Result<f64, ConversionError> {
        self.get(label)
            .ok_or_else(|| ConversionError::UnknownParameter(label.to_owned()))?
            .convert(tag, value)
    }
}
