use num::Float;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Default distance between two scanned output values
pub const DEFAULT_STEP: f64 = 0.01;

/// How output values are generated while scanning the regulator domain.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    /// `min + i * step`: no drift, an exactly divisible domain ends on `max`
    #[default]
    Indexed,
    /// `value += step` until past `max`, drift included
    Accumulated,
}

/// What to do when two term definitions share a name.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Log a warning and keep the definition read last
    #[default]
    Warn,
    /// Fail construction
    Reject,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    pub step: f64,
    pub scan: ScanMode,
    pub duplicate_terms: DuplicatePolicy,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            step: DEFAULT_STEP,
            scan: ScanMode::default(),
            duplicate_terms: DuplicatePolicy::default(),
        }
    }
}

impl InferenceConfig {
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    pub fn with_scan(mut self, scan: ScanMode) -> Self {
        self.scan = scan;
        self
    }

    pub fn with_duplicate_terms(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_terms = policy;
        self
    }

    /// The step converted to the working float type, if usable.
    pub(crate) fn step_as<F: Float>(&self) -> Result<F> {
        if !self.step.is_finite() || self.step <= 0. {
            return Err(ConfigError::InvalidStep);
        }

        match F::from(self.step) {
            Some(step) if step > F::zero() => Ok(step),
            _ => Err(ConfigError::InvalidStep),
        }
    }
}

#[test]
fn test_defaults() {
    let config = InferenceConfig::default();

    assert_eq!(config.step, 0.01);
    assert_eq!(config.scan, ScanMode::Indexed);
    assert_eq!(config.duplicate_terms, DuplicatePolicy::Warn);
    assert_eq!(config.step_as::<f64>().unwrap(), 0.01);
}

#[test]
fn test_partial_json() {
    let config: InferenceConfig = serde_json::from_str(r#"{"scan": "accumulated"}"#).unwrap();

    assert_eq!(config.step, DEFAULT_STEP);
    assert_eq!(config.scan, ScanMode::Accumulated);

    let config: InferenceConfig = serde_json::from_str(r#"{"step": 0.5, "duplicate_terms": "reject"}"#).unwrap();

    assert_eq!(config.step, 0.5);
    assert_eq!(config.duplicate_terms, DuplicatePolicy::Reject);
}

#[test]
fn test_invalid_step() {
    for step in [0., -0.1, f64::NAN, f64::INFINITY] {
        let config = InferenceConfig::default().with_step(step);

        assert!(matches!(config.step_as::<f64>(), Err(ConfigError::InvalidStep)));
    }
}
