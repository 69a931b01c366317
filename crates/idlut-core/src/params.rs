//! Window parameters and narrowing policy.
//!
//! `WindowParams` is the serializable description of a linear LUT. The CLI
//! reads it from a JSON config file and overrides fields from flags.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::LutError;
use crate::lut::Lut;

/// How out-of-range entries are handled when narrowing to 8 bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrowingPolicy {
    /// Saturate to `0..=255`.
    #[default]
    Clamp,
    /// Fail on the first entry outside `0..=255`.
    Reject,
}

impl fmt::Display for NarrowingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clamp => write!(f, "clamp"),
            Self::Reject => write!(f, "reject"),
        }
    }
}

/// Input and output bounds of a linear window LUT.
///
/// Missing fields take their values from the identity window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowParams {
    pub input_min: i32,
    pub input_max: i32,
    pub output_min: i32,
    pub output_max: i32,
    /// Narrowing used when the window is converted to a byte LUT.
    pub narrowing: NarrowingPolicy,
}

impl Default for WindowParams {
    fn default() -> Self {
        Self {
            input_min: 0,
            input_max: 255,
            output_min: 0,
            output_max: 255,
            narrowing: NarrowingPolicy::Clamp,
        }
    }
}

impl WindowParams {
    /// Build the long-valued LUT for this window.
    pub fn to_lut(&self) -> Result<Lut, LutError> {
        Lut::linear(
            self.input_min,
            self.input_max,
            self.output_min,
            self.output_max,
        )
    }

    pub fn from_json(json: &str) -> Result<Self, LutError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, LutError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_window_is_identity() {
        assert_eq!(WindowParams::default().to_lut().unwrap(), Lut::identity());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let params = WindowParams::from_json(r#"{ "input_min": 20, "narrowing": "reject" }"#).unwrap();
        assert_eq!(params.input_min, 20);
        assert_eq!(params.input_max, 255);
        assert_eq!(params.narrowing, NarrowingPolicy::Reject);
    }

    #[test]
    fn test_json_roundtrip() {
        let params = WindowParams {
            input_min: 10,
            input_max: 90,
            output_min: 255,
            output_max: 0,
            narrowing: NarrowingPolicy::Reject,
        };
        let back = WindowParams::from_json(&params.to_json().unwrap()).unwrap();
        assert_eq!(back, params);
    }

    #[test]
    fn test_malformed_json_is_reported() {
        let err = WindowParams::from_json("{ input_min: }").unwrap_err();
        assert!(matches!(err, LutError::Json(_)));
    }

    #[test]
    fn test_narrowing_policy_display() {
        assert_eq!(NarrowingPolicy::default().to_string(), "clamp");
        assert_eq!(NarrowingPolicy::Reject.to_string(), "reject");
    }
}
