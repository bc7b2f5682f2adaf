use serde::{Deserialize, Serialize};
use std::fmt;

/// Qualitative band for a slider value.
///
/// Cut points: Very Low <= 2, Low <= 4, Medium <= 6, High <= 8, Very High above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseBand {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl ResponseBand {
    pub const ALL: [ResponseBand; 5] = [
        ResponseBand::VeryLow,
        ResponseBand::Low,
        ResponseBand::Medium,
        ResponseBand::High,
        ResponseBand::VeryHigh,
    ];

    pub fn from_value(value: f64) -> Self {
        if value <= 2.0 {
            ResponseBand::VeryLow
        } else if value <= 4.0 {
            ResponseBand::Low
        } else if value <= 6.0 {
            ResponseBand::Medium
        } else if value <= 8.0 {
            ResponseBand::High
        } else {
            ResponseBand::VeryHigh
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ResponseBand::VeryLow => "Very Low",
            ResponseBand::Low => "Low",
            ResponseBand::Medium => "Medium",
            ResponseBand::High => "High",
            ResponseBand::VeryHigh => "Very High",
        }
    }
}

impl fmt::Display for ResponseBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
