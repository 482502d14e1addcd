//! Character counters for length-bounded text fields

use serde::{Deserialize, Serialize};

/// Warning tint above this share of the limit
const WARNING_PERCENT: f64 = 75.0;
/// Danger tint above this share of the limit
const DANGER_PERCENT: f64 = 90.0;

/// Visual emphasis of a counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterLevel {
    Normal,
    Warning,
    Danger,
}

/// Counter display for one field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterCount {
    pub count: usize,
    pub max: usize,
    pub level: CounterLevel,
}

impl CharacterCount {
    /// Count the raw (untrimmed) value against its limit
    pub fn measure(value: &str, max: usize) -> Self {
        let count = value.chars().count();
        let percent = if max == 0 {
            100.0
        } else {
            count as f64 / max as f64 * 100.0
        };
        let level = if percent > DANGER_PERCENT {
            CounterLevel::Danger
        } else if percent > WARNING_PERCENT {
            CounterLevel::Warning
        } else {
            CounterLevel::Normal
        };
        Self { count, max, level }
    }
}
