use serde::{Deserialize, Serialize};

/// Sequencer timing knobs. Any subset can be overridden from JSON;
/// missing fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    /// Delay between picking a choice and moving to the next scene (default: 800).
    pub choice_linger_ms: u64,
    /// Delay between picking a gathering and the brand scene (default: 900).
    pub recommendation_linger_ms: u64,
    /// Montage fast-forward tick while the visitor holds a press (default: 400).
    pub fast_forward_interval_ms: u64,
    /// Auto-advance out of the montage after its last phase; `null` disables (default: 6000).
    pub montage_auto_advance_ms: Option<u64>,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            choice_linger_ms: 800,
            recommendation_linger_ms: 900,
            fast_forward_interval_ms: 400,
            montage_auto_advance_ms: Some(6000),
        }
    }
}

impl Timings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
