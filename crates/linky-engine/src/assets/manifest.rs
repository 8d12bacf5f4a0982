use serde::{Deserialize, Serialize};

use crate::api::types::SoundEvent;

/// Audio manifest describing the two tracks the experience can play.
/// Served to the browser as JSON so its player knows which file each
/// sound event controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioManifest {
    /// Background music, played outside the montage.
    #[serde(default = "default_ambient")]
    pub ambient: TrackDescriptor,
    /// Montage soundscape, played once while the montage is on screen.
    #[serde(default = "default_montage")]
    pub montage: TrackDescriptor,
}

/// Describes one audio file and the events that start/stop it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackDescriptor {
    /// Path to the audio file (e.g., "/audio/bgm.mp3").
    pub path: String,
    /// Playback volume in [0, 1].
    #[serde(default = "default_volume")]
    pub volume: f32,
    /// Whether the track loops.
    #[serde(default)]
    pub looped: bool,
    /// Sound event that starts the track.
    pub start_event: u32,
    /// Sound event that stops the track and releases it.
    pub stop_event: u32,
}

fn default_volume() -> f32 {
    1.0
}

fn default_ambient() -> TrackDescriptor {
    TrackDescriptor {
        path: "/audio/bgm.mp3".to_string(),
        volume: 0.35,
        looped: true,
        start_event: SoundEvent::AMBIENT_START.0,
        stop_event: SoundEvent::AMBIENT_STOP.0,
    }
}

fn default_montage() -> TrackDescriptor {
    TrackDescriptor {
        path: "/audio/montage.mp3".to_string(),
        volume: 0.4,
        looped: false,
        start_event: SoundEvent::MONTAGE_START.0,
        stop_event: SoundEvent::MONTAGE_STOP.0,
    }
}

impl Default for AudioManifest {
    fn default() -> Self {
        Self {
            ambient: default_ambient(),
            montage: default_montage(),
        }
    }
}

impl AudioManifest {
    /// Parse a manifest from a JSON string. Missing tracks fall back to the defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
