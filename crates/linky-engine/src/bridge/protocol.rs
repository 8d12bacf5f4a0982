/// Frame buffer layout.
/// Must stay in sync with the presentation layer's `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 8 floats]
/// [Sounds: max_sounds × 1 float]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written into the header every frame.
/// The browser reads them from the header to compute offsets dynamically.

use crate::api::stage::StageConfig;
use crate::api::types::{SoundEvent, StageEvent};

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 8;

/// Header field indices.
pub const HEADER_PROTOCOL_VERSION: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_SOUNDS: usize = 2;
pub const HEADER_SOUND_COUNT: usize = 3;
pub const HEADER_MAX_EVENTS: usize = 4;
pub const HEADER_EVENT_COUNT: usize = 5;
pub const HEADER_DROPPED: usize = 6;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per stage event: kind, a, b, c (fixed wire format).
pub const EVENT_FLOATS: usize = StageEvent::FLOATS;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    /// Maximum sound events per frame.
    pub max_sounds: usize,
    /// Maximum stage events per frame.
    pub max_events: usize,

    /// Size of sound data section in floats.
    pub sound_data_floats: usize,
    /// Size of event data section in floats.
    pub event_data_floats: usize,

    /// Offset (in floats) where sound data begins.
    pub sound_data_offset: usize,
    /// Offset (in floats) where event data begins.
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_sounds: usize, max_events: usize) -> Self {
        let sound_data_floats = max_sounds;
        let event_data_floats = max_events * EVENT_FLOATS;

        let sound_data_offset = HEADER_FLOATS;
        let event_data_offset = sound_data_offset + sound_data_floats;
        let buffer_total_floats = event_data_offset + event_data_floats;

        Self {
            max_sounds,
            max_events,
            sound_data_floats,
            event_data_floats,
            sound_data_offset,
            event_data_offset,
            buffer_total_floats,
        }
    }

    /// Compute layout from a StageConfig.
    pub fn from_config(config: &StageConfig) -> Self {
        Self::new(config.max_sounds, config.max_events)
    }

    /// Write one frame into `out` (resized to the full layout).
    /// Entries beyond capacity are dropped; the drop count goes into the header.
    pub fn pack(
        &self,
        frame: u32,
        sounds: &[SoundEvent],
        events: &[StageEvent],
        out: &mut Vec<f32>,
    ) {
        out.clear();
        out.resize(self.buffer_total_floats, 0.0);

        let sound_count = sounds.len().min(self.max_sounds);
        let event_count = events.len().min(self.max_events);
        let dropped = (sounds.len() - sound_count) + (events.len() - event_count);

        out[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        out[HEADER_FRAME_COUNTER] = frame as f32;
        out[HEADER_MAX_SOUNDS] = self.max_sounds as f32;
        out[HEADER_SOUND_COUNT] = sound_count as f32;
        out[HEADER_MAX_EVENTS] = self.max_events as f32;
        out[HEADER_EVENT_COUNT] = event_count as f32;
        out[HEADER_DROPPED] = dropped as f32;

        for (i, sound) in sounds.iter().take(sound_count).enumerate() {
            out[self.sound_data_offset + i] = sound.0 as f32;
        }

        let floats: &[f32] = bytemuck::cast_slice(&events[..event_count]);
        out[self.event_data_offset..self.event_data_offset + floats.len()].copy_from_slice(floats);

        if dropped > 0 {
            log::warn!("frame {}: dropped {} sound/stage events over capacity", frame, dropped);
        }
    }
}
