use bytemuck::{Pod, Zeroable};

/// A sound cue emitted by the experience.
/// The numeric value maps to a track action in the browser's audio player
/// (see [`AudioManifest`](crate::assets::manifest::AudioManifest)).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct SoundEvent(pub u32);

impl SoundEvent {
    pub const AMBIENT_START: SoundEvent = SoundEvent(1);
    pub const AMBIENT_STOP: SoundEvent = SoundEvent(2);
    pub const MONTAGE_START: SoundEvent = SoundEvent(3);
    pub const MONTAGE_STOP: SoundEvent = SoundEvent(4);
}

/// An event communicated from Rust to the presentation layer via the frame buffer.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct StageEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl StageEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: f32, a: f32, b: f32) -> Self {
        Self { kind, a, b, c: 0.0 }
    }
}

/// Host-provided values the engine cannot produce on its own
/// (no wall clock or entropy source inside the engine).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HostSeed {
    /// Wall-clock time at startup, milliseconds since the Unix epoch.
    pub epoch_ms: u64,
    /// A float in [0, 1) from the host's random source.
    pub entropy: f64,
}
