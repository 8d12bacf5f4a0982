use crate::api::types::{HostSeed, SoundEvent, StageEvent};
use crate::assets::manifest::AudioManifest;
use crate::input::queue::InputQueue;
use crate::report::payload::SaveRequest;

/// Configuration for the stage runtime, provided by the experience.
#[derive(Debug, Clone, PartialEq)]
pub struct StageConfig {
    /// Upper bound on virtual milliseconds advanced per frame (default: 1000).
    pub max_frame_ms: u64,
    /// Maximum number of sound events per frame (default: 16).
    pub max_sounds: usize,
    /// Maximum number of stage events per frame (default: 32).
    pub max_events: usize,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            max_frame_ms: 1000,
            max_sounds: 16,
            max_events: 32,
        }
    }
}

/// The contract every experience must fulfill.
pub trait Experience {
    /// Return stage configuration. Called once before init.
    fn config(&self) -> StageConfig {
        StageConfig::default()
    }

    /// Apply host-supplied JSON configuration. Called before init; an empty
    /// string means "use defaults".
    fn configure(&mut self, _json: &str) -> Result<(), serde_json::Error> {
        Ok(())
    }

    /// Set up session state. `ctx.host()` carries the host clock and entropy.
    fn init(&mut self, ctx: &mut StageContext);

    /// One frame: apply queued input, then advance `ctx.frame_ms()` of virtual time.
    fn update(&mut self, ctx: &mut StageContext, input: &InputQueue);

    /// Tracks the browser should load, and the sound ids that drive them.
    fn audio_manifest(&self) -> AudioManifest {
        AudioManifest::default()
    }

    /// JSON snapshot of what the presentation layer should show right now.
    fn view_json(&self) -> String {
        "null".to_string()
    }

    /// Tear down: cancel pending timers and release audio.
    fn shutdown(&mut self, _ctx: &mut StageContext) {}
}

/// Mutable per-frame state, passed to Experience::init and Experience::update.
pub struct StageContext {
    pub sounds: Vec<SoundEvent>,
    pub events: Vec<StageEvent>,
    /// Save requests waiting to be handed to the report transport.
    pub reports: Vec<SaveRequest>,
    host: HostSeed,
    frame_ms: u64,
}

impl StageContext {
    pub fn new(host: HostSeed) -> Self {
        Self {
            sounds: Vec::new(),
            events: Vec::new(),
            reports: Vec::new(),
            host,
            frame_ms: 0,
        }
    }

    pub fn host(&self) -> HostSeed {
        self.host
    }

    /// Virtual milliseconds to advance during the current update.
    pub fn frame_ms(&self) -> u64 {
        self.frame_ms
    }

    pub fn set_frame_ms(&mut self, ms: u64) {
        self.frame_ms = ms;
    }

    /// Emit a sound event to be forwarded to the browser's audio player.
    pub fn emit_sound(&mut self, event: SoundEvent) {
        self.sounds.push(event);
    }

    /// Emit a stage event to be forwarded to the presentation layer.
    pub fn emit_event(&mut self, event: StageEvent) {
        self.events.push(event);
    }

    /// Queue a save request. The runner dispatches it after the frame, fire-and-forget.
    pub fn submit_report(&mut self, request: SaveRequest) {
        self.reports.push(request);
    }

    /// Clear per-frame transient data (sounds, events). Reports are drained by the runner.
    pub fn clear_frame_data(&mut self) {
        self.sounds.clear();
        self.events.clear();
        self.frame_ms = 0;
    }
}

impl Default for StageContext {
    fn default() -> Self {
        Self::new(HostSeed::default())
    }
}
