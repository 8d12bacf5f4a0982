pub mod api;
pub mod core;
pub mod input;
pub mod bridge;
pub mod assets;
pub mod audio;
pub mod quiz;
pub mod sequencer;
pub mod report;

// Re-export key types at crate root for convenience
pub use api::stage::{Experience, StageConfig, StageContext};
pub use api::types::{HostSeed, SoundEvent, StageEvent};
pub use core::rng::Rng;
pub use core::scheduler::{Scheduler, TaskId};
pub use core::time::FrameClock;
pub use input::queue::{InputEvent, InputQueue};
pub use assets::manifest::{AudioManifest, TrackDescriptor};
pub use audio::director::{AudioCue, AudioDirector};
pub use bridge::protocol::ProtocolLayout;
pub use quiz::{Category, Choice, Question, Recommendation, ResultProfile, Weights};
pub use sequencer::{
    generate_session_id, Command, Rejection, SceneId, SceneView, Sequencer, SequencerEvent,
    Timings,
};
pub use report::{dispatch, DispatchStatus, ReportError, ReportTransport, SaveRequest};
