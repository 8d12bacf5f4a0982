pub mod director;

pub use director::{AudioCue, AudioDirector};
