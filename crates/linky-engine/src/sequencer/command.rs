use thiserror::Error;

use super::scene::SceneId;

/// A user action the sequencer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Entrance: step inside.
    Enter,
    /// Sound prompt: play with sound (`true`) or without.
    ChooseSound(bool),
    /// Montage: move on to the questions.
    Continue,
    /// Montage: press-and-hold begins (fast-forward).
    PressStart,
    /// Montage: press released.
    PressEnd,
    /// Question: pick a choice by index.
    SelectChoice(usize),
    /// Result: pick a recommended gathering by index.
    SelectRecommendation(usize),
    /// Any scene: flip the sound flag.
    ToggleSound,
}

impl Command {
    pub fn name(self) -> &'static str {
        match self {
            Command::Enter => "enter",
            Command::ChooseSound(_) => "choose-sound",
            Command::Continue => "continue",
            Command::PressStart => "press-start",
            Command::PressEnd => "press-end",
            Command::SelectChoice(_) => "select-choice",
            Command::SelectRecommendation(_) => "select-recommendation",
            Command::ToggleSound => "toggle-sound",
        }
    }
}

/// Why a command was ignored. A rejected command leaves the session untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("{command} is not available in scene {scene}")]
    NotInScene { command: &'static str, scene: SceneId },

    #[error("controls of scene {0} are not revealed yet")]
    NotRevealed(SceneId),

    #[error("a selection is already pending in scene {0}")]
    AlreadySelected(SceneId),

    #[error("choice {index} does not exist in scene {scene}")]
    UnknownChoice { scene: SceneId, index: usize },

    #[error("recommendation {0} does not exist")]
    UnknownRecommendation(usize),

    #[error("session has been shut down")]
    ShutDown,
}
