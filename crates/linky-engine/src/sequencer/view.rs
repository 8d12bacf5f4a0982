use serde::Serialize;

use crate::quiz::data::{Choice, Recommendation, ResultProfile};

use super::scene::SceneId;

/// Snapshot of what the presentation layer should render right now.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneView {
    pub scene: SceneId,
    pub phase: u8,
    pub max_phase: u8,
    /// Buttons for this scene may be shown and pressed.
    pub controls_ready: bool,
    pub sound_enabled: bool,
    pub pressing: bool,
    /// Index of the pending choice/gathering, for the selection highlight.
    pub selected: Option<usize>,
    pub question: Option<QuestionView>,
    pub profile: Option<&'static ResultProfile>,
    /// The chosen gathering's call-to-action, once the brand scene reveals it.
    pub cta: Option<Recommendation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionView {
    pub index: usize,
    pub total: usize,
    pub prompt: &'static str,
    pub choices: &'static [Choice],
}

impl SceneView {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
