use serde::{Serialize, Serializer};

pub use crate::quiz::data::QUESTION_COUNT;

const QUESTION_NAMES: [&str; QUESTION_COUNT] = ["question-0", "question-1", "question-2"];

/// One step of the presentation sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneId {
    Entrance,
    SoundPrompt,
    Montage,
    /// Index into the question table, always `< QUESTION_COUNT`.
    Question(usize),
    Result,
    Brand,
}

impl SceneId {
    pub const FIRST: SceneId = SceneId::Entrance;

    /// The scene that follows this one, or `None` for the terminal Brand scene.
    pub fn next(self) -> Option<SceneId> {
        match self {
            SceneId::Entrance => Some(SceneId::SoundPrompt),
            SceneId::SoundPrompt => Some(SceneId::Montage),
            SceneId::Montage => Some(SceneId::Question(0)),
            SceneId::Question(i) if i + 1 < QUESTION_COUNT => Some(SceneId::Question(i + 1)),
            SceneId::Question(_) => Some(SceneId::Result),
            SceneId::Result => Some(SceneId::Brand),
            SceneId::Brand => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }

    /// Position in the sequence (Entrance = 0 … Brand = 7). Sent to the browser in stage events.
    pub fn ordinal(self) -> usize {
        match self {
            SceneId::Entrance => 0,
            SceneId::SoundPrompt => 1,
            SceneId::Montage => 2,
            SceneId::Question(i) => 3 + i,
            SceneId::Result => 3 + QUESTION_COUNT,
            SceneId::Brand => 4 + QUESTION_COUNT,
        }
    }

    /// Scene key used by the presentation layer.
    pub fn name(self) -> &'static str {
        match self {
            SceneId::Entrance => "entrance",
            SceneId::SoundPrompt => "sound",
            SceneId::Montage => "montage",
            SceneId::Question(i) => QUESTION_NAMES.get(i).copied().unwrap_or("question"),
            SceneId::Result => "result",
            SceneId::Brand => "brand",
        }
    }

    /// The whole sequence, first to last.
    pub fn sequence() -> impl Iterator<Item = SceneId> {
        std::iter::successors(Some(SceneId::FIRST), |s| s.next())
    }
}

impl std::fmt::Display for SceneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for SceneId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_is_linear_and_ends_at_brand() {
        let names: Vec<_> = SceneId::sequence().map(SceneId::name).collect();
        assert_eq!(
            names,
            [
                "entrance", "sound", "montage", "question-0", "question-1", "question-2",
                "result", "brand"
            ]
        );
        assert!(SceneId::Brand.is_terminal());
    }

    #[test]
    fn ordinals_follow_sequence() {
        for (i, scene) in SceneId::sequence().enumerate() {
            assert_eq!(scene.ordinal(), i);
        }
    }

    #[test]
    fn last_question_leads_to_result() {
        assert_eq!(SceneId::Question(QUESTION_COUNT - 1).next(), Some(SceneId::Result));
    }

    #[test]
    fn serializes_as_name() {
        assert_eq!(serde_json::to_string(&SceneId::Question(1)).unwrap(), "\"question-1\"");
    }
}
