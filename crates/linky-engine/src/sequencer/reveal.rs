use super::scene::SceneId;

/// Per-scene reveal timeline.
///
/// Phase `k` (1-based) is revealed `offsets_ms[k - 1]` after the scene is
/// entered. The scene's controls become usable once `controls_at` is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealSchedule {
    pub offsets_ms: &'static [u64],
    pub controls_at: u8,
}

const ENTRANCE: RevealSchedule = RevealSchedule {
    offsets_ms: &[800, 2200, 3800, 5400, 7000],
    controls_at: 5,
};

const SOUND_PROMPT: RevealSchedule = RevealSchedule {
    offsets_ms: &[600, 1800],
    controls_at: 2,
};

const MONTAGE: RevealSchedule = RevealSchedule {
    offsets_ms: &[600, 4000, 8000],
    controls_at: 3,
};

// Choices are on screen as soon as the question is.
const QUESTION: RevealSchedule = RevealSchedule {
    offsets_ms: &[],
    controls_at: 0,
};

const RESULT: RevealSchedule = RevealSchedule {
    offsets_ms: &[800, 2400, 3600],
    controls_at: 3,
};

const BRAND: RevealSchedule = RevealSchedule {
    offsets_ms: &[600, 3000, 5000, 6200],
    controls_at: 4,
};

impl RevealSchedule {
    pub fn for_scene(scene: SceneId) -> RevealSchedule {
        match scene {
            SceneId::Entrance => ENTRANCE,
            SceneId::SoundPrompt => SOUND_PROMPT,
            SceneId::Montage => MONTAGE,
            SceneId::Question(_) => QUESTION,
            SceneId::Result => RESULT,
            SceneId::Brand => BRAND,
        }
    }

    /// Highest phase this scene reaches.
    pub fn max_phase(&self) -> u8 {
        self.offsets_ms.len() as u8
    }

    pub fn controls_ready(&self, phase: u8) -> bool {
        phase >= self.controls_at
    }

    /// Offset of `phase` from scene entry (phase 0 is the entry itself).
    pub fn offset_of(&self, phase: u8) -> u64 {
        match phase {
            0 => 0,
            p => self.offsets_ms.get(p as usize - 1).copied().unwrap_or(0),
        }
    }

    /// Delays for the phases after `from`, keeping the original gaps between them.
    /// Returns `(phase, delay_from_now)` pairs.
    pub fn remaining_after(&self, from: u8) -> Vec<(u8, u64)> {
        let base = self.offset_of(from);
        (from + 1..=self.max_phase())
            .map(|p| (p, self.offset_of(p).saturating_sub(base)))
            .collect()
    }
}
