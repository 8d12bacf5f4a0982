use crate::api::types::SoundEvent;
use crate::sequencer::scene::SceneId;

/// A change to what the browser's audio player should be doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    StartAmbient,
    StopAmbient,
    StartMontage,
    StopMontage,
}

impl AudioCue {
    pub fn sound_event(self) -> SoundEvent {
        match self {
            AudioCue::StartAmbient => SoundEvent::AMBIENT_START,
            AudioCue::StopAmbient => SoundEvent::AMBIENT_STOP,
            AudioCue::StartMontage => SoundEvent::MONTAGE_START,
            AudioCue::StopMontage => SoundEvent::MONTAGE_STOP,
        }
    }
}

/// Tracks which track handles are live and emits only transitions.
///
/// - ambient: looping, plays whenever sound is on outside the montage
/// - montage: one-shot, plays while sound is on inside the montage
///
/// The montage track is not re-cued once it has been started, so it plays once
/// per montage visit unless the visitor toggles sound off and on again.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AudioDirector {
    ambient: bool,
    montage: bool,
}

impl AudioDirector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ambient_playing(&self) -> bool {
        self.ambient
    }

    pub fn montage_playing(&self) -> bool {
        self.montage
    }

    /// Reconcile with the current sound flag and scene. Stops come before starts.
    pub fn sync(&mut self, sound_enabled: bool, scene: SceneId) -> Vec<AudioCue> {
        let in_montage = scene == SceneId::Montage;
        let want_ambient = sound_enabled && !in_montage;
        let want_montage = sound_enabled && in_montage;

        let mut cues = Vec::new();
        if self.ambient && !want_ambient {
            cues.push(AudioCue::StopAmbient);
        }
        if self.montage && !want_montage {
            cues.push(AudioCue::StopMontage);
        }
        if !self.ambient && want_ambient {
            cues.push(AudioCue::StartAmbient);
        }
        if !self.montage && want_montage {
            cues.push(AudioCue::StartMontage);
        }
        self.ambient = want_ambient;
        self.montage = want_montage;
        cues
    }

    /// Stop everything (teardown).
    pub fn release(&mut self) -> Vec<AudioCue> {
        let mut cues = Vec::new();
        if std::mem::take(&mut self.ambient) {
            cues.push(AudioCue::StopAmbient);
        }
        if std::mem::take(&mut self.montage) {
            cues.push(AudioCue::StopMontage);
        }
        cues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silent_until_sound_enabled() {
        let mut d = AudioDirector::new();
        assert!(d.sync(false, SceneId::Entrance).is_empty());
        assert!(d.sync(false, SceneId::Montage).is_empty());
    }

    #[test]
    fn montage_pauses_ambient_and_plays_its_own_track() {
        let mut d = AudioDirector::new();
        assert_eq!(d.sync(true, SceneId::Montage), vec![AudioCue::StartMontage]);
        assert_eq!(
            d.sync(true, SceneId::Question(0)),
            vec![AudioCue::StopMontage, AudioCue::StartAmbient]
        );
        assert!(d.ambient_playing());
        assert!(!d.montage_playing());
    }

    #[test]
    fn repeated_sync_emits_nothing() {
        let mut d = AudioDirector::new();
        d.sync(true, SceneId::Result);
        assert!(d.sync(true, SceneId::Brand).is_empty());
    }

    #[test]
    fn toggle_off_stops_current_track() {
        let mut d = AudioDirector::new();
        d.sync(true, SceneId::Question(1));
        assert_eq!(d.sync(false, SceneId::Question(1)), vec![AudioCue::StopAmbient]);
        d.sync(true, SceneId::Montage);
        assert_eq!(d.sync(false, SceneId::Montage), vec![AudioCue::StopMontage]);
    }

    #[test]
    fn release_stops_everything_once() {
        let mut d = AudioDirector::new();
        d.sync(true, SceneId::Brand);
        assert_eq!(d.release(), vec![AudioCue::StopAmbient]);
        assert!(d.release().is_empty());
    }

    #[test]
    fn cues_map_to_sound_events() {
        assert_eq!(AudioCue::StartAmbient.sound_event(), SoundEvent::AMBIENT_START);
        assert_eq!(AudioCue::StopMontage.sound_event(), SoundEvent::MONTAGE_STOP);
    }
}
