// sequencer/machine.rs
//
// The scene state machine.
//
//   Entrance ─enter─> SoundPrompt ─choose─> Montage ─continue|auto─> Question(0)
//     ─select─> Question(1) ─select─> Question(2) ─select─> Result ─pick─> Brand
//
// User commands go through `apply`; time goes through `advance`. Every timer
// is scene-local and is cancelled when the scene changes. Outputs are queued
// as `SequencerEvent`s and drained by the host once per frame.

use crate::audio::director::{AudioCue, AudioDirector};
use crate::core::scheduler::{Scheduler, TaskId};
use crate::quiz::category::Category;
use crate::quiz::data::{question, Recommendation, ResultProfile};
use crate::quiz::scoring::{resolve_profile, score_answers};
use crate::report::payload::SaveRequest;

use super::command::{Command, Rejection};
use super::reveal::RevealSchedule;
use super::scene::{SceneId, QUESTION_COUNT};
use super::session::{AnswerRecord, SessionState};
use super::timings::Timings;
use super::view::{QuestionView, SceneView};

/// Something the host should react to.
#[derive(Debug, Clone, PartialEq)]
pub enum SequencerEvent {
    SceneEntered(SceneId),
    PhaseRevealed { scene: SceneId, phase: u8 },
    ChoiceSelected { question: usize, choice: usize },
    ResultComputed(Category),
    RecommendationSelected(usize),
    SoundChanged(bool),
    PressChanged(bool),
    Audio(AudioCue),
    /// Fire-and-forget: hand to the report transport, never wait on it.
    Report(SaveRequest),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Timer {
    Reveal(u8),
    FastForward,
    CommitChoice(usize),
    CommitRecommendation(usize),
    AutoAdvance,
}

pub struct Sequencer {
    session: SessionState,
    timings: Timings,
    scheduler: Scheduler<Timer>,
    audio: AudioDirector,
    schedule: RevealSchedule,
    phase: u8,
    /// Pending choice/gathering index; blocks further selections in this scene.
    selection: Option<usize>,
    pressing: bool,
    fast_forward: Option<TaskId>,
    auto_advance: Option<TaskId>,
    shut_down: bool,
    events: Vec<SequencerEvent>,
}

impl Sequencer {
    /// Start a fresh session at the entrance.
    pub fn new(session_id: impl Into<String>, timings: Timings) -> Self {
        let mut seq = Self {
            session: SessionState::new(session_id),
            timings,
            scheduler: Scheduler::new(),
            audio: AudioDirector::new(),
            schedule: RevealSchedule::for_scene(SceneId::FIRST),
            phase: 0,
            selection: None,
            pressing: false,
            fast_forward: None,
            auto_advance: None,
            shut_down: false,
            events: Vec::new(),
        };
        seq.enter(SceneId::FIRST);
        seq
    }

    pub fn scene(&self) -> SceneId {
        self.session.scene
    }

    pub fn phase(&self) -> u8 {
        self.phase
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn timings(&self) -> &Timings {
        &self.timings
    }

    pub fn is_pressing(&self) -> bool {
        self.pressing
    }

    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    /// Virtual time since the session started.
    pub fn now(&self) -> u64 {
        self.scheduler.now()
    }

    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending()
    }

    /// Result profile, once the questions are scored.
    pub fn profile(&self) -> Option<&'static ResultProfile> {
        self.session.category.map(resolve_profile)
    }

    /// The chosen gathering's link, once the brand scene has revealed it.
    pub fn cta(&self) -> Option<Recommendation> {
        if self.session.scene == SceneId::Brand && self.schedule.controls_ready(self.phase) {
            self.session.recommendation
        } else {
            None
        }
    }

    /// Take every event queued since the last drain.
    pub fn drain_events(&mut self) -> Vec<SequencerEvent> {
        std::mem::take(&mut self.events)
    }

    /// Apply a user command. Rejected commands change nothing.
    pub fn apply(&mut self, command: Command) -> Result<(), Rejection> {
        if self.shut_down {
            return Err(Rejection::ShutDown);
        }
        match (command, self.session.scene) {
            (Command::ToggleSound, _) => {
                self.set_sound_flag(!self.session.sound_enabled);
                self.sync_audio();
                Ok(())
            }
            (Command::Enter, SceneId::Entrance) => {
                self.require_controls()?;
                self.enter(SceneId::SoundPrompt);
                Ok(())
            }
            (Command::ChooseSound(on), SceneId::SoundPrompt) => {
                self.require_controls()?;
                // Audio is reconciled by `enter`, against the montage.
                self.set_sound_flag(on);
                self.enter(SceneId::Montage);
                Ok(())
            }
            (Command::Continue, SceneId::Montage) => {
                self.require_controls()?;
                self.enter(SceneId::Question(0));
                Ok(())
            }
            (Command::PressStart, SceneId::Montage) => {
                self.start_fast_forward();
                Ok(())
            }
            (Command::PressEnd, SceneId::Montage) => {
                self.stop_fast_forward();
                Ok(())
            }
            (Command::SelectChoice(index), SceneId::Question(q)) => self.select_choice(q, index),
            (Command::SelectRecommendation(index), SceneId::Result) => {
                self.select_recommendation(index)
            }
            (command, scene) => Err(Rejection::NotInScene {
                command: command.name(),
                scene,
            }),
        }
    }

    /// Advance virtual time, firing due timers in order.
    pub fn advance(&mut self, ms: u64) {
        if self.shut_down {
            return;
        }
        let deadline = self.scheduler.now() + ms;
        while let Some(timer) = self.scheduler.pop_due(deadline) {
            log::debug!("{}ms: {:?} in {}", self.scheduler.now(), timer, self.session.scene);
            self.on_timer(timer);
        }
        self.scheduler.settle(deadline);
    }

    /// Teardown: cancel every timer and release audio. Further commands are rejected.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.scheduler.cancel_all();
        self.fast_forward = None;
        self.auto_advance = None;
        self.pressing = false;
        for cue in self.audio.release() {
            self.events.push(SequencerEvent::Audio(cue));
        }
        self.shut_down = true;
        log::info!(
            "session {} shut down in scene {}",
            self.session.session_id,
            self.session.scene
        );
    }

    pub fn view(&self) -> SceneView {
        let scene = self.session.scene;
        let question = match scene {
            SceneId::Question(index) => question(index).map(|q| QuestionView {
                index,
                total: QUESTION_COUNT,
                prompt: q.prompt,
                choices: q.choices,
            }),
            _ => None,
        };
        SceneView {
            scene,
            phase: self.phase,
            max_phase: self.schedule.max_phase(),
            controls_ready: self.schedule.controls_ready(self.phase),
            sound_enabled: self.session.sound_enabled,
            pressing: self.pressing,
            selected: self.selection,
            question,
            profile: if scene == SceneId::Result { self.profile() } else { None },
            cta: self.cta(),
        }
    }

    // -- transitions --

    fn enter(&mut self, scene: SceneId) {
        self.scheduler.cancel_all();
        self.fast_forward = None;
        self.auto_advance = None;
        if self.pressing {
            self.pressing = false;
            self.events.push(SequencerEvent::PressChanged(false));
        }
        self.selection = None;
        self.phase = 0;
        self.session.scene = scene;
        self.schedule = RevealSchedule::for_scene(scene);
        for (phase, delay) in self.schedule.remaining_after(0) {
            self.scheduler.once(delay, Timer::Reveal(phase));
        }

        log::info!("session {}: scene -> {}", self.session.session_id, scene);
        self.events.push(SequencerEvent::SceneEntered(scene));
        self.sync_audio();
    }

    fn require_controls(&self) -> Result<(), Rejection> {
        if self.schedule.controls_ready(self.phase) {
            Ok(())
        } else {
            Err(Rejection::NotRevealed(self.session.scene))
        }
    }

    fn set_sound_flag(&mut self, on: bool) {
        if self.session.sound_enabled != on {
            self.session.sound_enabled = on;
            self.events.push(SequencerEvent::SoundChanged(on));
        }
    }

    fn sync_audio(&mut self) {
        for cue in self.audio.sync(self.session.sound_enabled, self.session.scene) {
            self.events.push(SequencerEvent::Audio(cue));
        }
    }

    fn reveal(&mut self, phase: u8) {
        let phase = phase.min(self.schedule.max_phase());
        if phase <= self.phase {
            return;
        }
        self.phase = phase;
        self.events.push(SequencerEvent::PhaseRevealed {
            scene: self.session.scene,
            phase,
        });
        if self.session.scene == SceneId::Montage && phase == self.schedule.max_phase() {
            self.arm_auto_advance();
        }
    }

    fn arm_auto_advance(&mut self) {
        if self
            .auto_advance
            .is_some_and(|id| self.scheduler.is_pending(id))
        {
            return;
        }
        if let Some(delay) = self.timings.montage_auto_advance_ms {
            self.auto_advance = Some(self.scheduler.once(delay, Timer::AutoAdvance));
        }
    }

    // -- montage press-and-hold --

    fn start_fast_forward(&mut self) {
        if self.pressing {
            return;
        }
        self.pressing = true;
        self.events.push(SequencerEvent::PressChanged(true));
        self.scheduler.cancel_where(|t| matches!(t, Timer::Reveal(_)));
        if self.phase < self.schedule.max_phase() {
            let interval = self.timings.fast_forward_interval_ms;
            self.fast_forward = Some(self.scheduler.every(interval, Timer::FastForward));
        }
    }

    fn stop_fast_forward(&mut self) {
        if !self.pressing {
            return;
        }
        self.pressing = false;
        self.events.push(SequencerEvent::PressChanged(false));
        self.cancel_fast_forward();
        // Released early: pick the normal pacing back up from the current phase.
        for (phase, delay) in self.schedule.remaining_after(self.phase) {
            self.scheduler.once(delay, Timer::Reveal(phase));
        }
    }

    fn cancel_fast_forward(&mut self) {
        if let Some(id) = self.fast_forward.take() {
            self.scheduler.cancel(id);
        }
    }

    // -- selections --

    fn select_choice(&mut self, q: usize, index: usize) -> Result<(), Rejection> {
        let scene = self.session.scene;
        if self.selection.is_some() {
            return Err(Rejection::AlreadySelected(scene));
        }
        let count = question(q).map_or(0, |question| question.choices.len());
        if index >= count {
            return Err(Rejection::UnknownChoice { scene, index });
        }
        self.selection = Some(index);
        self.events.push(SequencerEvent::ChoiceSelected { question: q, choice: index });
        self.scheduler.once(self.timings.choice_linger_ms, Timer::CommitChoice(index));
        Ok(())
    }

    fn select_recommendation(&mut self, index: usize) -> Result<(), Rejection> {
        let scene = self.session.scene;
        self.require_controls()?;
        if self.selection.is_some() {
            return Err(Rejection::AlreadySelected(scene));
        }
        let profile = self.profile().ok_or(Rejection::NotRevealed(scene))?;
        if index >= profile.recommendations.len() {
            return Err(Rejection::UnknownRecommendation(index));
        }
        self.selection = Some(index);
        self.events.push(SequencerEvent::RecommendationSelected(index));
        self.scheduler
            .once(self.timings.recommendation_linger_ms, Timer::CommitRecommendation(index));
        Ok(())
    }

    // -- timers --

    fn on_timer(&mut self, timer: Timer) {
        match timer {
            Timer::Reveal(phase) => self.reveal(phase),
            Timer::FastForward => {
                if self.phase < self.schedule.max_phase() {
                    self.reveal(self.phase + 1);
                }
                if self.phase >= self.schedule.max_phase() {
                    self.cancel_fast_forward();
                }
            }
            Timer::CommitChoice(index) => self.commit_choice(index),
            Timer::CommitRecommendation(index) => self.commit_recommendation(index),
            Timer::AutoAdvance => {
                self.auto_advance = None;
                if self.session.scene == SceneId::Montage {
                    log::info!("montage finished without continue, advancing");
                    self.enter(SceneId::Question(0));
                }
            }
        }
    }

    fn commit_choice(&mut self, index: usize) {
        let SceneId::Question(q) = self.session.scene else {
            return;
        };
        let Some(choice) = question(q).and_then(|question| question.choices.get(index)) else {
            return;
        };
        self.session.answers.push(AnswerRecord {
            question: q,
            weights: choice.weights,
            label: choice.label,
        });
        self.session.labels.push(choice.label.to_string());
        log::debug!("question {} answered with choice {}", q, index);

        if q + 1 < QUESTION_COUNT {
            self.enter(SceneId::Question(q + 1));
        } else {
            let category = score_answers(&self.session.answer_weights());
            self.session.category = Some(category);
            log::info!(
                "session {} classified as {} (totals {:?})",
                self.session.session_id,
                category,
                self.session.totals()
            );
            self.events.push(SequencerEvent::ResultComputed(category));
            self.enter(SceneId::Result);
        }
    }

    fn commit_recommendation(&mut self, index: usize) {
        let Some(gathering) = self
            .profile()
            .and_then(|profile| profile.recommendations.get(index))
            .copied()
        else {
            return;
        };
        self.session.recommendation = Some(gathering);
        if let Some(request) = self.session.save_request() {
            self.events.push(SequencerEvent::Report(request));
        }
        self.enter(SceneId::Brand);
    }
}
