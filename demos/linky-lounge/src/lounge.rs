use linky_engine::*;

// ── Custom event kinds from the UI ───────────────────────────────────

const CUSTOM_ENTER: u32 = 1;
/// a = 1 for "with sound", 0 for "without".
const CUSTOM_CHOOSE_SOUND: u32 = 2;
const CUSTOM_CONTINUE: u32 = 3;
/// a = choice index.
const CUSTOM_SELECT_CHOICE: u32 = 4;
/// a = recommendation index.
const CUSTOM_SELECT_RECOMMENDATION: u32 = 5;
const CUSTOM_TOGGLE_SOUND: u32 = 6;

// ── Stage event kinds to the UI ──────────────────────────────────────

/// a = scene ordinal, b = question index (-1 outside questions).
const EVENT_SCENE: f32 = 1.0;
/// a = scene ordinal, b = phase.
const EVENT_PHASE: f32 = 2.0;
/// a = selected index, b = question index (-1 for a recommendation).
const EVENT_SELECTED: f32 = 3.0;
/// a = category index (talk, depth, spark, focus).
const EVENT_RESULT: f32 = 4.0;
/// a = 1 when sound is on.
const EVENT_SOUND: f32 = 5.0;
/// a = 1 while the montage is held.
const EVENT_PRESS: f32 = 6.0;

fn flag(on: bool) -> f32 {
    if on {
        1.0
    } else {
        0.0
    }
}

fn question_slot(scene: SceneId) -> f32 {
    match scene {
        SceneId::Question(i) => i as f32,
        _ => -1.0,
    }
}

/// Index payloads arrive as floats; anything negative or non-finite is no index.
fn index_of(a: f32) -> Option<usize> {
    (a.is_finite() && a >= 0.0).then(|| a as usize)
}

/// The Linky Lounge visit: entrance, sound prompt, montage, three questions,
/// result and brand CTA.
pub struct LinkyLounge {
    timings: Timings,
    seq: Option<Sequencer>,
}

impl LinkyLounge {
    pub fn new() -> Self {
        Self::with_timings(Timings::default())
    }

    pub fn with_timings(timings: Timings) -> Self {
        Self { timings, seq: None }
    }

    pub fn sequencer(&self) -> Option<&Sequencer> {
        self.seq.as_ref()
    }

    fn command_for(event: &InputEvent, scene: SceneId) -> Option<Command> {
        match *event {
            InputEvent::Custom { kind, a } => match kind {
                CUSTOM_ENTER => Some(Command::Enter),
                CUSTOM_CHOOSE_SOUND => Some(Command::ChooseSound(a != 0.0)),
                CUSTOM_CONTINUE => Some(Command::Continue),
                CUSTOM_SELECT_CHOICE => index_of(a).map(Command::SelectChoice),
                CUSTOM_SELECT_RECOMMENDATION => index_of(a).map(Command::SelectRecommendation),
                CUSTOM_TOGGLE_SOUND => Some(Command::ToggleSound),
                _ => None,
            },
            // Press-and-hold only means something during the montage
            InputEvent::PointerDown if scene == SceneId::Montage => Some(Command::PressStart),
            InputEvent::PointerUp | InputEvent::PointerCancel if scene == SceneId::Montage => {
                Some(Command::PressEnd)
            }
            _ => None,
        }
    }

    fn publish(seq: &mut Sequencer, ctx: &mut StageContext) {
        for event in seq.drain_events() {
            match event {
                SequencerEvent::SceneEntered(scene) => ctx.emit_event(StageEvent::new(
                    EVENT_SCENE,
                    scene.ordinal() as f32,
                    question_slot(scene),
                )),
                SequencerEvent::PhaseRevealed { scene, phase } => ctx.emit_event(
                    StageEvent::new(EVENT_PHASE, scene.ordinal() as f32, phase as f32),
                ),
                SequencerEvent::ChoiceSelected { question, choice } => ctx.emit_event(
                    StageEvent::new(EVENT_SELECTED, choice as f32, question as f32),
                ),
                SequencerEvent::RecommendationSelected(index) => {
                    ctx.emit_event(StageEvent::new(EVENT_SELECTED, index as f32, -1.0))
                }
                SequencerEvent::ResultComputed(category) => {
                    ctx.emit_event(StageEvent::new(EVENT_RESULT, category.index() as f32, 0.0))
                }
                SequencerEvent::SoundChanged(on) => {
                    ctx.emit_event(StageEvent::new(EVENT_SOUND, flag(on), 0.0))
                }
                SequencerEvent::PressChanged(on) => {
                    ctx.emit_event(StageEvent::new(EVENT_PRESS, flag(on), 0.0))
                }
                SequencerEvent::Audio(cue) => ctx.emit_sound(cue.sound_event()),
                SequencerEvent::Report(request) => ctx.submit_report(request),
            }
        }
    }
}

impl Default for LinkyLounge {
    fn default() -> Self {
        Self::new()
    }
}

impl Experience for LinkyLounge {
    /// Timings from a JSON object; omitted fields keep their defaults.
    fn configure(&mut self, json: &str) -> Result<(), serde_json::Error> {
        if json.trim().is_empty() {
            return Ok(());
        }
        self.timings = Timings::from_json(json)?;
        Ok(())
    }

    fn init(&mut self, ctx: &mut StageContext) {
        let session_id = generate_session_id(ctx.host());
        log::info!("LinkyLounge: session {} started", session_id);
        let mut seq = Sequencer::new(session_id, self.timings.clone());
        Self::publish(&mut seq, ctx);
        self.seq = Some(seq);
    }

    fn update(&mut self, ctx: &mut StageContext, input: &InputQueue) {
        let Some(seq) = self.seq.as_mut() else {
            return;
        };

        // ── Handle input ─────────────────────────────────────────────
        for event in input.iter() {
            let Some(command) = Self::command_for(event, seq.scene()) else {
                continue;
            };
            if let Err(rejection) = seq.apply(command) {
                log::debug!("ignored {}: {}", command.name(), rejection);
            }
        }

        // ── Advance time ─────────────────────────────────────────────
        seq.advance(ctx.frame_ms());
        Self::publish(seq, ctx);
    }

    fn view_json(&self) -> String {
        let Some(seq) = self.sequencer() else {
            return "null".to_string();
        };
        match seq.view().to_json() {
            Ok(json) => json,
            Err(err) => {
                log::error!("scene view failed to encode: {}", err);
                "null".to_string()
            }
        }
    }

    fn shutdown(&mut self, ctx: &mut StageContext) {
        if let Some(seq) = self.seq.as_mut() {
            seq.shutdown();
            Self::publish(seq, ctx);
        }
    }
}
