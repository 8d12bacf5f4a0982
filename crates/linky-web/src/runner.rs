use linky_engine::{
    dispatch, DispatchStatus, Experience, FrameClock, HostSeed, InputEvent, InputQueue,
    ProtocolLayout, ReportTransport, StageConfig, StageContext,
};

/// Generic experience runner that wires up the stage loop.
///
/// Each concrete experience (e.g., `linky-lounge`) creates a `thread_local!`
/// ExperienceRunner and exports free functions via `#[wasm_bindgen]`, because
/// wasm-bindgen cannot export generic structs directly.
pub struct ExperienceRunner<E: Experience> {
    experience: E,
    ctx: StageContext,
    input: InputQueue,
    clock: FrameClock,
    config: StageConfig,
    layout: ProtocolLayout,
    transport: Box<dyn ReportTransport>,
    /// Flat frame buffer (header + sounds + events) for the host to read.
    frame_buffer: Vec<f32>,
    frame: u32,
    dispatched: Vec<DispatchStatus>,
    initialized: bool,
    shut_down: bool,
}

impl<E: Experience> ExperienceRunner<E> {
    pub fn new(experience: E, transport: Box<dyn ReportTransport>) -> Self {
        let config = experience.config();
        let clock = FrameClock::new(config.max_frame_ms);
        let layout = ProtocolLayout::from_config(&config);
        let frame_buffer = vec![0.0; layout.buffer_total_floats];

        Self {
            experience,
            ctx: StageContext::default(),
            input: InputQueue::new(),
            clock,
            config,
            layout,
            transport,
            frame_buffer,
            frame: 0,
            dispatched: Vec::new(),
            initialized: false,
            shut_down: false,
        }
    }

    /// Hand host JSON configuration to the experience. Call before `init`.
    /// A malformed config is logged and the experience keeps its defaults.
    pub fn configure(&mut self, json: &str) {
        if json.trim().is_empty() {
            return;
        }
        if let Err(err) = self.experience.configure(json) {
            log::warn!("ignoring experience config, using defaults: {}", err);
        }
    }

    /// Initialize the experience. Call once after construction.
    pub fn init(&mut self, host: HostSeed) {
        self.config = self.experience.config();
        self.clock = FrameClock::new(self.config.max_frame_ms);
        self.layout = ProtocolLayout::from_config(&self.config);
        self.ctx = StageContext::new(host);
        self.experience.init(&mut self.ctx);
        self.initialized = true;
        self.finish_frame();
    }

    /// Push an input event into the queue. Applied on the next tick.
    pub fn push_input(&mut self, event: InputEvent) {
        if self.shut_down {
            return;
        }
        self.input.push(event);
    }

    /// Run one frame tick. `dt` is the host's frame delta in seconds.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized || self.shut_down {
            return;
        }
        let ms = self.clock.accumulate(dt);
        self.step(ms);
    }

    /// Run one frame advancing exactly `ms` of virtual time.
    pub fn step(&mut self, ms: u64) {
        if !self.initialized || self.shut_down {
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();
        self.ctx.set_frame_ms(ms);

        self.experience.update(&mut self.ctx, &self.input);

        // Drain input after update
        self.input.drain();

        self.finish_frame();
    }

    /// Cancel everything the experience has pending and publish its final cues.
    pub fn shutdown(&mut self) {
        if !self.initialized || self.shut_down {
            return;
        }
        self.ctx.clear_frame_data();
        self.experience.shutdown(&mut self.ctx);
        self.input.drain();
        self.finish_frame();
        self.shut_down = true;
    }

    /// Hand queued reports to the transport, then pack the frame buffer.
    fn finish_frame(&mut self) {
        for request in std::mem::take(&mut self.ctx.reports) {
            let status = dispatch(self.transport.as_ref(), &request);
            self.dispatched.push(status);
        }

        self.frame = self.frame.wrapping_add(1);
        self.layout.pack(
            self.frame,
            &self.ctx.sounds,
            &self.ctx.events,
            &mut self.frame_buffer,
        );
    }

    pub fn experience(&self) -> &E {
        &self.experience
    }

    pub fn context(&self) -> &StageContext {
        &self.ctx
    }

    /// Outcome of every report handed to the transport so far.
    pub fn dispatched(&self) -> &[DispatchStatus] {
        &self.dispatched
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    pub fn view_json(&self) -> String {
        self.experience.view_json()
    }

    pub fn audio_manifest_json(&self) -> String {
        match self.experience.audio_manifest().to_json() {
            Ok(json) => json,
            Err(err) => {
                log::error!("audio manifest failed to encode: {}", err);
                "null".to_string()
            }
        }
    }

    // ---- Pointer accessors for frame buffer reads ----

    pub fn frame_buffer(&self) -> &[f32] {
        &self.frame_buffer
    }

    pub fn frame_buffer_ptr(&self) -> *const f32 {
        self.frame_buffer.as_ptr()
    }

    pub fn frame_buffer_len(&self) -> u32 {
        self.frame_buffer.len() as u32
    }

    // ---- Capacity accessors (read by TypeScript via wasm_bindgen exports) ----

    pub fn max_sounds(&self) -> u32 {
        self.layout.max_sounds as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linky_engine::bridge::protocol::{
        HEADER_EVENT_COUNT, HEADER_FRAME_COUNTER, HEADER_SOUND_COUNT,
    };
    use linky_engine::{
        generate_session_id, Command, ReportError, SaveRequest, SceneId, Sequencer,
        SequencerEvent, StageEvent, Timings,
    };
    use std::cell::Cell;
    use std::rc::Rc;

    /// Minimal experience over the sequencer, decoding custom kinds 1..=5.
    struct MiniVisit {
        timings: Timings,
        seq: Option<Sequencer>,
    }

    impl MiniVisit {
        fn new() -> Self {
            Self { timings: Timings::default(), seq: None }
        }

        fn scene(&self) -> Option<SceneId> {
            self.seq.as_ref().map(Sequencer::scene)
        }

        fn forward(seq: &mut Sequencer, ctx: &mut StageContext) {
            for event in seq.drain_events() {
                match event {
                    SequencerEvent::SceneEntered(scene) => {
                        ctx.emit_event(StageEvent::new(1.0, scene.ordinal() as f32, 0.0))
                    }
                    SequencerEvent::Audio(cue) => ctx.emit_sound(cue.sound_event()),
                    SequencerEvent::Report(request) => ctx.submit_report(request),
                    _ => {}
                }
            }
        }
    }

    impl Experience for MiniVisit {
        fn configure(&mut self, json: &str) -> Result<(), serde_json::Error> {
            self.timings = Timings::from_json(json)?;
            Ok(())
        }

        fn init(&mut self, ctx: &mut StageContext) {
            let mut seq = Sequencer::new(generate_session_id(ctx.host()), self.timings.clone());
            Self::forward(&mut seq, ctx);
            self.seq = Some(seq);
        }

        fn update(&mut self, ctx: &mut StageContext, input: &InputQueue) {
            let Some(seq) = self.seq.as_mut() else { return };
            for event in input.iter() {
                let command = match *event {
                    InputEvent::Custom { kind: 1, .. } => Command::Enter,
                    InputEvent::Custom { kind: 2, a } => Command::ChooseSound(a != 0.0),
                    InputEvent::Custom { kind: 3, .. } => Command::Continue,
                    InputEvent::Custom { kind: 4, a } => Command::SelectChoice(a as usize),
                    InputEvent::Custom { kind: 5, a } => Command::SelectRecommendation(a as usize),
                    _ => continue,
                };
                let _ = seq.apply(command);
            }
            seq.advance(ctx.frame_ms());
            Self::forward(seq, ctx);
        }

        fn shutdown(&mut self, ctx: &mut StageContext) {
            if let Some(seq) = self.seq.as_mut() {
                seq.shutdown();
                Self::forward(seq, ctx);
            }
        }
    }

    struct Failing {
        attempts: Rc<Cell<u32>>,
    }

    impl ReportTransport for Failing {
        fn send(&self, _request: &SaveRequest) -> Result<(), ReportError> {
            self.attempts.set(self.attempts.get() + 1);
            Err(ReportError::Transport("offline".into()))
        }
    }

    fn custom(kind: u32, a: f32) -> InputEvent {
        InputEvent::Custom { kind, a }
    }

    fn runner_with(transport: Box<dyn ReportTransport>) -> ExperienceRunner<MiniVisit> {
        let mut runner = ExperienceRunner::new(MiniVisit::new(), transport);
        runner.init(HostSeed { epoch_ms: 1_760_000_000_000, entropy: 0.25 });
        runner
    }

    #[test]
    fn failing_transport_does_not_block_brand() {
        let attempts = Rc::new(Cell::new(0));
        let mut r = runner_with(Box::new(Failing { attempts: attempts.clone() }));

        r.step(7000);
        r.push_input(custom(1, 0.0));
        r.step(1800);
        r.push_input(custom(2, 0.0));
        r.step(8000);
        r.push_input(custom(3, 0.0));
        r.step(0);
        assert_eq!(r.experience().scene(), Some(SceneId::Question(0)));

        for choice in [0.0, 1.0, 0.0] {
            r.push_input(custom(4, choice));
            r.step(800);
        }
        assert_eq!(r.experience().scene(), Some(SceneId::Result));
        r.step(3600);
        r.push_input(custom(5, 0.0));
        r.step(900);

        assert_eq!(r.experience().scene(), Some(SceneId::Brand));
        assert_eq!(attempts.get(), 1);
        assert_eq!(r.dispatched(), &[DispatchStatus::Failed]);
    }

    #[test]
    fn frame_buffer_carries_header_and_events() {
        let mut r = runner_with(Box::new(linky_engine::report::NullTransport));
        assert_eq!(r.frame_buffer_len(), r.buffer_total_floats());
        // init frame published the entrance scene
        assert_eq!(r.frame_buffer()[HEADER_EVENT_COUNT], 1.0);

        r.step(16);
        assert_eq!(r.frame_buffer()[HEADER_FRAME_COUNTER], 2.0);
        assert_eq!(r.frame_buffer()[HEADER_EVENT_COUNT], 0.0);
        assert_eq!(r.frame_buffer()[HEADER_SOUND_COUNT], 0.0);
    }

    #[test]
    fn tick_converts_seconds_to_virtual_ms() {
        let mut r = runner_with(Box::new(linky_engine::report::NullTransport));
        for _ in 0..14 {
            r.tick(0.5);
        }
        r.push_input(custom(1, 0.0));
        r.tick(0.016);
        assert_eq!(r.experience().scene(), Some(SceneId::SoundPrompt));
    }

    #[test]
    fn configure_overrides_timings_before_init() {
        let mut r = ExperienceRunner::new(MiniVisit::new(), Box::new(linky_engine::report::NullTransport));
        r.configure(r#"{"montage_auto_advance_ms": null, "choice_linger_ms": 0}"#);
        r.init(HostSeed::default());
        let timings = r.experience().seq.as_ref().unwrap().timings();
        assert_eq!(timings.choice_linger_ms, 0);
        assert_eq!(timings.montage_auto_advance_ms, None);
        assert_eq!(timings.recommendation_linger_ms, 900);
    }

    #[test]
    fn malformed_config_keeps_defaults() {
        let mut r = ExperienceRunner::new(MiniVisit::new(), Box::new(linky_engine::report::NullTransport));
        r.configure("{not json");
        r.configure("");
        r.init(HostSeed::default());
        assert_eq!(r.experience().seq.as_ref().unwrap().timings(), &Timings::default());
    }

    #[test]
    fn tick_before_init_is_ignored() {
        let mut r = ExperienceRunner::new(MiniVisit::new(), Box::new(linky_engine::report::NullTransport));
        r.tick(1.0);
        r.step(1000);
        assert_eq!(r.experience().scene(), None);
    }

    #[test]
    fn shutdown_stops_further_frames() {
        let mut r = runner_with(Box::new(linky_engine::report::NullTransport));
        r.shutdown();
        assert!(r.is_shut_down());
        r.push_input(custom(1, 0.0));
        r.step(10_000);
        assert_eq!(r.experience().scene(), Some(SceneId::Entrance));
    }
}
