pub mod fetch;
pub mod route;
pub mod runner;

pub use fetch::{FetchTransport, DEFAULT_ENDPOINT};
pub use runner::ExperienceRunner;

/// Generate all `#[wasm_bindgen]` exports for an experience.
///
/// Generates:
/// - `thread_local!` storage for the ExperienceRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (stage_init, stage_tick, input handlers, data accessors)
///
/// `stage_init` passes its `config_json` to `Experience::configure` before init.
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use linky_engine::*;
///
/// mod lounge;
/// use lounge::MyExperience;
///
/// linky_web::export_experience!(MyExperience, "my-experience");
/// ```
///
/// # Arguments
///
/// - `$experience_type`: The struct that implements `linky_engine::Experience`
///   and has a `new()` constructor
/// - `$experience_name`: A string literal used in log messages
#[macro_export]
macro_rules! export_experience {
    ($experience_type:ty, $experience_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::ExperienceRunner<$experience_type>>> =
                RefCell::new(None);
        }

        fn with_runner<R>(
            fallback: R,
            f: impl FnOnce(&mut $crate::ExperienceRunner<$experience_type>) -> R,
        ) -> R {
            RUNNER.with(|cell| match cell.borrow_mut().as_mut() {
                Some(runner) => f(runner),
                None => {
                    log::warn!("{}: not initialized, call stage_init() first", $experience_name);
                    fallback
                }
            })
        }

        /// `endpoint` is the save route ("" disables reporting). `epoch_ms` and
        /// `entropy` come from `Date.now()` and `Math.random()`. `config_json`
        /// overrides any subset of the experience's settings ("" keeps defaults).
        #[wasm_bindgen]
        pub fn stage_init(endpoint: &str, epoch_ms: f64, entropy: f64, config_json: &str) {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let experience = <$experience_type>::new();
            let transport = $crate::FetchTransport::new(endpoint);
            let runner = $crate::ExperienceRunner::new(experience, Box::new(transport));

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            with_runner((), |r| r.configure(config_json));

            let host = HostSeed {
                epoch_ms: epoch_ms.max(0.0) as u64,
                entropy,
            };
            with_runner((), |r| r.init(host));
            log::info!("{}: initialized", $experience_name);
        }

        #[wasm_bindgen]
        pub fn stage_tick(dt: f32) {
            with_runner((), |r| r.tick(dt));
        }

        #[wasm_bindgen]
        pub fn stage_pointer_down() {
            with_runner((), |r| r.push_input(InputEvent::PointerDown));
        }

        #[wasm_bindgen]
        pub fn stage_pointer_up() {
            with_runner((), |r| r.push_input(InputEvent::PointerUp));
        }

        #[wasm_bindgen]
        pub fn stage_pointer_cancel() {
            with_runner((), |r| r.push_input(InputEvent::PointerCancel));
        }

        #[wasm_bindgen]
        pub fn stage_custom_event(kind: u32, a: f32) {
            with_runner((), |r| r.push_input(InputEvent::Custom { kind, a }));
        }

        #[wasm_bindgen]
        pub fn stage_shutdown() {
            with_runner((), |r| r.shutdown());
            log::info!("{}: shut down", $experience_name);
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_frame_buffer_ptr() -> *const f32 {
            with_runner(std::ptr::null(), |r| r.frame_buffer_ptr())
        }

        #[wasm_bindgen]
        pub fn get_frame_buffer_len() -> u32 {
            with_runner(0, |r| r.frame_buffer_len())
        }

        #[wasm_bindgen]
        pub fn get_view_json() -> String {
            with_runner("null".to_string(), |r| r.view_json())
        }

        #[wasm_bindgen]
        pub fn get_audio_manifest() -> String {
            with_runner("null".to_string(), |r| r.audio_manifest_json())
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_sounds() -> u32 {
            with_runner(0, |r| r.max_sounds())
        }

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(0, |r| r.max_events())
        }

        #[wasm_bindgen]
        pub fn get_buffer_total_floats() -> u32 {
            with_runner(0, |r| r.buffer_total_floats())
        }
    };
}
