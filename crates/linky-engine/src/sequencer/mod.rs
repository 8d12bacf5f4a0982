// sequencer/mod.rs
//
// Scene sequencer: explicit state machine over the fixed scene list,
// driven by user commands and a virtual-time scheduler.

pub mod command;
pub mod machine;
pub mod reveal;
pub mod scene;
pub mod session;
pub mod timings;
pub mod view;

pub use command::{Command, Rejection};
pub use machine::{Sequencer, SequencerEvent};
pub use reveal::RevealSchedule;
pub use scene::{SceneId, QUESTION_COUNT};
pub use session::{generate_session_id, AnswerRecord, SessionState};
pub use timings::Timings;
pub use view::{QuestionView, SceneView};
